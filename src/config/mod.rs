pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, SourceFormat};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const ALLOWED_OUTPUT_FORMATS: &[&str] = &["json", "csv"];
pub const DEFAULT_ARCHIVE_NAME: &str = "qualifying_offer.zip";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "qualifying-offer")]
#[command(about = "Calculates the MLB qualifying offer from a table of player salaries")]
pub struct CliConfig {
    /// URL of the salary table (HTML, CSV or JSON)
    #[arg(long, conflicts_with = "input_file")]
    pub source_url: Option<String>,

    /// Local salary table instead of a URL
    #[arg(long)]
    pub input_file: Option<String>,

    #[arg(long, value_enum, default_value_t = SourceFormat::Auto)]
    pub format: SourceFormat,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "json,csv")]
    pub formats: Vec<String>,

    /// Bundle the outputs into a single ZIP archive
    #[arg(long)]
    pub zip: bool,

    /// Size of the salary pool averaged into the offer
    #[arg(long, default_value = "125")]
    pub top_n: usize,

    /// Number of top salaries printed after the run
    #[arg(long, default_value = "25")]
    pub show_top: usize,

    /// Salary to place against the pool, e.g. "$27,000,000" (repeatable)
    #[arg(long)]
    pub percentile: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn source_endpoint(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    fn input_file(&self) -> Option<&str> {
        self.input_file.as_deref()
    }

    fn source_format(&self) -> SourceFormat {
        self.format
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn compression_filename(&self) -> Option<&str> {
        self.zip.then_some(DEFAULT_ARCHIVE_NAME)
    }

    fn top_n(&self) -> usize {
        self.top_n
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_exclusive_source(
            self.source_url.as_deref(),
            self.input_file.as_deref(),
        )?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats, ALLOWED_OUTPUT_FORMATS)?;
        validation::validate_positive_number("top_n", self.top_n, 1)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["qualifying-offer", "--input-file", "salaries.html"]);

        assert_eq!(config.top_n, 125);
        assert_eq!(config.formats, vec!["json", "csv"]);
        assert_eq!(config.format, SourceFormat::Auto);
        assert_eq!(config.compression_filename(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_repeated_percentile_queries() {
        let config = CliConfig::parse_from([
            "qualifying-offer",
            "--source-url",
            "https://example.com/data.html",
            "--percentile",
            "27000000",
            "--percentile",
            "$15,000,000",
            "--zip",
        ]);

        assert_eq!(config.percentile.len(), 2);
        assert_eq!(config.compression_filename(), Some(DEFAULT_ARCHIVE_NAME));
    }

    #[test]
    fn test_cli_requires_a_source() {
        let config = CliConfig::parse_from(["qualifying-offer"]);
        assert!(config.validate().is_err());

        let bad_url = CliConfig::parse_from(["qualifying-offer", "--source-url", "ftp://x"]);
        assert!(bad_url.validate().is_err());
    }
}
