use crate::config::{ALLOWED_OUTPUT_FORMATS, DEFAULT_ARCHIVE_NAME};
use crate::core::{ConfigProvider, SourceFormat};
use crate::domain::model::QUALIFYING_POOL_SIZE;
use crate::utils::error::{QoError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Http,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub r#type: SourceType,
    pub endpoint: Option<String>,
    pub path: Option<String>,
    #[serde(default)]
    pub format: SourceFormat,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    pub season: Option<u16>,
}

fn default_top_n() -> usize {
    QUALIFYING_POOL_SIZE
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            season: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QoError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SALARY_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QoError::ParseError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;

        let endpoint = self.source.endpoint.as_deref();
        let path = self.source.path.as_deref();
        match self.source.r#type {
            SourceType::Http if endpoint.is_none() => {
                return Err(QoError::MissingConfigError {
                    field: "source.endpoint".to_string(),
                })
            }
            SourceType::File if path.is_none() => {
                return Err(QoError::MissingConfigError {
                    field: "source.path".to_string(),
                })
            }
            _ => {}
        }
        validation::validate_exclusive_source(endpoint, path)?;

        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats(
            "load.output_formats",
            &self.load.output_formats,
            ALLOWED_OUTPUT_FORMATS,
        )?;
        validation::validate_positive_number("ranking.top_n", self.ranking.top_n, 1)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn source_endpoint(&self) -> Option<&str> {
        match self.source.r#type {
            SourceType::Http => self.source.endpoint.as_deref(),
            SourceType::File => None,
        }
    }

    fn input_file(&self) -> Option<&str> {
        match self.source.r#type {
            SourceType::File => self.source.path.as_deref(),
            SourceType::Http => None,
        }
    }

    fn source_format(&self) -> SourceFormat {
        self.source.format
    }

    fn request_headers(&self) -> Option<&HashMap<String, String>> {
        self.source.headers.as_ref()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.source.timeout_seconds
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn compression_filename(&self) -> Option<&str> {
        let compression = self.load.compression.as_ref().filter(|c| c.enabled)?;
        Some(compression.filename.as_deref().unwrap_or(DEFAULT_ARCHIVE_NAME))
    }

    fn top_n(&self) -> usize {
        self.ranking.top_n
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
