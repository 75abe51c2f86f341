use crate::domain::model::{QualifyingOfferReport, RawSalaryRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// How a fetched payload should be decoded into rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SourceFormat {
    #[default]
    Auto,
    Html,
    Csv,
    Json,
}

pub trait ConfigProvider: Send + Sync {
    fn source_endpoint(&self) -> Option<&str>;
    fn input_file(&self) -> Option<&str>;
    fn source_format(&self) -> SourceFormat;
    fn request_headers(&self) -> Option<&HashMap<String, String>> {
        None
    }
    fn timeout_seconds(&self) -> Option<u64> {
        None
    }
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    /// Archive name when outputs are zipped, `None` when written as plain files.
    fn compression_filename(&self) -> Option<&str>;
    fn top_n(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawSalaryRecord>>;
    async fn transform(&self, data: Vec<RawSalaryRecord>) -> Result<QualifyingOfferReport>;
    async fn load(&self, report: &QualifyingOfferReport) -> Result<String>;
}
