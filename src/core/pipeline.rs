use crate::core::{calculator, source};
use crate::core::{ConfigProvider, Pipeline, QualifyingOfferReport, RawSalaryRecord, Storage};
use crate::utils::error::{QoError, Result};
use reqwest::Client;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const JSON_FILENAME: &str = "qualifying_offer.json";
pub const CSV_FILENAME: &str = "top_125.csv";

pub struct SalaryPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> SalaryPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    async fn fetch(&self, endpoint: &str) -> Result<Vec<u8>> {
        tracing::debug!("Making API request to: {}", endpoint);
        let mut request = self.client.get(endpoint);

        if let Some(headers) = self.config.request_headers() {
            for (key, value) in headers {
                request = request.header(key, value);
            }
        }
        if let Some(timeout) = self.config.timeout_seconds() {
            request = request.timeout(std::time::Duration::from_secs(timeout));
        }

        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(QoError::HttpStatus {
                status: response.status().as_u16(),
                url: endpoint.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn render_files(&self, report: &QualifyingOfferReport) -> Result<Vec<(&'static str, Vec<u8>)>> {
        let mut files = Vec::new();

        for format in self.config.output_formats() {
            match format.as_str() {
                "json" => files.push((JSON_FILENAME, serde_json::to_vec_pretty(report)?)),
                "csv" => files.push((CSV_FILENAME, top_list_csv(report)?)),
                other => {
                    return Err(QoError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format. Valid formats: json, csv".to_string(),
                    })
                }
            }
        }
        Ok(files)
    }
}

fn top_list_csv(report: &QualifyingOfferReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["rank", "player", "salary"])?;
    for (rank, record) in report.statistics.top_125.iter_ranked() {
        writer.write_record([
            rank.to_string(),
            record.player.clone(),
            record.salary.to_string(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| QoError::IoError(e.into_error()))
}

fn zip_files(files: &[(&str, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in files {
        zip.start_file(*name, SimpleFileOptions::default())?;
        zip.write_all(data)?;
    }
    Ok(zip.finish()?.into_inner())
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SalaryPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawSalaryRecord>> {
        let payload = match (self.config.source_endpoint(), self.config.input_file()) {
            (Some(endpoint), _) => {
                tracing::info!("🌐 Fetching salary table from: {}", endpoint);
                self.fetch(endpoint).await?
            }
            (None, Some(path)) => {
                tracing::info!("📄 Reading salary table from: {}", path);
                tokio::fs::read(path).await?
            }
            (None, None) => {
                return Err(QoError::InputMissing {
                    origin: "no source endpoint or input file configured".to_string(),
                })
            }
        };

        let records = source::decode_payload(&payload, self.config.source_format())?;
        tracing::info!("Fetched {} rows", records.len());
        Ok(records)
    }

    async fn transform(&self, data: Vec<RawSalaryRecord>) -> Result<QualifyingOfferReport> {
        let report = calculator::build_report(&data, self.config.top_n())?;
        let stats = &report.statistics;

        tracing::info!(
            "{} valid salaries, {} invalid",
            stats.valid_salaries,
            stats.invalid_salaries
        );
        if stats.top_125.len() < self.config.top_n() {
            tracing::warn!(
                "Only {} valid salaries, qualifying pool is short of {}",
                stats.top_125.len(),
                self.config.top_n()
            );
        }
        tracing::info!("💰 Qualifying offer: ${:.2}", stats.qualifying_offer);
        tracing::debug!(
            "Median ${:.2}, spread ${:.2}, cutoff {} (${:.0})",
            stats.median_salary,
            stats.salary_spread,
            stats.cutoff_salary.player,
            stats.cutoff_salary.salary
        );

        Ok(report)
    }

    async fn load(&self, report: &QualifyingOfferReport) -> Result<String> {
        let files = self.render_files(report)?;
        let output_dir = self.config.output_path();

        if let Some(archive) = self.config.compression_filename() {
            let zip_data = zip_files(&files)?;
            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(archive, &zip_data).await?;
            return Ok(format!("{}/{}", output_dir, archive));
        }

        for (name, data) in &files {
            tracing::debug!("Writing {} ({} bytes)", name, data.len());
            self.storage.write_file(name, data).await?;
        }

        let first = files.first().map(|(name, _)| *name).unwrap_or(JSON_FILENAME);
        Ok(format!("{}/{}", output_dir, first))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceFormat;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        endpoint: Option<String>,
        formats: Vec<String>,
        archive: Option<String>,
    }

    impl MockConfig {
        fn new(endpoint: Option<String>) -> Self {
            Self {
                endpoint,
                formats: vec!["json".to_string(), "csv".to_string()],
                archive: None,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn source_endpoint(&self) -> Option<&str> {
            self.endpoint.as_deref()
        }

        fn input_file(&self) -> Option<&str> {
            None
        }

        fn source_format(&self) -> SourceFormat {
            SourceFormat::Auto
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn compression_filename(&self) -> Option<&str> {
            self.archive.as_deref()
        }

        fn top_n(&self) -> usize {
            125
        }
    }

    #[tokio::test]
    async fn test_extract_decodes_json_endpoint() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/salaries");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"player": "A", "salary": "$30,000,000"},
                    {"player": "B", "salary": 25000000}
                ]));
        });

        let pipeline = SalaryPipeline::new(
            MockStorage::new(),
            MockConfig::new(Some(server.url("/salaries"))),
        );
        let records = pipeline.extract().await.unwrap();

        api_mock.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].salary, "25000000");
    }

    #[tokio::test]
    async fn test_extract_reports_http_failure() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/down");
            then.status(503);
        });

        let pipeline = SalaryPipeline::new(
            MockStorage::new(),
            MockConfig::new(Some(server.url("/down"))),
        );
        let err = pipeline.extract().await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, QoError::HttpStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_extract_without_source_is_missing_input() {
        let pipeline = SalaryPipeline::new(MockStorage::new(), MockConfig::new(None));
        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, QoError::InputMissing { .. }));
    }

    #[tokio::test]
    async fn test_load_writes_json_and_csv() {
        let storage = MockStorage::new();
        let pipeline = SalaryPipeline::new(storage.clone(), MockConfig::new(None));
        let raw = vec![
            RawSalaryRecord::new("A", "$30,000,000"),
            RawSalaryRecord::new("B", "$25,000,000"),
        ];

        let report = pipeline.transform(raw).await.unwrap();
        let path = pipeline.load(&report).await.unwrap();

        assert_eq!(path, "test_output/qualifying_offer.json");

        let json = storage.get_file(JSON_FILENAME).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["qualifying_offer"], 27_500_000.0);
        assert_eq!(value["highest_salary"]["player"], "A");
        assert_eq!(value["top_125"].as_array().unwrap().len(), 2);

        let csv = String::from_utf8(storage.get_file(CSV_FILENAME).await.unwrap()).unwrap();
        assert!(csv.starts_with("rank,player,salary\n1,A,30000000\n"));
    }

    #[tokio::test]
    async fn test_load_bundles_zip_archive() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new(None);
        config.archive = Some("qualifying_offer.zip".to_string());
        let pipeline = SalaryPipeline::new(storage.clone(), config);

        let report = pipeline
            .transform(vec![RawSalaryRecord::new("A", "1000")])
            .await
            .unwrap();
        let path = pipeline.load(&report).await.unwrap();

        assert!(path.ends_with("qualifying_offer.zip"));
        let zip_data = storage.get_file("qualifying_offer.zip").await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 2);
        assert!(storage.get_file(JSON_FILENAME).await.is_none());
    }
}
