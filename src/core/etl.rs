use crate::core::{Pipeline, QualifyingOfferReport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: QualifyingOfferReport,
    pub output_path: String,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs extract → transform → load once. Every call starts from scratch.
    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("🚀 Starting qualifying offer calculation");

        tracing::info!("Extracting salary data...");
        let raw_data = self.pipeline.extract().await?;
        self.monitor.log_stats("Extract");

        tracing::info!("Calculating from {} rows...", raw_data.len());
        let report = self.pipeline.transform(raw_data).await?;
        self.monitor.log_stats("Transform");

        tracing::info!("Loading results...");
        let output_path = self.pipeline.load(&report).await?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        tracing::info!("📁 Output saved to: {}", output_path);
        Ok(RunOutcome {
            report,
            output_path,
        })
    }
}
