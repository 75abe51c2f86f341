use clap::Parser;
use qualifying_offer::utils::{display, logger, validation::Validate};
use qualifying_offer::{CliConfig, EtlEngine, LocalStorage, SalaryPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting qualifying-offer CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    let show_top = config.show_top;
    let queries = config.percentile.clone();

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = SalaryPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(outcome) => {
            display::print_summary(&outcome.report, show_top);
            for query in &queries {
                display::print_percentile(&outcome.report, query);
            }
            println!();
            println!("📁 Output saved to: {}", outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Calculation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}
