use clap::Parser;
use qualifying_offer::core::ConfigProvider;
use qualifying_offer::utils::{display, logger, validation::Validate};
use qualifying_offer::{EtlEngine, LocalStorage, SalaryPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-qo")]
#[command(about = "Qualifying offer calculation driven by a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "qualifying-offer.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the pool size from config
    #[arg(long)]
    top_n: Option<usize>,

    /// Salary to place against the pool (repeatable)
    #[arg(long)]
    percentile: Vec<String>,

    /// Show what would be processed without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(top_n) = args.top_n {
        config.ranking.top_n = top_n;
        tracing::info!("🔧 Pool size overridden to: {}", top_n);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be fetched or written");
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = SalaryPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(outcome) => {
            display::print_summary(&outcome.report, 25);
            for query in &args.percentile {
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
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name, config.pipeline.version
    );
    if let Some(description) = &config.pipeline.description {
        println!("  Description: {}", description);
    }
    match (config.source_endpoint(), config.input_file()) {
        (Some(endpoint), _) => println!("  Source: {} ({:?})", endpoint, config.source_format()),
        (None, Some(path)) => println!("  Source file: {} ({:?})", path, config.source_format()),
        (None, None) => println!("  Source: <none>"),
    }
    if let Some(season) = config.ranking.season {
        println!("  Season: {}", season);
    }
    println!("  Pool size: {}", config.top_n());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    if let Some(archive) = config.compression_filename() {
        println!("  Compression: {} (ZIP)", archive);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
