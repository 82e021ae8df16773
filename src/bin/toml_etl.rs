use clap::Parser;
use lexicon_etl::config::toml_config::TomlConfig;
use lexicon_etl::utils::{logger, validation::Validate};
use lexicon_etl::{EtlEngine, EtlError, LexiconPipeline, LocalStorage};
use tokio::task::JoinSet;

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Batch lexicon ETL driven by a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "lexicon-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.exit_code());
        }
    };

    // 初始化日誌：--verbose 優先於設定檔中的 log_level
    let filter = if args.verbose {
        "lexicon_etl=debug,info".to_string()
    } else {
        format!("lexicon_etl={}", config.log_level().unwrap_or("info"))
    };
    if args.json_logs {
        logger::init_json_logger(&filter);
    } else {
        logger::init_with_filter(&filter);
    }

    tracing::info!("🚀 Starting TOML-based lexicon ETL");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 每個來源一個獨立的管道，彼此不共享狀態
    let mut tasks = JoinSet::new();
    for job in config.jobs() {
        let name = job.source.name.clone();
        let pipeline = LexiconPipeline::new(LocalStorage::current_dir(), job);
        let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);
        tasks.spawn(async move { (name, engine.run().await) });
    }

    let mut failures: Vec<(String, EtlError)> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (name, outcome) = joined?;
        match outcome {
            Ok(report) => {
                tracing::info!("✅ {}: {} entries", name, report.entry_count);
                println!("✅ {}: {} entries -> {}", name, report.entry_count, report.output_path);
            }
            Err(e) => {
                tracing::error!(
                    "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
                    name,
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                eprintln!("❌ {}: {}", name, e.user_friendly_message());
                eprintln!("💡 建議: {}", e.recovery_suggestion());
                failures.push((name, e));
            }
        }
    }

    // 以最嚴重的錯誤決定退出碼
    if let Some((_, worst)) = failures.iter().max_by_key(|(_, e)| e.severity()) {
        let exit_code = worst.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    tracing::info!("✅ All sources processed successfully!");
    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    match &config.pipeline.version {
        Some(version) => println!("  Pipeline: {} v{}", config.pipeline.name, version),
        None => println!("  Pipeline: {}", config.pipeline.name),
    }
    println!("  Sources: {} enabled", config.enabled_sources().count());
    println!("  Output: {}", config.output_path());
    println!(
        "  Formats: {}",
        config
            .load
            .output_formats
            .iter()
            .map(|format| format.extension())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Compression: {}", config.compression_enabled());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📚 Sources:");
    for source in &config.sources {
        let status = if source.enabled { "✅" } else { "⏭️ " };
        let header_lines = source
            .header_lines
            .unwrap_or_else(|| source.shape.default_header_lines());
        println!(
            "  {} {} ({}) {} - skips {} header lines",
            status, source.name, source.shape, source.path, header_lines
        );
    }

    println!();
    println!("💾 Output Files:");
    for source in config.enabled_sources() {
        if config.compression_enabled() {
            println!("  {}/{}.zip", config.output_path(), source.name);
        } else {
            for format in &config.load.output_formats {
                println!("  {}/{}.{}", config.output_path(), source.name, format.extension());
            }
        }
    }

    println!();
    println!("✅ Dry run completed - configuration is valid");
}
