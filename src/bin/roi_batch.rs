use clap::Parser;
use roi_engine::config::toml_config::{OutputConfig, TomlConfig};
use roi_engine::utils::format::format_months;
use roi_engine::utils::{logger, validation::Validate};
use roi_engine::{format_currency, BatchRunner, LocalStorage, RoiEngine};

#[derive(Parser)]
#[command(name = "roi-batch")]
#[command(about = "Batch ROI report from a TOML scenario file")]
struct Args {
    /// Path to TOML scenario file
    #[arg(short, long, default_value = "roi-scenarios.toml")]
    config: String,

    /// Override the output directory from config
    #[arg(short, long)]
    output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON lines instead of compact text
    #[arg(long)]
    json_logs: bool,

    /// Print the report without writing any files
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based ROI batch");
    tracing::info!("📁 Loading scenarios from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(path) = &args.output {
        match config.output.as_mut() {
            Some(output) => output.path = path.clone(),
            None => {
                config.output = Some(OutputConfig {
                    path: path.clone(),
                    formats: vec!["csv".to_string()],
                    strict: None,
                })
            }
        }
        tracing::info!("🔧 Output path overridden to: {}", path);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    let engine = RoiEngine::from_provider(&config)?;
    let output_path = config.output_path().unwrap_or(".").to_string();
    let runner = BatchRunner::new(engine, LocalStorage::new(output_path.clone()));

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        let report = runner.build_report(&config)?;
        print!("{}", report.to_table());
        return Ok(());
    }

    match runner.run(&config) {
        Ok((report, written)) => {
            print!("{}", report.to_table());
            if let Some((name, months)) = &report.summary.fastest_payback {
                println!("⚡ Fastest payback: {} ({})", name, format_months(*months));
            }
            println!("✅ ROI batch completed successfully!");
            for file in written {
                println!("📁 {}/{}", output_path, file);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ ROI batch failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let model = config.roi_model();

    println!("📋 Configuration Summary:");
    match &config.report.version {
        Some(version) => println!("  Report: {} v{}", config.report.name, version),
        None => println!("  Report: {}", config.report.name),
    }
    println!("  Scenarios: {}", config.scenarios.len());
    println!(
        "  Model: downtime {:.0}%, quality {:.0}%, {} per line",
        model.downtime_recovery * 100.0,
        model.quality_recovery * 100.0,
        format_currency(model.implementation_cost_per_line)
    );
    println!("  Output: {}", config.output_path().unwrap_or("."));
    if let Some(output) = &config.output {
        println!("  Formats: {}", output.formats.join(", "));
    }
    println!("  Strict: {}", config.is_strict());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
