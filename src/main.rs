use clap::Parser;
use roi_engine::utils::format::{format_currency, format_hours, format_months, format_percent};
use roi_engine::utils::{logger, validation::Validate};
use roi_engine::{CliConfig, RoiEngine, RoiError, RoiInputs, RoiResults};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting roi-engine CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Input validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    match run(&config) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!(
                "❌ ROI calculation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

fn run(config: &CliConfig) -> Result<(), RoiError> {
    let engine = RoiEngine::from_provider(config)?;
    let inputs = config.inputs();
    let results = engine.compute_checked(&inputs)?;

    if config.json {
        let output = serde_json::json!({
            "inputs": inputs,
            "results": results,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&inputs, &results);
    }

    Ok(())
}

fn print_summary(inputs: &RoiInputs, results: &RoiResults) {
    println!("📋 ROI Projection");
    println!("  Production lines:  {}", inputs.production_lines);
    println!("  Downtime:          {} / month", format_hours(inputs.downtime_hours));
    println!("  Hourly cost:       {}", format_currency(inputs.hourly_cost));
    println!("  Defect rate:       {}", format_percent(inputs.defect_rate));
    println!();
    println!("  Downtime savings:  {}", format_currency(results.downtime_savings));
    println!("  Quality savings:   {}", format_currency(results.quality_savings));
    println!("  Total annual:      {}", format_currency(results.total_annual_savings));
    if results.roi_months > 0 {
        println!("  Payback period:    {}", format_months(results.roi_months));
    } else {
        println!("  Payback period:    n/a (no projected savings)");
    }
}
