use anyhow::Context;
use clap::Parser;
use perf_report::domain::model::RunSummary;
use perf_report::utils::{logger, validation::Validate};
use perf_report::{CliConfig, EtlEngine, EtlError, LocalStorage, PerformancePipeline, TomlConfig};

const TOP_POSITIONS: usize = 5;

fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    if let Some(path) = config.config.clone() {
        let toml = TomlConfig::from_file(&path)
            .with_context(|| format!("failed to load config file '{}'", path))?;
        config.apply_toml(toml);
    }

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting perf-report");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let verbose = config.verbose;
    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(".");
    let pipeline = PerformancePipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(summary) => print_summary(&summary, verbose),
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn exit_with(e: &EtlError) -> ! {
    tracing::error!("❌ Run failed: {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

fn print_summary(summary: &RunSummary, verbose: bool) {
    println!("\n✅ Report saved to '{}'", summary.output_path);
    println!("📊 Positions in report: {}", summary.rows.len());
    println!("📁 Source rows: {}", summary.source_rows);
    if summary.skipped_rows > 0 {
        println!("⚠️  Skipped rows: {}", summary.skipped_rows);
    }

    println!("\n🏆 TOP {} BY PERFORMANCE:", TOP_POSITIONS);
    println!("{}", "-".repeat(35));
    for (i, row) in summary.rows.iter().take(TOP_POSITIONS).enumerate() {
        println!(
            "{:2}. {:20} {:>8.2} (from {} rows)",
            i + 1,
            row.position,
            row.average_performance,
            row.count
        );
    }

    if verbose {
        match std::fs::read_to_string(&summary.output_path) {
            Ok(content) => {
                println!("\nContents of '{}':", summary.output_path);
                println!("{}", "-".repeat(40));
                println!("{}", content);
            }
            Err(e) => tracing::warn!("Could not re-read report '{}': {}", summary.output_path, e),
        }
    }
}
