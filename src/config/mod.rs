pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_required_field, validate_run_paths, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "perf-report")]
#[command(about = "Average performance per position across CSV files")]
pub struct CliConfig {
    /// One or more CSV files to merge
    #[arg(long, num_args = 1.., required_unless_present = "config")]
    pub files: Vec<String>,

    /// Output CSV file for the report
    #[arg(long, required_unless_present = "config")]
    pub report: Option<String>,

    /// TOML configuration file; explicit flags take precedence
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output and print the written report")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Fills in whatever was not given on the command line.
    pub fn apply_toml(&mut self, toml: TomlConfig) {
        self.verbose |= toml.verbose();
        self.json_logs |= toml.json_logs();
        self.monitor |= toml.monitoring_enabled();

        if self.files.is_empty() {
            self.files = toml.input.files;
        }
        if self.report.is_none() {
            self.report = Some(toml.report.path);
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_files(&self) -> &[String] {
        &self.files
    }

    fn report_path(&self) -> &str {
        self.report.as_deref().unwrap_or_default()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let report = validate_required_field("report", &self.report)?;
        validate_run_paths(&self.files, report)
    }
}
