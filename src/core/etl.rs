use crate::core::{Pipeline, RunSummary};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor_enabled: bool,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor_enabled,
        }
    }

    pub fn run(&self) -> Result<RunSummary> {
        let mut monitor = SystemMonitor::new(self.monitor_enabled);
        tracing::info!("Starting performance report");

        // Extract
        tracing::info!("Reading input files...");
        let ingested = self.pipeline.extract()?;
        tracing::info!(
            "Extracted {} records from {} files ({} empty)",
            ingested.records.len(),
            ingested.files_read,
            ingested.files_skipped
        );
        monitor.log_stats("Extract");

        // Transform
        tracing::info!("Aggregating performance...");
        let transformed = self.pipeline.transform(ingested)?;
        tracing::info!(
            "Aggregated {} positions ({} rows skipped)",
            transformed.rows.len(),
            transformed.skipped_rows
        );
        monitor.log_stats("Transform");

        // Load
        tracing::info!("Writing report...");
        let output_path = self.pipeline.load(&transformed)?;
        tracing::info!("Report saved to: {}", output_path);
        monitor.log_stats("Load");
        monitor.log_final_stats();

        Ok(RunSummary {
            output_path,
            rows: transformed.rows,
            source_rows: transformed.source_rows,
            skipped_rows: transformed.skipped_rows,
        })
    }
}
