use crate::core::aggregate::aggregate;
use crate::core::ingest::ingest;
use crate::core::report::{sort_rows, write_report};
use crate::core::{
    ConfigProvider, IngestResult, Pipeline, Storage, TransformResult, REQUIRED_FIELDS,
};
use crate::utils::error::{EtlError, Result};
use std::path::PathBuf;

/// Fails unless every required field appears among `columns`.
pub fn check_required_columns(columns: &[String]) -> Result<()> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !columns.iter().any(|column| column == field))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EtlError::MissingRequiredColumnsError {
            missing,
            found: columns.to_vec(),
        })
    }
}

pub struct PerformancePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PerformancePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for PerformancePipeline<S, C> {
    fn extract(&self) -> Result<IngestResult> {
        let ingested = ingest(&self.storage, self.config.input_files())?;
        check_required_columns(&ingested.header_union)?;
        Ok(ingested)
    }

    fn transform(&self, data: IngestResult) -> Result<TransformResult> {
        let aggregated = aggregate(&data.records);

        if aggregated.rows.is_empty() {
            return Err(EtlError::NoValidDataError {
                skipped: aggregated.skipped_rows,
            });
        }

        let mut rows = aggregated.rows;
        sort_rows(&mut rows);

        Ok(TransformResult {
            rows,
            source_rows: data.records.len(),
            skipped_rows: aggregated.skipped_rows,
        })
    }

    fn load(&self, result: &TransformResult) -> Result<String> {
        let destination = self.config.report_path();
        let outcome = write_report(&self.storage, &result.rows, destination);

        if !outcome.success {
            return Err(EtlError::WriteError {
                path: PathBuf::from(destination),
            });
        }

        tracing::debug!(
            "Wrote {} positions to '{}'",
            outcome.rows_written,
            destination
        );
        Ok(destination.to_string())
    }
}
