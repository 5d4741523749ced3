use crate::core::{ReportOutcome, ReportRow, Storage};
use crate::utils::error::{EtlError, Result};
use csv::WriterBuilder;
use std::cmp::Ordering;

pub const REPORT_HEADER: [&str; 2] = ["position", "average_performance"];

/// Highest average first. The sort is stable, so ties keep their order.
pub fn sort_rows(rows: &mut [ReportRow]) {
    rows.sort_by(|a, b| {
        b.average_performance
            .partial_cmp(&a.average_performance)
            .unwrap_or(Ordering::Equal)
    });
}

pub fn render_report(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(b',')
        .from_writer(Vec::new());

    writer.write_record(REPORT_HEADER)?;
    for row in rows {
        // adding 0.0 turns -0.0 into 0.0
        let average = format!("{:.2}", row.average_performance + 0.0);
        writer.write_record([row.position.as_str(), average.as_str()])?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

/// Writes the report; failures are logged and reported through the outcome.
pub fn write_report<S: Storage>(
    storage: &S,
    rows: &[ReportRow],
    destination: &str,
) -> ReportOutcome {
    let written = render_report(rows).and_then(|data| {
        tracing::debug!("Writing report ({} bytes) to '{}'", data.len(), destination);
        storage.write_file(destination, &data)
    });

    match written {
        Ok(()) => ReportOutcome {
            success: true,
            rows_written: rows.len(),
        },
        Err(e) => {
            tracing::error!("Failed to write report '{}': {}", destination, e);
            ReportOutcome {
                success: false,
                rows_written: 0,
            }
        }
    }
}
