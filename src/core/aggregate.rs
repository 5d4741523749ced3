use crate::core::{AggregateResult, Record, ReportRow, PERFORMANCE_FIELD, POSITION_FIELD};
use std::collections::HashMap;

struct Group<'a> {
    position: &'a str,
    sum: f64,
    count: usize,
}

impl Group<'_> {
    fn into_row(self) -> ReportRow {
        ReportRow {
            position: self.position.trim().to_string(),
            average_performance: round_to_cents(self.sum / self.count as f64),
            count: self.count,
        }
    }
}

/// Rounds half away from zero to 2 decimal places.
///
/// Magnitudes too large to scale by 100 have no fractional part and are
/// returned as is.
pub fn round_to_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// Returns the position and numeric performance of a usable row.
///
/// Both fields must be present and non-empty, and the performance must
/// parse as a finite number once surrounding whitespace is removed.
pub fn valid_performance(record: &Record) -> Option<(&str, f64)> {
    let position = record.get(POSITION_FIELD).filter(|p| !p.is_empty())?;
    let raw = record.get(PERFORMANCE_FIELD).filter(|p| !p.is_empty())?;
    let value = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some((position, value))
}

/// Groups rows by position and averages their performance.
///
/// Positions are grouped exactly as written and only trimmed on output, so
/// `"Dev "` and `"Dev"` end up as two rows labelled `Dev`. Rows come back in
/// order of each position's first appearance.
pub fn aggregate(records: &[Record]) -> AggregateResult {
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut skipped_rows = 0;

    for record in records {
        let Some((position, value)) = valid_performance(record) else {
            skipped_rows += 1;
            continue;
        };

        let slot = *index.entry(position).or_insert_with(|| {
            groups.push(Group {
                position,
                sum: 0.0,
                count: 0,
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.sum += value;
        group.count += 1;
    }

    if skipped_rows > 0 {
        tracing::warn!("Skipped {} rows with invalid data", skipped_rows);
    }

    AggregateResult {
        rows: groups.into_iter().map(Group::into_row).collect(),
        skipped_rows,
    }
}
