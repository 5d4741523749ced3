use std::collections::HashMap;

pub const POSITION_FIELD: &str = "position";
pub const PERFORMANCE_FIELD: &str = "performance";
pub const REQUIRED_FIELDS: [&str; 2] = [POSITION_FIELD, PERFORMANCE_FIELD];

/// One data line keyed by the header of the file it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub data: HashMap<String, String>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.data.get(field).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IngestResult {
    pub records: Vec<Record>,
    /// Header of the first non-empty file.
    pub reference_header: Vec<String>,
    /// Every column seen in any file, in first-seen order.
    pub header_union: Vec<String>,
    pub files_read: usize,
    pub files_skipped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub position: String,
    pub average_performance: f64,
    /// Rows behind the average; shown on the console, not written to the report.
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    pub rows: Vec<ReportRow>,
    pub skipped_rows: usize,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub rows: Vec<ReportRow>,
    pub source_rows: usize,
    pub skipped_rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOutcome {
    pub success: bool,
    pub rows_written: usize,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub rows: Vec<ReportRow>,
    pub source_rows: usize,
    pub skipped_rows: usize,
}
