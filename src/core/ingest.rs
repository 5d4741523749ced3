use crate::core::{Delimiter, IngestResult, Record, Storage, REQUIRED_FIELDS};
use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Number of leading bytes inspected to pick the delimiter.
pub const DELIMITER_SAMPLE_SIZE: usize = 1024;

const UTF8_BOM: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    pub header: Vec<String>,
    pub delimiter: Delimiter,
    pub records: Vec<Record>,
}

/// Result of reading one source file. A zero-byte file is skipped, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Skipped,
    Parsed(ParsedFile),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMatch {
    Same,
    Different { missing_required: Vec<&'static str> },
}

/// Comma if the sample contains one anywhere, semicolon otherwise.
///
/// Only the first [`DELIMITER_SAMPLE_SIZE`] bytes are looked at, so a file
/// whose first comma comes later is read as semicolon-separated.
pub fn detect_delimiter(content: &[u8]) -> Delimiter {
    let sample = &content[..content.len().min(DELIMITER_SAMPLE_SIZE)];
    if sample.contains(&b',') {
        Delimiter::Comma
    } else {
        Delimiter::Semicolon
    }
}

/// Compares two headers as unordered sets.
pub fn compare_headers(reference: &[String], header: &[String]) -> HeaderMatch {
    let expected: HashSet<&str> = reference.iter().map(String::as_str).collect();
    let current: HashSet<&str> = header.iter().map(String::as_str).collect();

    if expected == current {
        return HeaderMatch::Same;
    }

    let missing_required = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !current.contains(field))
        .collect();

    HeaderMatch::Different { missing_required }
}

pub fn parse_delimited(path: &str, content: &[u8]) -> Result<ParsedFile> {
    let delimiter = detect_delimiter(content);

    let text = std::str::from_utf8(content)
        .map_err(|e| read_error(path, format!("invalid UTF-8: {}", e)))?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| read_error(path, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| read_error(path, e))?;
        records.push(
            header
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect::<Record>(),
        );
    }

    Ok(ParsedFile {
        header,
        delimiter,
        records,
    })
}

pub fn read_source<S: Storage>(storage: &S, path: &str) -> Result<FileOutcome> {
    let size = storage
        .file_size(path)
        .map_err(|e| read_error(path, e))?
        .ok_or_else(|| EtlError::MissingFileError {
            path: PathBuf::from(path),
        })?;

    if size == 0 {
        return Ok(FileOutcome::Skipped);
    }

    let content = storage.read_file(path).map_err(|e| read_error(path, e))?;
    let parsed = parse_delimited(path, &content)?;
    tracing::debug!(
        "Parsed '{}' with {:?} delimiter: {} rows",
        path,
        parsed.delimiter,
        parsed.records.len()
    );

    Ok(FileOutcome::Parsed(parsed))
}

/// Reads every file in order and concatenates their rows.
///
/// Any missing or unreadable file aborts the whole run. Empty files are
/// skipped; if nothing is left afterwards the call fails with
/// [`EtlError::NoDataError`].
pub fn ingest<S: Storage>(storage: &S, file_paths: &[String]) -> Result<IngestResult> {
    let total = file_paths.len();
    let mut result = IngestResult::default();
    let mut seen_columns: HashSet<String> = HashSet::new();

    for (i, path) in file_paths.iter().enumerate() {
        let index = i + 1;

        let parsed = match read_source(storage, path)? {
            FileOutcome::Skipped => {
                tracing::info!("File {}/{}: '{}' is empty, skipping", index, total, path);
                result.files_skipped += 1;
                continue;
            }
            FileOutcome::Parsed(parsed) => parsed,
        };

        if result.files_read == 0 {
            tracing::info!(
                "File {}/{}: '{}' - headers: {:?}",
                index,
                total,
                path,
                parsed.header
            );
            result.reference_header = parsed.header.clone();
        } else if let HeaderMatch::Different { missing_required } =
            compare_headers(&result.reference_header, &parsed.header)
        {
            if missing_required.is_empty() {
                tracing::warn!("File {}/{}: '{}' - different headers", index, total, path);
            } else {
                tracing::warn!(
                    "File {}/{}: '{}' - different headers, missing columns: {:?}",
                    index,
                    total,
                    path,
                    missing_required
                );
            }
        }

        for column in &parsed.header {
            if seen_columns.insert(column.clone()) {
                result.header_union.push(column.clone());
            }
        }

        let added = parsed.records.len();
        result.records.extend(parsed.records);
        result.files_read += 1;
        tracing::info!("Added {} rows from '{}'", added, file_name(path));
    }

    if result.records.is_empty() {
        return Err(EtlError::NoDataError);
    }

    tracing::info!(
        "Combined {} rows from {} files",
        result.records.len(),
        total
    );

    Ok(result)
}

fn read_error(path: &str, reason: impl Display) -> EtlError {
    EtlError::FileReadError {
        path: PathBuf::from(path),
        reason: reason.to_string(),
    }
}

fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}
