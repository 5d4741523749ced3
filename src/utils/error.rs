use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Input file not found: {path}")]
    MissingFileError { path: PathBuf },

    #[error("Failed to read file {path}: {reason}")]
    FileReadError { path: PathBuf, reason: String },

    #[error("Required columns missing: {missing:?} (found: {found:?})")]
    MissingRequiredColumnsError {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("No data rows found in any input file")]
    NoDataError,

    #[error("No valid rows to report ({skipped} rows skipped)")]
    NoValidDataError { skipped: usize },

    #[error("Failed to write report to {path}")]
    WriteError { path: PathBuf },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Output,
    Configuration,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::MissingFileError { .. }
            | EtlError::FileReadError { .. }
            | EtlError::CsvError(_)
            | EtlError::IoError(_) => ErrorCategory::Input,
            EtlError::MissingRequiredColumnsError { .. }
            | EtlError::NoDataError
            | EtlError::NoValidDataError { .. } => ErrorCategory::Data,
            EtlError::WriteError { .. } => ErrorCategory::Output,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Short message for the console, without internal detail.
    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::MissingFileError { path } => {
                format!("File '{}' was not found", path.display())
            }
            EtlError::FileReadError { path, .. } => {
                format!("Could not read file '{}'", path.display())
            }
            EtlError::MissingRequiredColumnsError { missing, found } => format!(
                "Input files are missing columns: {} (found: {})",
                missing.join(", "),
                found.join(", ")
            ),
            EtlError::NoDataError => "None of the input files contain data".to_string(),
            EtlError::NoValidDataError { .. } => "No data available for the report".to_string(),
            EtlError::WriteError { path } => {
                format!("Could not write report '{}'", path.display())
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::MissingFileError { .. } => "Check the paths passed with --files",
            EtlError::FileReadError { .. } | EtlError::CsvError(_) | EtlError::IoError(_) => {
                "Make sure the file is readable, UTF-8 encoded, comma or semicolon separated"
            }
            EtlError::MissingRequiredColumnsError { .. } => {
                "Add 'position' and 'performance' columns to the header row"
            }
            EtlError::NoDataError => "Provide at least one non-empty input file",
            EtlError::NoValidDataError { .. } => {
                "Check that 'performance' holds numbers and 'position' is filled in"
            }
            EtlError::WriteError { .. } => {
                "Check that the report directory exists and is writable"
            }
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
