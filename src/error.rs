//! Error handling for availability processing.
//!
//! Provides error types with context for identifier resolution, record
//! normalization, and the tabular/JSON file I/O around them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read {path}: {reason}")]
    FileRead { path: PathBuf, reason: String },

    #[error("Record is missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("Identifier not found in identifier table: {composite_id}")]
    UnresolvedIdentifier { composite_id: String },

    #[error("No availability value can be determined: {reason}")]
    MalformedAvailability { reason: String },

    #[error("Cannot resolve a timezone for state {state:?}")]
    TimezoneResolution { state: Option<String> },

    #[error("Invalid valid_at timestamp '{value}': {source}")]
    TimestampParsing {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Record {index} in {path} could not be processed")]
    RecordFailed {
        path: PathBuf,
        index: usize,
        #[source]
        source: Box<ProcessorError>,
    },
}

impl ProcessorError {
    /// Create a malformed availability error
    pub fn malformed_availability(reason: impl Into<String>) -> Self {
        Self::MalformedAvailability {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wrap a per-record failure with the file and position it came from
    pub fn record_failed(path: impl Into<PathBuf>, index: usize, source: ProcessorError) -> Self {
        Self::RecordFailed {
            path: path.into(),
            index,
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
