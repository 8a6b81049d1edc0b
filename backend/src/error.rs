//! Error types for the chest generation pipeline.
//!
//! - [`CsvError`] - CSV reading and decoding errors
//! - [`LookupError`] - Arena / text table loading errors
//! - [`TransformError`] - Row-level mapping errors
//! - [`ValidationError`] - Output schema errors
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Conversion into [`PipelineError`] is automatic via `From`, so `?` works
//! across module boundaries.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading the chest export.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bytes could not be decoded.
    #[error("Failed to decode CSV as {0}")]
    Encoding(String),

    /// Malformed CSV structure.
    #[error("Invalid CSV at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// A required header is missing.
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        CsvError::Parse {
            line,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Lookup Errors
// =============================================================================

/// Errors while loading reference tables.
#[derive(Debug, Error)]
pub enum LookupError {
    /// File could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Arena file is not a JSON array of arenas.
    #[error("Invalid arena data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Text table could not be parsed.
    #[error("Invalid text table: {0}")]
    Csv(#[from] CsvError),
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// A row that cannot be turned into a chest record.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Value does not fit the record field.
    #[error("Row {row}: invalid value for '{field}': {message}")]
    InvalidValue {
        row: usize,
        field: String,
        message: String,
    },

    /// A derived value does not fit a finite number.
    #[error("derived '{field}' is out of range")]
    OutOfRange { field: String },
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors from schema validation of emitted records.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Embedded schema is unusable.
    #[error("Invalid schema: {0}")]
    Schema(String),

    /// One or more records failed validation.
    #[error("{count} record(s) failed validation")]
    Invalid {
        count: usize,
        errors: Vec<(usize, Vec<String>)>,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration is incomplete.
    #[error("Missing configuration: {0}")]
    Config(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type CsvResult<T> = Result<T, CsvError>;

pub type LookupResult<T> = Result<T, LookupError>;

pub type TransformResult<T> = Result<T, TransformError>;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::EmptyFile;
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("empty"));

        let lookup_err: LookupError = CsvError::MissingColumn("TID".into()).into();
        let pipeline_err: PipelineError = lookup_err.into();
        assert!(pipeline_err.to_string().contains("TID"));
    }

    #[test]
    fn test_invalid_value_format() {
        let err = TransformError::InvalidValue {
            row: 4,
            field: "random_spells".into(),
            message: "expected a number".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Row 4"));
        assert!(msg.contains("random_spells"));
    }

    #[test]
    fn test_out_of_range_format() {
        let err = TransformError::OutOfRange {
            field: "min_gold".into(),
        };
        assert!(err.to_string().contains("min_gold"));
    }
}
