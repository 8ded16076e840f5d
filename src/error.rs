//! Error types for econ_index

use thiserror::Error;

/// Result type alias for econ_index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in econ_index operations
///
/// Lookups against either index never produce these: a missing key, path,
/// attribute or year is a `None` (or a legacy sentinel string), not a fault.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Reasons a single input row is dropped during ingestion
///
/// These are collected into the ingest report; processing continues with
/// the next row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 5 columns, found {0}")]
    MissingColumns(usize),

    #[error("empty {0}")]
    EmptyIdentifier(&'static str),

    #[error("unknown state code {0:?}")]
    UnknownStateCode(String),

    #[error("empty attribute")]
    EmptyAttribute,

    #[error("attribute {0:?} is not of the form name_YYYY")]
    MalformedAttribute(String),

    #[error("invalid value {0:?}")]
    InvalidValue(String),

    #[error("row is not valid UTF-8")]
    InvalidEncoding,
}
