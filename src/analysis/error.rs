use crate::types::field::Field;
use std::path::PathBuf;
use thiserror::Error;

/// Raised while turning raw readings into a [`crate::Dataset`].
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Input readings must be a sequence, got {0}")]
    NotASequence(&'static str),

    #[error("Reading at index {index} is not a mapping, got {found}")]
    NotAMapping { index: usize, found: &'static str },

    #[error("Reading at index {index} has no 'city' field")]
    MissingCity { index: usize },

    #[error("Reading at index {index} has a non-text 'city' field")]
    InvalidCity { index: usize },
}

/// Raised while cleaning a dataset or summarizing it.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("Dataset has {rows} rows but none of the columns temp, humidity, pressure")]
    MissingSchema { rows: usize },

    #[error("Cannot calculate statistics: dataset is empty after cleaning")]
    EmptyDataset,

    #[error("Plausibility range for '{field}' is invalid: [{min}, {max}]")]
    InvalidBounds { field: Field, min: f64, max: f64 },
}

/// Raised while persisting or reading back a summary file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create temporary file next to '{0}'")]
    TempFileCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode summary for '{0}'")]
    Encode(PathBuf, #[source] serde_json::Error),

    #[error("I/O error writing summary file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to move summary into place at '{0}'")]
    Persist(PathBuf, #[source] std::io::Error),

    #[error("Failed to read summary file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to decode summary file '{0}'")]
    Decode(PathBuf, #[source] serde_json::Error),
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
