//! Error types for data operations
//!
//! Provides unified error handling for all data loading and parsing operations.

use thiserror::Error;

pub use crate::constants::{MAX_CSV_ROWS, MAX_CSV_SIZE_MB};

/// Errors that can occur during data operations
#[derive(Error, Debug)]
pub enum DataError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parse error: {0}")]
    Csv(String),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File is too large for eager loading
    #[error("File too large: {size_mb}MB (max {max_mb}MB)")]
    TooLarge { size_mb: u64, max_mb: usize },

    /// Too many rows for eager loading
    #[error("Too many rows: {rows} (max {max_rows})")]
    TooManyRows { rows: usize, max_rows: usize },

    /// File is empty
    #[error("Empty file")]
    EmptyFile,

    /// No columns found in data
    #[error("No columns found")]
    NoColumns,

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unsupported file extension
    #[error("Unsupported data file: {0}")]
    Unsupported(String),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;
