//! Error types for the Loftyload conversion pipeline.
//!
//! - [`CsvError`] - CSV parsing errors (input collaborator)
//! - [`ConvertError`] - conversion errors (missing required columns)
//! - [`WriteError`] - CSV serialization errors (output collaborator)
//! - [`ServerError`] - HTTP server errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Unparsable phone values are deliberately NOT an error kind: they fall
//! back to the original cell value inside the transformer.

use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors during CSV parsing.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode bytes with the detected encoding.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Invalid CSV format.
    #[error("Invalid CSV format: {0}")]
    Parse(#[from] csv::Error),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Conversion Errors
// =============================================================================

/// Errors during Real Intent → Lofty conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// One or more required source columns are absent from the upload.
    /// The message wording matches what the user sees in place of a download.
    #[error("The uploaded file does not contain the required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// CSV parsing error from the input collaborator.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// CSV serialization error from the output collaborator.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

// =============================================================================
// CSV Writing Errors
// =============================================================================

/// Errors during CSV serialization.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The csv writer failed.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the output file failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Conversion error.
    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV parsing operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Result type for CSV writing operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
