//! # Loftyload - Real Intent to Lofty CSV conversion
//!
//! Loftyload converts CSV exports from the Real Intent lead provider into
//! the column-mapped format the Lofty CRM imports: renamed columns, dashed
//! phone numbers, a normalized DNC flag, and a `Source` tag on every row.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Transform  │────▶│  Lofty CSV  │
//! │  (ISO/UTF8) │     │  (auto-enc) │     │ (map+format)│     │   (UTF-8)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use loftyload::{convert_file, REAL_INTENT_MAPPING};
//!
//! let result = convert_file("leads.csv", &REAL_INTENT_MAPPING)?;
//! std::fs::write("converted_file.csv", &result.csv)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`mapping`] - The static Real Intent → Lofty column mapping
//! - [`parser`] - CSV parsing with encoding/delimiter auto-detection
//! - [`convert`] - Row transformer and pipeline
//! - [`writer`] - CSV serialization
//! - [`api`] - HTTP API server

pub mod error;
pub mod mapping;

pub mod parser;

pub mod convert;

pub mod writer;

pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConvertError, CsvError, ServerError, WriteError};

// =============================================================================
// Re-exports - Mapping
// =============================================================================

pub use mapping::{
    ColumnMapping, DNC_COLUMN, PHONE_COLUMN, REAL_INTENT_MAPPING, SOURCE_COLUMN, SOURCE_LABEL,
};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes, parse_bytes_auto, parse_file,
    parse_file_auto, ParsedCsv,
};

// =============================================================================
// Re-exports - Transformer & Pipeline
// =============================================================================

pub use convert::{
    annotate_source, apply_to_column, check_columns, convert_bytes, convert_file, convert_parsed,
    format_dnc_status, format_phone, project, Conversion, CsvInfo,
};

// =============================================================================
// Re-exports - Writer
// =============================================================================

pub use writer::{records_to_csv, write_csv_file};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, ConvertResponse, CsvMetadata};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
