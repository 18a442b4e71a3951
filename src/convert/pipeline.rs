//! High-level conversion pipeline: CSV bytes in, Lofty-ready CSV bytes out.
//!
//! Combines the collaborators in a fixed order: parse, column check,
//! projection, phone normalization, DNC normalization, source annotation,
//! serialization. The column check gates everything; if it fails no output
//! is produced.
//!
//! # Example
//!
//! ```rust,ignore
//! use loftyload::{convert_bytes, REAL_INTENT_MAPPING};
//!
//! let result = convert_bytes(csv_bytes, &REAL_INTENT_MAPPING)?;
//! std::fs::write("converted_file.csv", &result.csv)?;
//! ```

use serde_json::Value;
use std::path::Path;

use crate::api::logs::{log_info, log_success};
use crate::error::{ConvertError, ConvertResult};
use crate::mapping::{ColumnMapping, DNC_COLUMN, PHONE_COLUMN, SOURCE_LABEL};
use crate::parser::{parse_bytes_auto, parse_file_auto, ParsedCsv};
use crate::writer::records_to_csv;

use super::transformer::{
    annotate_source, apply_to_column, check_columns, format_dnc_status, format_phone, project,
};

/// Result of a complete conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Converted records, one per input row, columns in mapping order plus
    /// the trailing `Source` column.
    pub records: Vec<Value>,

    /// Output header row.
    pub headers: Vec<String>,

    /// Serialized UTF-8 CSV, ready for download.
    pub csv: Vec<u8>,

    /// Input parsing metadata.
    pub csv_info: CsvInfo,
}

/// Input CSV metadata.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Convert a Real Intent CSV file.
pub fn convert_file<P: AsRef<Path>>(
    path: P,
    mapping: &ColumnMapping,
) -> ConvertResult<Conversion> {
    let parsed = parse_file_auto(path)?;
    convert_parsed(parsed, mapping)
}

/// Convert Real Intent CSV bytes.
///
/// Same as [`convert_file`] but takes the raw upload instead of a path.
pub fn convert_bytes(bytes: &[u8], mapping: &ColumnMapping) -> ConvertResult<Conversion> {
    let parsed = parse_bytes_auto(bytes)?;
    convert_parsed(parsed, mapping)
}

/// Convert already-parsed CSV data.
pub fn convert_parsed(parsed: ParsedCsv, mapping: &ColumnMapping) -> ConvertResult<Conversion> {
    log_info("Reading CSV...");
    log_success(format!("Detected encoding: {}", parsed.encoding));
    log_success(format!(
        "Detected delimiter: '{}'",
        format_delimiter(parsed.delimiter)
    ));
    log_success(format!("Read {} rows", parsed.records.len()));

    let csv_info = CsvInfo {
        encoding: parsed.encoding.clone(),
        delimiter: parsed.delimiter,
        headers: parsed.headers.clone(),
        row_count: parsed.records.len(),
    };

    log_info("Checking required columns...");
    check_columns(&parsed.headers, mapping).map_err(ConvertError::MissingColumns)?;
    log_success(format!("All {} required columns present", mapping.len()));

    let records = transform_records(parsed.records, mapping);

    let headers = mapping.output_headers();
    let csv = records_to_csv(&records, &headers)?;
    log_success(format!(
        "Converted {} rows, {} columns",
        records.len(),
        headers.len()
    ));

    Ok(Conversion {
        records,
        headers,
        csv,
        csv_info,
    })
}

/// Core row transformation, after the column check has passed.
///
/// Stage order is fixed: projection, phone, DNC, source annotation.
fn transform_records(records: Vec<Value>, mapping: &ColumnMapping) -> Vec<Value> {
    let mut records = project(&records, mapping);

    apply_to_column(&mut records, PHONE_COLUMN, format_phone);
    apply_to_column(&mut records, DNC_COLUMN, format_dnc_status);

    annotate_source(&mut records, SOURCE_LABEL);

    records
}

fn format_delimiter(d: char) -> &'static str {
    match d {
        ',' => ",",
        ';' => ";",
        '\t' => "TAB",
        '|' => "|",
        _ => "?",
    }
}
