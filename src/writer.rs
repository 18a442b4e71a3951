//! CSV output collaborator: converted records back to UTF-8 CSV bytes.
//!
//! The header order is driven by the caller-supplied header list, not by
//! record key order, so the output is stable regardless of how individual
//! records were assembled.

use serde_json::Value;
use std::path::Path;

use crate::error::WriteResult;

/// Serialize records to CSV bytes with the given header row.
///
/// Cells are looked up by header name; a record missing a header yields an
/// empty cell. Quoting and escaping follow RFC 4180 via the csv crate.
pub fn records_to_csv(records: &[Value], headers: &[String]) -> WriteResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(headers)?;

    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|header| {
                record
                    .get(header)
                    .map(cell_to_string)
                    .unwrap_or_default()
            })
            .collect();
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())?;
    Ok(bytes)
}

/// Serialize records straight to a file.
pub fn write_csv_file<P: AsRef<Path>>(
    records: &[Value],
    headers: &[String],
    path: P,
) -> WriteResult<()> {
    let bytes = records_to_csv(records, headers)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
