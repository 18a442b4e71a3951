//! REST API types for frontend integration.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::convert::Conversion;

/// Metadata returned alongside a successful conversion (in the
/// `X-Conversion-Info` sidecar or the JSON variant of the response).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    /// Unique job identifier.
    pub job_id: String,

    /// Status: "ready" or "error".
    pub status: String,

    /// Suggested download file name.
    pub file_name: String,

    /// Number of converted rows.
    pub row_count: usize,

    /// Output column headers.
    pub columns: Vec<String>,

    /// Input CSV metadata.
    pub csv_info: CsvMetadata,
}

/// Input CSV metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvMetadata {
    pub encoding: String,
    pub delimiter: String,
    pub row_count: usize,
    pub columns: Vec<String>,
}

impl ConvertResponse {
    pub fn from_conversion(conversion: &Conversion) -> Self {
        Self {
            job_id: Uuid::new_v4().to_string(),
            status: "ready".to_string(),
            file_name: "converted_file.csv".to_string(),
            row_count: conversion.records.len(),
            columns: conversion.headers.clone(),
            csv_info: CsvMetadata {
                encoding: conversion.csv_info.encoding.clone(),
                delimiter: conversion.csv_info.delimiter.to_string(),
                row_count: conversion.csv_info.row_count,
                columns: conversion.csv_info.headers.clone(),
            },
        }
    }
}

/// Create an error response body.
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::CsvInfo;

    #[test]
    fn test_response_from_conversion() {
        let conversion = Conversion {
            records: vec![json!({"First Name": "Alice", "Source": "Real Intent"})],
            headers: vec!["First Name".to_string(), "Source".to_string()],
            csv: b"First Name,Source\nAlice,Real Intent\n".to_vec(),
            csv_info: CsvInfo {
                encoding: "utf-8".to_string(),
                delimiter: ',',
                headers: vec!["first_name".to_string()],
                row_count: 1,
            },
        };

        let response = ConvertResponse::from_conversion(&conversion);
        assert_eq!(response.status, "ready");
        assert_eq!(response.row_count, 1);
        assert_eq!(response.file_name, "converted_file.csv");
        assert_eq!(response.csv_info.delimiter, ",");
    }

    #[test]
    fn test_error_response_shape() {
        let body = error_response("boom");
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "boom");
        assert!(body["jobId"].is_string());
    }
}
