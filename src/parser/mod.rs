//! CSV input collaborator: encoding and delimiter auto-detection, rows to
//! JSON-object records.
//!
//! Real Intent exports are usually UTF-8 with comma delimiters, but files
//! re-saved through spreadsheet tools show up as Windows-1252 or
//! semicolon-delimited often enough that both are detected rather than
//! assumed. No Lofty-specific logic here.

use serde_json::{json, Map, Value};
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Result of parsing with metadata.
#[derive(Debug, Clone)]
pub struct ParsedCsv {
    /// Parsed records as JSON objects, one per data row.
    pub records: Vec<Value>,
    /// Detected or used encoding.
    pub encoding: String,
    /// Detected or used delimiter.
    pub delimiter: char,
    /// Column headers, in file order.
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _, _) = chardet::detect(bytes);

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => Ok(String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).to_string())),
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.to_string())
        }
        "windows-1252" | "cp1252" => {
            Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string())
        }
        _ => Ok(String::from_utf8_lossy(bytes).to_string()),
    }
}

/// Detect the delimiter by counting occurrences in the header line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParsedCsv> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);
    parse_content(&content, delimiter, encoding)
}

/// Parse a CSV file with auto-detection of encoding and delimiter.
pub fn parse_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParsedCsv> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}

/// Parse CSV bytes with an explicit delimiter (encoding still auto-detected).
pub fn parse_bytes(bytes: &[u8], delimiter: char) -> CsvResult<ParsedCsv> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    parse_content(&content, delimiter, encoding)
}

/// Parse a CSV file with an explicit delimiter.
pub fn parse_file<P: AsRef<Path>>(path: P, delimiter: char) -> CsvResult<ParsedCsv> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, delimiter)
}

/// Parse CSV content with an explicit delimiter.
///
/// Each data row becomes a JSON object keyed by the column headers. Short
/// rows are padded with empty strings; extra cells are dropped.
///
/// # Example
/// ```ignore
/// let parsed = parse_content("name,age\nAlice,30", ',', "utf-8".into()).unwrap();
/// assert_eq!(parsed.records[0]["name"], "Alice");
/// ```
pub fn parse_content(content: &str, delimiter: char, encoding: String) -> CsvResult<ParsedCsv> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    // RFC 4180 parsing via the csv crate: a quoted cell may contain the
    // delimiter (addresses like "12 Main St, Apt 4"), which naive splitting
    // would shear apart and shift every following cell over.
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(CsvError::NoHeaders);
    }

    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let mut obj = Map::new();

        for (i, header) in headers.iter().enumerate() {
            let raw_value = row.get(i).unwrap_or("");
            obj.insert(header.clone(), json!(raw_value));
        }

        records.push(Value::Object(obj));
    }

    Ok(ParsedCsv {
        records,
        encoding,
        delimiter,
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let csv = "first_name,phone_1\nAlice,5551234567\nBob,5559876543";
        let parsed = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0]["first_name"], "Alice");
        assert_eq!(parsed.records[0]["phone_1"], "5551234567");
        assert_eq!(parsed.records[1]["first_name"], "Bob");
    }

    #[test]
    fn test_headers_preserved_in_order() {
        let csv = "b,a,c\n1,2,3";
        let parsed = parse_bytes_auto(csv.as_bytes()).unwrap();
        assert_eq!(parsed.headers, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_quoted_values() {
        let csv = "name,address\n\"Alice\",\"12 Main St\"";
        let parsed = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(parsed.records[0]["name"], "Alice");
        assert_eq!(parsed.records[0]["address"], "12 Main St");
    }

    #[test]
    fn test_quoted_cell_containing_delimiter() {
        // RFC 4180: the delimiter inside a quoted cell is data, not a
        // separator; the following cells must not shift over
        let csv = "first_name,address,city\nAlice,\"12 Main St, Apt 4\",Springfield";
        let parsed = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(parsed.records[0]["first_name"], "Alice");
        assert_eq!(parsed.records[0]["address"], "12 Main St, Apt 4");
        assert_eq!(parsed.records[0]["city"], "Springfield");
    }

    #[test]
    fn test_escaped_quotes_in_cell() {
        let csv = "name,note\nAlice,\"she said \"\"hi\"\"\"";
        let parsed = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(parsed.records[0]["note"], "she said \"hi\"");
    }

    #[test]
    fn test_explicit_delimiter_overrides_detection() {
        // unquoted commas in the data would fool auto-detection; an explicit
        // delimiter skips it entirely
        let csv = "name;address\nAlice;12 Main St, Apt 4";
        let parsed = parse_bytes(csv.as_bytes(), ';').unwrap();

        assert_eq!(parsed.delimiter, ';');
        assert_eq!(parsed.records[0]["address"], "12 Main St, Apt 4");
    }

    #[test]
    fn test_parse_file_with_explicit_delimiter() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"a|b\n1|2\n").unwrap();

        let parsed = parse_file(file.path(), '|').unwrap();
        assert_eq!(parsed.records[0]["a"], "1");
        assert_eq!(parsed.records[0]["b"], "2");
    }

    #[test]
    fn test_empty_lines_skipped() {
        let csv = "a,b\n1,2\n\n3,4\n";
        let parsed = parse_bytes_auto(csv.as_bytes()).unwrap();
        assert_eq!(parsed.records.len(), 2);
    }

    #[test]
    fn test_missing_values_become_empty() {
        let csv = "a,b,c\n1,,3\n1";
        let parsed = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(parsed.records[0]["b"], "");
        assert_eq!(parsed.records[1]["b"], "");
        assert_eq!(parsed.records[1]["c"], "");
    }

    #[test]
    fn test_empty_csv_error() {
        let result = parse_bytes_auto(b"");
        assert!(matches!(result, Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_detect_delimiter_pipe() {
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), '|');
    }

    #[test]
    fn test_auto_parse_metadata() {
        let csv = "first_name;last_name\nAlice;Smith";
        let parsed = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(parsed.delimiter, ';');
        assert_eq!(parsed.encoding, "utf-8");
        assert_eq!(parsed.headers, vec!["first_name", "last_name"]);
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert!(decoded.contains("Soci"));
    }
}
