//! Row transformer: column-presence check, projection/renaming, phone and
//! DNC normalization, source annotation.
//!
//! Every function here is pure. Phone normalization in particular is total:
//! a cell that cannot be read as a phone number passes through verbatim so a
//! bad value never blocks conversion of the rest of the file.

use serde_json::{Map, Value};

use crate::mapping::{ColumnMapping, SOURCE_COLUMN};

/// Check that every source column of the mapping is present in `headers`.
///
/// Returns the missing column names in mapping order. Nothing else in the
/// pipeline runs if this fails.
pub fn check_columns(headers: &[String], mapping: &ColumnMapping) -> Result<(), Vec<String>> {
    let missing: Vec<String> = mapping
        .source_columns()
        .filter(|col| !headers.iter().any(|h| h == col))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

/// Select exactly the mapped source columns, in mapping order, renamed to
/// their display names. All other columns are dropped.
///
/// Precondition: [`check_columns`] passed, so every source key exists. The
/// parser pads short rows with empty strings, so lookups cannot miss; a
/// `Null` cell here would mean the caller skipped the check.
pub fn project(records: &[Value], mapping: &ColumnMapping) -> Vec<Value> {
    records
        .iter()
        .map(|record| {
            let row = record.as_object();
            let mut projected = Map::new();

            for (src, dst) in mapping.pairs() {
                let cell = row
                    .and_then(|obj| obj.get(src))
                    .cloned()
                    .unwrap_or(Value::Null);
                projected.insert(dst.to_string(), cell);
            }

            Value::Object(projected)
        })
        .collect()
}

/// Normalize a single phone cell to `DDD-DDD-DDDD`.
///
/// The cell is read as an integer-valued number, which strips leading-zero
/// artifacts and spreadsheet float tails like `5551234567.0`. A 10-digit
/// result is dashed; any other length comes back as the bare digit string.
/// Cells that do not parse (letters, empty, already formatted) pass through
/// unchanged.
pub fn format_phone(value: &Value) -> Value {
    match as_integer(value) {
        Some(n) => {
            let digits = n.to_string();
            if digits.len() == 10 {
                Value::String(format!(
                    "{}-{}-{}",
                    &digits[..3],
                    &digits[3..6],
                    &digits[6..]
                ))
            } else {
                Value::String(digits)
            }
        }
        None => value.clone(),
    }
}

/// Read a cell as an integer-valued number, if it is one.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(float_to_integer)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_to_integer))
        }
        _ => None,
    }
}

fn float_to_integer(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Normalize a do-not-call cell to `"DNC"` or `""`.
///
/// Lofty accepts any of yes/DNC/out as the DNC marker; we emit "DNC".
///
/// NOTE: only emptiness/zero-ness of the cell is checked, not its meaning, so
/// a literal "no" or "false" still maps to "DNC". That matches the behavior
/// of the system this replaces and is kept on purpose; see the tests below
/// before "fixing" it.
pub fn format_dnc_status(value: &Value) -> Value {
    let marked = match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    };

    Value::String(if marked { "DNC".to_string() } else { String::new() })
}

/// Apply `f` to the named column of every record, in place. Row order and
/// row count are untouched. Records without the column are left alone.
pub fn apply_to_column<F>(records: &mut [Value], column: &str, f: F)
where
    F: Fn(&Value) -> Value,
{
    for record in records.iter_mut() {
        if let Some(obj) = record.as_object_mut() {
            if let Some(cell) = obj.get(column) {
                let replaced = f(cell);
                obj.insert(column.to_string(), replaced);
            }
        }
    }
}

/// Append the `Source` column with the constant `label` to every record.
///
/// Runs last: existing column order is untouched and `Source` lands at the
/// end. Single-pass by design; reapplying would overwrite the column, so the
/// pipeline never calls this twice.
pub fn annotate_source(records: &mut [Value], label: &str) {
    for record in records.iter_mut() {
        if let Some(obj) = record.as_object_mut() {
            obj.insert(
                SOURCE_COLUMN.to_string(),
                Value::String(label.to_string()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::REAL_INTENT_MAPPING;
    use serde_json::json;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_check_columns_ok() {
        let hs = headers(&[
            "first_name", "last_name", "email_1", "phone_1", "phone_1_dnc",
            "address", "city", "state", "zip_code", "insight", "extra",
        ]);
        assert!(check_columns(&hs, &REAL_INTENT_MAPPING).is_ok());
    }

    #[test]
    fn test_check_columns_reports_missing_in_mapping_order() {
        // zip_code comes before insight in the mapping even though the
        // header list ordering differs
        let hs = headers(&[
            "last_name", "first_name", "email_1", "phone_1", "phone_1_dnc",
            "address", "city",
        ]);
        let missing = check_columns(&hs, &REAL_INTENT_MAPPING).unwrap_err();
        assert_eq!(missing, vec!["state", "zip_code", "insight"]);
    }

    #[test]
    fn test_project_selects_and_renames() {
        let records = vec![json!({
            "first_name": "Alice",
            "last_name": "Smith",
            "email_1": "alice@example.com",
            "phone_1": "5551234567",
            "phone_1_dnc": "",
            "address": "12 Main St",
            "city": "Springfield",
            "state": "IL",
            "zip_code": "62704",
            "insight": "warm lead",
            "ignored_column": "dropped",
        })];

        let projected = project(&records, &REAL_INTENT_MAPPING);
        assert_eq!(projected.len(), 1);

        let obj = projected[0].as_object().unwrap();
        assert_eq!(obj.len(), REAL_INTENT_MAPPING.len());
        assert_eq!(obj["First Name"], "Alice");
        assert_eq!(obj["Mailing Zip Code"], "62704");
        assert!(!obj.contains_key("ignored_column"));

        let keys: Vec<&String> = obj.keys().collect();
        let expected: Vec<&str> = REAL_INTENT_MAPPING.display_columns().collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_project_preserves_row_count() {
        let records = vec![
            json!({"first_name": "A", "last_name": "", "email_1": "", "phone_1": "",
                   "phone_1_dnc": "", "address": "", "city": "", "state": "",
                   "zip_code": "", "insight": ""});
            3
        ];
        assert_eq!(project(&records, &REAL_INTENT_MAPPING).len(), 3);
    }

    #[test]
    fn test_format_phone_ten_digits() {
        assert_eq!(format_phone(&json!("5551234567")), json!("555-123-4567"));
    }

    #[test]
    fn test_format_phone_short_number_unformatted() {
        assert_eq!(format_phone(&json!("123")), json!("123"));
    }

    #[test]
    fn test_format_phone_eleven_digits_unformatted() {
        assert_eq!(format_phone(&json!("15551234567")), json!("15551234567"));
    }

    #[test]
    fn test_format_phone_non_numeric_passthrough() {
        assert_eq!(format_phone(&json!("abc")), json!("abc"));
    }

    #[test]
    fn test_format_phone_empty_passthrough() {
        assert_eq!(format_phone(&json!("")), json!(""));
    }

    #[test]
    fn test_format_phone_already_dashed_passthrough() {
        assert_eq!(format_phone(&json!("555-123-4567")), json!("555-123-4567"));
    }

    #[test]
    fn test_format_phone_float_tail_stripped() {
        // spreadsheet exports render numeric phone columns as floats
        assert_eq!(format_phone(&json!("5551234567.0")), json!("555-123-4567"));
        assert_eq!(format_phone(&json!(5551234567.0)), json!("555-123-4567"));
    }

    #[test]
    fn test_format_phone_fractional_passthrough() {
        assert_eq!(format_phone(&json!("555.25")), json!("555.25"));
    }

    #[test]
    fn test_format_phone_leading_zero_dropped() {
        // int() semantics: "0551234567" is 9 significant digits, not 10
        assert_eq!(format_phone(&json!("0551234567")), json!("551234567"));
    }

    #[test]
    fn test_format_phone_numeric_cell() {
        assert_eq!(format_phone(&json!(5551234567_i64)), json!("555-123-4567"));
    }

    #[test]
    fn test_format_dnc_yes() {
        assert_eq!(format_dnc_status(&json!("yes")), json!("DNC"));
    }

    #[test]
    fn test_format_dnc_empty() {
        assert_eq!(format_dnc_status(&json!("")), json!(""));
    }

    #[test]
    fn test_format_dnc_zero() {
        assert_eq!(format_dnc_status(&json!(0)), json!(""));
        assert_eq!(format_dnc_status(&json!(0.0)), json!(""));
    }

    #[test]
    fn test_format_dnc_null() {
        assert_eq!(format_dnc_status(&Value::Null), json!(""));
    }

    #[test]
    fn test_format_dnc_literal_no_is_still_dnc() {
        // Sharp edge kept on purpose: truthiness, not semantics. A cell
        // containing "no" or "false" is non-empty and therefore DNC.
        assert_eq!(format_dnc_status(&json!("no")), json!("DNC"));
        assert_eq!(format_dnc_status(&json!("false")), json!("DNC"));
    }

    #[test]
    fn test_format_dnc_nonzero_number() {
        assert_eq!(format_dnc_status(&json!(1)), json!("DNC"));
    }

    #[test]
    fn test_apply_to_column_preserves_rows() {
        let mut records = vec![
            json!({"Phone": "5551234567", "Other": "x"}),
            json!({"Phone": "123", "Other": "y"}),
        ];
        apply_to_column(&mut records, "Phone", format_phone);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Phone"], "555-123-4567");
        assert_eq!(records[1]["Phone"], "123");
        assert_eq!(records[0]["Other"], "x");
    }

    #[test]
    fn test_apply_to_column_missing_column_untouched() {
        let mut records = vec![json!({"Other": "x"})];
        apply_to_column(&mut records, "Phone", format_phone);
        assert_eq!(records[0], json!({"Other": "x"}));
    }

    #[test]
    fn test_annotate_source_appends_last() {
        let mut records = vec![json!({"First Name": "Alice"})];
        annotate_source(&mut records, "Real Intent");

        let obj = records[0].as_object().unwrap();
        assert_eq!(obj["Source"], "Real Intent");
        assert_eq!(obj.keys().last().map(String::as_str), Some("Source"));
    }
}
