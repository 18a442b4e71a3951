//! Static column mapping from Real Intent export columns to Lofty import columns.
//!
//! The mapping is fixed for the lifetime of the process. Its order determines
//! the column order of the converted CSV. Transformer functions take the
//! mapping as a parameter so they stay testable without the CLI or HTTP layer.

use once_cell::sync::Lazy;

/// Column name of the phone number in the converted output.
pub const PHONE_COLUMN: &str = "Phone";

/// Column name of the do-not-call flag in the converted output.
pub const DNC_COLUMN: &str = "Phone DNC Status";

/// Column appended to every converted row.
pub const SOURCE_COLUMN: &str = "Source";

/// Value written into the [`SOURCE_COLUMN`] of every converted row.
pub const SOURCE_LABEL: &str = "Real Intent";

/// Ordered mapping from source column names to Lofty display names.
///
/// Order matters: it is the column order of the converted CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    pairs: Vec<(String, String)>,
}

impl ColumnMapping {
    /// Build a mapping from `(source, display)` pairs.
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Source column names, in mapping order.
    pub fn source_columns(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(src, _)| src.as_str())
    }

    /// Display column names, in mapping order.
    pub fn display_columns(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(_, dst)| dst.as_str())
    }

    /// Iterate `(source, display)` pairs in mapping order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(src, dst)| (src.as_str(), dst.as_str()))
    }

    /// Number of mapped columns.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when the mapping has no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Header row of the converted CSV: display names plus the trailing
    /// `Source` column.
    pub fn output_headers(&self) -> Vec<String> {
        let mut headers: Vec<String> =
            self.display_columns().map(str::to_string).collect();
        headers.push(SOURCE_COLUMN.to_string());
        headers
    }
}

/// The Real Intent → Lofty mapping, constructed once at startup.
pub static REAL_INTENT_MAPPING: Lazy<ColumnMapping> = Lazy::new(|| {
    let pairs = [
        ("first_name", "First Name"),
        ("last_name", "Last Name"),
        ("email_1", "Email"),
        ("phone_1", "Phone"),
        ("phone_1_dnc", "Phone DNC Status"),
        ("address", "Mailing Street Address"),
        ("city", "Mailing City"),
        ("state", "Mailing State"),
        ("zip_code", "Mailing Zip Code"),
        // Lofty imports this one as a note; it has to be flagged manually
        // as "Import as Note" in the Lofty import wizard.
        ("insight", "Insight"),
    ];

    ColumnMapping::new(
        pairs
            .iter()
            .map(|(src, dst)| (src.to_string(), dst.to_string()))
            .collect(),
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_has_ten_columns() {
        assert_eq!(REAL_INTENT_MAPPING.len(), 10);
    }

    #[test]
    fn test_mapping_order_is_stable() {
        let sources: Vec<&str> = REAL_INTENT_MAPPING.source_columns().collect();
        assert_eq!(
            sources,
            vec![
                "first_name",
                "last_name",
                "email_1",
                "phone_1",
                "phone_1_dnc",
                "address",
                "city",
                "state",
                "zip_code",
                "insight",
            ]
        );
    }

    #[test]
    fn test_output_headers_end_with_source() {
        let headers = REAL_INTENT_MAPPING.output_headers();
        assert_eq!(headers.len(), 11);
        assert_eq!(headers.first().map(String::as_str), Some("First Name"));
        assert_eq!(headers.last().map(String::as_str), Some(SOURCE_COLUMN));
    }
}
