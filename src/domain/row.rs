use std::collections::BTreeMap;
use std::sync::Arc;

/// Column names for one file, taken from the first non-blank CSV line.
///
/// Shared across every row of the file, so lookups resolve against a single
/// name set. OpenAddresses files are inconsistent about header casing
/// (`LON` vs `lon`), so name lookup is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    /// Create a header from ordered column names
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Ordered column names
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a column by name, case-insensitive
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One data row of a CSV file: an ordered mapping from header-derived field
/// name to raw string value.
///
/// All rows from one file share the same `Header`; values are always strings
/// and may be empty. Rows shorter than the header (tolerated in flexible
/// parsing mode) are padded with empty values so the field-name set is
/// identical for every row of a file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    header: Arc<Header>,
    values: Vec<String>,
}

impl RawRow {
    /// Create a row, padding or truncating values to the header width
    pub fn new(header: Arc<Header>, mut values: Vec<String>) -> Self {
        values.resize(header.len(), String::new());
        Self { header, values }
    }

    /// Look up a field value by column name, case-insensitive
    pub fn get(&self, name: &str) -> Option<&str> {
        let idx = self.header.index_of(name)?;
        Some(self.values[idx].as_str())
    }

    /// Iterate fields in column order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .names()
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// The shared header for this row's file
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rewrite every value in place, keeping the field-name set and order.
    /// The rewrite function receives the column name and the current value.
    pub fn map_values<F>(self, mut f: F) -> Self
    where
        F: FnMut(&str, String) -> String,
    {
        let header = Arc::clone(&self.header);
        let values = header
            .names()
            .iter()
            .zip(self.values)
            .map(|(name, value)| f(name, value))
            .collect();
        Self { header, values }
    }
}

/// A row whose field values have been normalized by the cleanup rules.
///
/// Same shape as [`RawRow`]: no field is added or removed, only values
/// change. Constructed by a [`crate::rules::CleanupRules`] implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRow {
    row: RawRow,
}

impl CleanedRow {
    pub fn new(row: RawRow) -> Self {
        Self { row }
    }

    /// Look up a field value by column name, case-insensitive
    pub fn get(&self, name: &str) -> Option<&str> {
        self.row.get(name)
    }

    /// Iterate fields in column order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.row.fields()
    }

    pub fn len(&self) -> usize {
        self.row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    /// Consume the row into the source-data payload carried by a record
    pub fn into_source_data(self) -> BTreeMap<String, String> {
        let header = Arc::clone(&self.row.header);
        header
            .names()
            .iter()
            .cloned()
            .zip(self.row.values)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Arc<Header> {
        Arc::new(Header::new(names.iter().map(|n| n.to_string()).collect()))
    }

    fn row(header: &Arc<Header>, values: &[&str]) -> RawRow {
        RawRow::new(
            Arc::clone(header),
            values.iter().map(|v| v.to_string()).collect(),
        )
    }

    #[test]
    fn get_is_case_insensitive() {
        let h = header(&["LON", "LAT", "NUMBER", "STREET"]);
        let r = row(&h, &["-73.1", "40.7", "12", "Main St"]);

        assert_eq!(r.get("lon"), Some("-73.1"));
        assert_eq!(r.get("Lat"), Some("40.7"));
        assert_eq!(r.get("STREET"), Some("Main St"));
        assert_eq!(r.get("missing"), None);
    }

    #[test]
    fn fields_preserve_column_order() {
        let h = header(&["lon", "lat", "number", "street"]);
        let r = row(&h, &["-73.1", "40.7", "12", "Main St"]);

        let names: Vec<&str> = r.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["lon", "lat", "number", "street"]);
    }

    #[test]
    fn short_row_padded_to_header_width() {
        let h = header(&["lon", "lat", "number", "street"]);
        let r = row(&h, &["-73.1", "40.7"]);

        assert_eq!(r.len(), 4);
        assert_eq!(r.get("number"), Some(""));
        assert_eq!(r.get("street"), Some(""));
    }

    #[test]
    fn long_row_truncated_to_header_width() {
        let h = header(&["lon", "lat"]);
        let r = row(&h, &["-73.1", "40.7", "extra"]);

        assert_eq!(r.len(), 2);
    }

    #[test]
    fn rows_share_one_header() {
        let h = header(&["lon", "lat"]);
        let a = row(&h, &["1", "2"]);
        let b = row(&h, &["3", "4"]);

        assert!(Arc::ptr_eq(a.header(), b.header()));
    }

    #[test]
    fn map_values_keeps_shape() {
        let h = header(&["lon", "street"]);
        let r = row(&h, &["-73.1", "main st"]);

        let mapped = r.map_values(|name, value| {
            if name == "street" {
                value.to_uppercase()
            } else {
                value
            }
        });

        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped.get("lon"), Some("-73.1"));
        assert_eq!(mapped.get("street"), Some("MAIN ST"));
    }

    #[test]
    fn into_source_data_retains_all_fields() {
        let h = header(&["lon", "lat", "street"]);
        let r = CleanedRow::new(row(&h, &["-73.1", "40.7", "Main Street"]));

        let data = r.into_source_data();
        assert_eq!(data.len(), 3);
        assert_eq!(data.get("street").map(String::as_str), Some("Main Street"));
    }
}
