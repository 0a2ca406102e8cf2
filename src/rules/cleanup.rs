use crate::domain::{CleanedRow, RawRow};

/// Field-level normalization applied once per row by the pipeline's cleanup
/// stage. Never drops rows, never changes row count, order, or the
/// field-name set. Pure per-row transformation.
pub trait CleanupRules: Send + Sync {
    fn clean(&self, row: RawRow) -> CleanedRow;
}

/// Trailing street-type abbreviations, expanded only in the final word of a
/// street name so "St Paul St" becomes "St Paul Street"
const STREET_TYPES: [(&str, &str); 14] = [
    ("st", "Street"),
    ("ave", "Avenue"),
    ("av", "Avenue"),
    ("rd", "Road"),
    ("dr", "Drive"),
    ("blvd", "Boulevard"),
    ("ln", "Lane"),
    ("ct", "Court"),
    ("pl", "Place"),
    ("sq", "Square"),
    ("hwy", "Highway"),
    ("pkwy", "Parkway"),
    ("ter", "Terrace"),
    ("cir", "Circle"),
];

/// Directional abbreviations, expanded wherever they appear
const DIRECTIONS: [(&str, &str); 8] = [
    ("n", "North"),
    ("s", "South"),
    ("e", "East"),
    ("w", "West"),
    ("ne", "Northeast"),
    ("nw", "Northwest"),
    ("se", "Southeast"),
    ("sw", "Southwest"),
];

/// Default OpenAddresses cleanup: collapses runs of whitespace in every
/// field (which also trims), and rewrites the street field with title
/// casing and abbreviation expansion.
#[derive(Debug, Clone, Default)]
pub struct OpenAddressesCleanup;

impl CleanupRules for OpenAddressesCleanup {
    fn clean(&self, row: RawRow) -> CleanedRow {
        CleanedRow::new(row.map_values(|name, value| {
            let value = collapse_whitespace(&value);
            if name.eq_ignore_ascii_case("street") {
                clean_street_name(&value)
            } else {
                value
            }
        }))
    }
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn clean_street_name(street: &str) -> String {
    let words: Vec<&str> = street.split(' ').filter(|w| !w.is_empty()).collect();
    let last = words.len().saturating_sub(1);

    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let key = word.trim_end_matches('.').to_ascii_lowercase();
            if i == last
                && let Some((_, expanded)) = STREET_TYPES.iter().find(|(abbr, _)| *abbr == key)
            {
                return (*expanded).to_string();
            }
            if let Some((_, expanded)) = DIRECTIONS.iter().find(|(abbr, _)| *abbr == key) {
                return (*expanded).to_string();
            }
            title_case(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => std::iter::once(first.to_ascii_uppercase())
            .chain(chars.map(|c| c.to_ascii_lowercase()))
            .collect(),
        None => String::new(),
    }
}
