use std::collections::BTreeSet;

use thiserror::Error;

// ---------------------------------------------------------------------------
// UniversityRecord – one row of the rankings table
// ---------------------------------------------------------------------------

/// A single university (one row of the source table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniversityRecord {
    pub name: String,
    /// World rank, 1-based. X-axis position and sort key.
    pub rank: u32,
    /// Enrolled student count. Y-axis position and summand for totals.
    pub students: u32,
    /// Region label, the color and filter key.
    pub region: String,
    /// Free-text location, display-only.
    pub location: String,
}

/// Legend order is declared, not data-driven, so entries keep their
/// position across renders. Regions found in the data but not listed
/// here are appended after, sorted.
pub const DECLARED_REGIONS: [&str; 3] = ["North America", "Europe", "Asia"];

// ---------------------------------------------------------------------------
// RankingDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset plus the legend's region order.
#[derive(Debug, Clone)]
pub struct RankingDataset {
    /// All universities (rows), in file order.
    pub records: Vec<UniversityRecord>,
    /// Declared regions first, then any extras from the data, sorted.
    pub regions: Vec<String>,
}

impl RankingDataset {
    /// Build the legend region order from the loaded records.
    pub fn from_records(records: Vec<UniversityRecord>) -> Self {
        let extras: BTreeSet<&str> = records
            .iter()
            .map(|r| r.region.as_str())
            .filter(|r| !DECLARED_REGIONS.contains(r))
            .collect();

        let mut regions: Vec<String> =
            DECLARED_REGIONS.iter().map(|r| r.to_string()).collect();
        regions.extend(extras.into_iter().map(String::from));

        RankingDataset { records, regions }
    }

    /// Number of universities.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Numeric field coercion
// ---------------------------------------------------------------------------

/// A numeric field that failed best-effort coercion.
#[derive(Debug, Error)]
#[error("field '{field}': '{value}' is not a non-negative integer")]
pub struct FieldError {
    pub field: &'static str,
    pub value: String,
}

/// Parse an integer that may use `,` as a thousands separator
/// (`"10,000"` → `10000`).
pub fn parse_grouped_int(field: &'static str, value: &str) -> Result<u32, FieldError> {
    let cleaned: String = value.trim().chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() {
        return Err(FieldError {
            field,
            value: value.to_string(),
        });
    }
    cleaned.parse::<u32>().map_err(|_| FieldError {
        field,
        value: value.to_string(),
    })
}

/// Format an integer with `,` thousands separators (`15000` → `"15,000"`).
pub fn format_grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
