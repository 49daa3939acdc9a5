//! Wide tables as they come out of the source CSVs and after aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a raw series file: a country, an optional sub-region, and one
/// cumulative count per date column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRow {
    pub country: String,
    pub province: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub values: Vec<i64>,
}

/// A raw series file: shared date header plus per-region rows.
///
/// `rows[i].values.len() == dates.len()` for every row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WideTable {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<RegionRow>,
}

/// One country after sub-regions have been folded together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRow {
    pub country: String,
    pub values: Vec<i64>,
}

impl CountryRow {
    pub fn new(country: impl Into<String>, values: Vec<i64>) -> Self {
        Self {
            country: country.into(),
            values,
        }
    }

    /// Value at the most recent date, 0 for an empty row.
    pub fn latest(&self) -> i64 {
        self.values.last().copied().unwrap_or(0)
    }
}

/// Per-country wide table, rows sorted ascending by country name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountryTable {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<CountryRow>,
}

impl CountryTable {
    pub fn new(dates: Vec<NaiveDate>, rows: Vec<CountryRow>) -> Self {
        Self { dates, rows }
    }

    pub fn row(&self, country: &str) -> Option<&CountryRow> {
        self.rows
            .binary_search_by(|r| r.country.as_str().cmp(country))
            .ok()
            .map(|idx| &self.rows[idx])
    }

    pub fn contains(&self, country: &str) -> bool {
        self.row(country).is_some()
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.country.as_str())
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
