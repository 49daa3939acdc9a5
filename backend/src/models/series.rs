//! Long-format date/value series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Header format of the source CSVs, e.g. `1/22/20`.
pub const SOURCE_DATE_FORMAT: &str = "%m/%d/%y";

/// One point of a reshaped series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateValue<T = i64> {
    pub date: NaiveDate,
    pub value: T,
}

impl<T> DateValue<T> {
    pub fn new(date: NaiveDate, value: T) -> Self {
        Self { date, value }
    }
}

/// Chronologically ordered series of cumulative counts.
pub type Series = Vec<DateValue<i64>>;

/// Parse a source header like `3/7/21` into a calendar date.
pub fn parse_source_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), SOURCE_DATE_FORMAT).ok()
}

/// Normalize a source header from `M/D/YY` to `YYYY-MM-DD`.
///
/// Returns `None` when the header is not a date.
pub fn normalize_date(raw: &str) -> Option<String> {
    parse_source_date(raw).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Dates of a series, in order.
pub fn dates_of<T>(series: &[DateValue<T>]) -> Vec<NaiveDate> {
    series.iter().map(|p| p.date).collect()
}

/// Values of a series, in order.
pub fn values_of<T: Copy>(series: &[DateValue<T>]) -> Vec<T> {
    series.iter().map(|p| p.value).collect()
}
