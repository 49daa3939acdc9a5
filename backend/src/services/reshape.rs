//! Wide → long reshaping of per-country tables.

use crate::models::{CountryScope, CountryTable, DateValue, Series};

fn pair_with_dates(table: &CountryTable, values: impl IntoIterator<Item = i64>) -> Series {
    table
        .dates
        .iter()
        .zip(values)
        .map(|(date, value)| DateValue::new(*date, value))
        .collect()
}

/// Sum all countries into one world series.
pub fn global_series(table: &CountryTable) -> Series {
    let mut totals = vec![0_i64; table.dates.len()];
    for row in &table.rows {
        for (acc, value) in totals.iter_mut().zip(&row.values) {
            *acc += value;
        }
    }
    pair_with_dates(table, totals)
}

/// One country's series, `None` when the country is not in the table.
pub fn country_series(table: &CountryTable, country: &str) -> Option<Series> {
    table
        .row(country)
        .map(|row| pair_with_dates(table, row.values.iter().copied()))
}

/// Series for a chart scope. Global scope always succeeds.
pub fn select_series(table: &CountryTable, scope: &CountryScope) -> Option<Series> {
    match scope {
        CountryScope::Global => Some(global_series(table)),
        CountryScope::Country(name) => country_series(table, name),
    }
}

/// Every cell of the table as `(country, date, value)`, country-major.
pub fn long_format(table: &CountryTable) -> Vec<(String, DateValue)> {
    table
        .rows
        .iter()
        .flat_map(|row| {
            table
                .dates
                .iter()
                .zip(&row.values)
                .map(move |(date, value)| (row.country.clone(), DateValue::new(*date, *value)))
        })
        .collect()
}

/// First difference of a cumulative series.
///
/// The change from day `k` to day `k + 1` is labeled with day `k`, so the
/// result is one point shorter than the input.
pub fn daily_deltas(series: &[DateValue]) -> Vec<DateValue> {
    series
        .windows(2)
        .map(|w| DateValue::new(w[0].date, w[1].value - w[0].value))
        .collect()
}

/// Day-over-day percent change. A zero previous value is replaced by 1.
pub fn daily_rates(series: &[DateValue]) -> Vec<DateValue<f64>> {
    series
        .windows(2)
        .map(|w| {
            let denominator = if w[0].value == 0 { 1 } else { w[0].value };
            let rate = 100.0 * (w[1].value - w[0].value) as f64 / denominator as f64;
            DateValue::new(w[0].date, rate)
        })
        .collect()
}
