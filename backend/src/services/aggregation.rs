//! Folding sub-national rows into per-country tables.

use std::collections::BTreeMap;

use tracing::warn;

use crate::models::{CountryRow, CountryTable, WideTable};
use crate::source::error::{ErrorContext, SourceError, SourceResult};

/// Sum every row that shares a country name into one row per country.
///
/// Countries without sub-regions pass through unchanged. Output rows are
/// ascending by country name.
pub fn merge_countries(table: &WideTable) -> CountryTable {
    let width = table.dates.len();
    let mut merged: BTreeMap<&str, Vec<i64>> = BTreeMap::new();

    for row in &table.rows {
        let acc = merged
            .entry(row.country.as_str())
            .or_insert_with(|| vec![0; width]);
        for (slot, value) in acc.iter_mut().zip(&row.values) {
            *slot += value;
        }
    }

    let rows = merged
        .into_iter()
        .map(|(country, values)| CountryRow::new(country, values))
        .collect();

    CountryTable::new(table.dates.clone(), rows)
}

/// Check that two aggregated tables describe the same countries over the same dates.
pub fn ensure_aligned(
    reference: &CountryTable,
    other: &CountryTable,
    other_name: &str,
) -> SourceResult<()> {
    let context = || ErrorContext::new("align_tables").with_resource(other_name.to_string());

    if reference.dates != other.dates {
        return Err(SourceError::schema_with_context(
            format!(
                "date columns differ ({} vs {} dates)",
                reference.dates.len(),
                other.dates.len()
            ),
            context(),
        ));
    }

    if reference.rows.len() != other.rows.len()
        || reference
            .countries()
            .zip(other.countries())
            .any(|(a, b)| a != b)
    {
        let missing: Vec<&str> = reference
            .countries()
            .filter(|c| !other.contains(c))
            .chain(other.countries().filter(|c| !reference.contains(c)))
            .take(5)
            .collect();
        return Err(SourceError::schema_with_context(
            "country sets differ",
            context().with_details(format!("e.g. {}", missing.join(", "))),
        ));
    }

    Ok(())
}

/// Derive the active table: `confirmed - (recovered + deaths)` per country per date.
///
/// Inputs must already be aligned. Negative results are kept as-is and
/// reported once per country.
pub fn derive_active(
    confirmed: &CountryTable,
    recovered: &CountryTable,
    deaths: &CountryTable,
) -> SourceResult<CountryTable> {
    ensure_aligned(confirmed, recovered, "recovered")?;
    ensure_aligned(confirmed, deaths, "deaths")?;

    let mut negative = Vec::new();
    let rows = confirmed
        .rows
        .iter()
        .zip(&recovered.rows)
        .zip(&deaths.rows)
        .map(|((c, r), d)| {
            let values: Vec<i64> = c
                .values
                .iter()
                .zip(&r.values)
                .zip(&d.values)
                .map(|((c, r), d)| c - (r + d))
                .collect();
            if values.iter().any(|v| *v < 0) {
                negative.push(c.country.as_str());
            }
            CountryRow::new(c.country.clone(), values)
        })
        .collect();

    if !negative.is_empty() {
        warn!(
            countries = %negative.join(", "),
            "recovered + deaths exceeds confirmed; active counts left negative"
        );
    }

    Ok(CountryTable::new(confirmed.dates.clone(), rows))
}
