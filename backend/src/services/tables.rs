//! Latest-date per-country views: the snapshot table and everything ranked,
//! mapped or grouped from it.

use std::collections::{BTreeMap, HashSet};

use crate::api::{CountryList, SnapshotRow, TableData, TableRow};
use crate::models::{CountryTable, Metric, SortOrder, TopN, GLOBAL_SENTINEL};
use crate::services::lookups;
use crate::services::metrics::format_thousands;

/// A country placed on the world map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRow {
    pub iso_code: String,
    pub confirmed: i64,
    pub text: String,
}

/// A country with its continent, for the hierarchical breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinentRow {
    pub continent: String,
    pub row: SnapshotRow,
}

/// Join the four tables on country at their latest date.
///
/// Countries missing from any table are dropped.
pub fn snapshot_table(
    confirmed: &CountryTable,
    recovered: &CountryTable,
    deaths: &CountryTable,
    active: &CountryTable,
) -> Vec<SnapshotRow> {
    confirmed
        .rows
        .iter()
        .filter_map(|c| {
            Some(SnapshotRow {
                country: c.country.clone(),
                confirmed: c.latest(),
                recovered: recovered.row(&c.country)?.latest(),
                deaths: deaths.row(&c.country)?.latest(),
                active: active.row(&c.country)?.latest(),
            })
        })
        .collect()
}

/// Sort by `metric` in the requested direction and keep the first `top` rows.
///
/// The sort is stable, so ties keep the incoming (alphabetical) order.
pub fn rank_countries(
    rows: &[SnapshotRow],
    metric: Metric,
    order: SortOrder,
    top: TopN,
) -> Vec<SnapshotRow> {
    let mut ranked = rows.to_vec();
    match order {
        SortOrder::Highest => ranked.sort_by(|a, b| b.metric(metric).cmp(&a.metric(metric))),
        SortOrder::Lowest => ranked.sort_by_key(|r| r.metric(metric)),
    }
    ranked.truncate(top.get());
    ranked
}

/// Side table: every country, highest confirmed first, formatted for display.
pub fn display_table(rows: &[SnapshotRow], as_of: Option<chrono::NaiveDate>) -> TableData {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.confirmed.cmp(&a.confirmed));

    let rows = sorted
        .into_iter()
        .map(|r| {
            let reported = lookups::reports_recoveries(&r.country);
            let hidden = |v: i64| {
                if reported {
                    format_thousands(v)
                } else {
                    "-".to_string()
                }
            };
            TableRow {
                confirmed: format_thousands(r.confirmed),
                recovered: hidden(r.recovered),
                deaths: format_thousands(r.deaths),
                active: hidden(r.active),
                country: r.country,
            }
        })
        .collect();

    TableData { as_of, rows }
}

/// Hover text shown on the map.
pub fn map_hover_text(row: &SnapshotRow) -> String {
    format!(
        "Confirmed cases in {}<br>Recovered: {}<br>Deaths: {}<br>Active: {}",
        row.country, row.recovered, row.deaths, row.active
    )
}

/// Countries that resolve to an ISO code, in table order.
pub fn map_rows(rows: &[SnapshotRow], iso_codes: &BTreeMap<String, String>) -> Vec<MapRow> {
    rows.iter()
        .filter_map(|r| {
            iso_codes.get(&r.country).map(|code| MapRow {
                iso_code: code.clone(),
                confirmed: r.confirmed,
                text: map_hover_text(r),
            })
        })
        .collect()
}

/// Countries that resolve to a continent and have no zero metric, in the
/// continent file's order. The first continent listed for a country wins.
pub fn continent_breakdown(
    rows: &[SnapshotRow],
    continents: &[(String, String)],
) -> Vec<ContinentRow> {
    let by_country: BTreeMap<&str, &SnapshotRow> =
        rows.iter().map(|r| (r.country.as_str(), r)).collect();
    let mut seen = HashSet::new();

    continents
        .iter()
        .filter(|(_, country)| seen.insert(country.as_str()))
        .filter_map(|(continent, country)| {
            let row = by_country.get(country.as_str())?;
            let all_nonzero = Metric::ALL.iter().all(|m| row.metric(*m) != 0);
            all_nonzero.then(|| ContinentRow {
                continent: continent.clone(),
                row: (*row).clone(),
            })
        })
        .collect()
}

/// Lookup-box options: every snapshot country then the `Global` sentinel.
pub fn country_list(rows: &[SnapshotRow], default_country: &str) -> CountryList {
    let mut countries: Vec<String> = rows.iter().map(|r| r.country.clone()).collect();
    countries.push(GLOBAL_SENTINEL.to_string());
    CountryList {
        countries,
        default_country: default_country.to_string(),
    }
}
