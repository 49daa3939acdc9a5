use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{CountryScope, Metric, TopN, ViewFilters};
use crate::parsing::{parse_continents, parse_iso_codes, parse_series_csv};
use crate::store::{DatasetSnapshot, RawDataset, SnapshotOptions, SnapshotStore};

const HEADER: &str = "Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20";

fn raw(extra_confirmed: i64) -> RawDataset {
    let confirmed = format!(
        "{}\n,India,20.6,78.9,10,20,{}\nAlberta,Canada,53.9,-116.6,1,2,3\nOntario,Canada,51.3,-85.3,2,3,5\n",
        HEADER,
        40 + extra_confirmed
    );
    let recovered = format!("{}\n,India,20.6,78.9,1,5,10\n,Canada,56.1,-106.3,0,1,2\n", HEADER);
    let deaths = format!("{}\n,India,20.6,78.9,0,1,2\n,Canada,56.1,-106.3,0,0,1\n", HEADER);

    RawDataset {
        confirmed: parse_series_csv(confirmed.as_bytes()).unwrap(),
        recovered: parse_series_csv(recovered.as_bytes()).unwrap(),
        deaths: parse_series_csv(deaths.as_bytes()).unwrap(),
        iso_codes: parse_iso_codes("Country,Alpha-3 code\nIndia, \"IND\"\nCanada, \"CAN\"\n".as_bytes())
            .unwrap(),
        continents: parse_continents("Continent,Country\nAsia,India\nNorth America,Canada\n".as_bytes())
            .unwrap(),
    }
}

fn snapshot(extra_confirmed: i64) -> DatasetSnapshot {
    DatasetSnapshot::build(&raw(extra_confirmed), "abc", &SnapshotOptions::default()).unwrap()
}

#[test]
fn test_build_derives_every_view() {
    let snap = snapshot(0);

    assert_eq!(snap.checksum, "abc");
    assert_eq!(snap.summary.metrics.total_confirmed, 48);
    assert_eq!(snap.summary.metrics.total_active, 48 - 12 - 3);
    assert_eq!(snap.table.rows[0].country, "India");
    assert_eq!(snap.countries.countries, vec!["Canada", "India", "Global"]);
    assert_eq!(snap.countries.default_country, "India");
    assert_eq!(snap.default_charts.figures().len(), 13);
    assert_eq!(snap.data.as_of(), chrono::NaiveDate::from_ymd_opt(2020, 1, 24));
    assert_eq!(snap.map.data.len(), 1);
}

#[test]
fn test_canada_provinces_are_summed() {
    let snap = snapshot(0);
    let canada = snap.data.tables.confirmed.row("Canada").unwrap();
    assert_eq!(canada.values, vec![3, 5, 8]);
}

#[test]
fn test_default_filters_follow_options() {
    let options = SnapshotOptions {
        default_country: "Canada".to_string(),
        default_filters: ViewFilters {
            top: TopN::clamped(1),
            ..ViewFilters::default()
        },
    };
    let snap = DatasetSnapshot::build(&raw(0), "abc", &options).unwrap();
    assert_eq!(snap.default_filters.top.get(), 1);
    assert_eq!(snap.default_filters.scope, CountryScope::Global);
    assert_eq!(snap.countries.default_country, "Canada");
}

#[test]
fn test_mismatched_countries_fail_as_schema_drift() {
    let mut bad = raw(0);
    bad.deaths = parse_series_csv(format!("{}\n,India,20.6,78.9,0,1,2\n", HEADER).as_bytes())
        .unwrap();
    let err = DatasetSnapshot::build(&bad, "abc", &SnapshotOptions::default()).unwrap_err();
    assert!(err.is_schema_drift());
}

#[test]
fn test_store_starts_at_version_one() {
    let store = SnapshotStore::new(snapshot(0));
    assert_eq!(store.version(), 1);
    assert_eq!(store.current().version, 1);
}

#[test]
fn test_install_bumps_version_and_keeps_old_readers_valid() {
    let store = SnapshotStore::new(snapshot(0));
    let before = store.current();

    let version = store.install(snapshot(100));
    assert_eq!(version, 2);
    assert_eq!(store.version(), 2);

    // A reader holding the old Arc still sees a complete, consistent snapshot.
    assert_eq!(before.version, 1);
    assert_eq!(before.summary.metrics.total_confirmed, 48);
    assert_eq!(store.current().summary.metrics.total_confirmed, 148);
    assert!(Arc::strong_count(&before) >= 1);
}

#[test]
fn test_sunburst_lookup_by_metric() {
    let snap = snapshot(0);
    let titles: HashMap<Metric, String> = Metric::ALL
        .iter()
        .map(|m| {
            let title = snap
                .sunburst(*m)
                .layout
                .title
                .as_ref()
                .map(|t| t.text.clone())
                .unwrap_or_default();
            (*m, title)
        })
        .collect();
    assert_eq!(titles[&Metric::Deaths], "Sunburst plot for global deaths cases");
}

#[test]
fn test_hours_since_refresh_never_negative() {
    let snap = snapshot(0);
    let earlier = snap.refreshed_at - chrono::Duration::hours(2);
    assert_eq!(snap.hours_since_refresh(earlier), 0);
    let later = snap.refreshed_at + chrono::Duration::minutes(185);
    assert_eq!(snap.hours_since_refresh(later), 3);
}
