//! End-to-end derivation from fixture CSVs to the served views.

mod support;

use covid_dashboard::api::{ChartRequest, CountryScope, Metric, SortOrder, Trace};
use covid_dashboard::parsing::{parse_continents, parse_iso_codes, parse_series_csv};
use covid_dashboard::services::dashboard::{resolve_filters, respond, ViewController, ViewState};
use covid_dashboard::store::{DatasetSnapshot, RawDataset, SnapshotOptions};
use serde_json::json;

fn snapshot() -> DatasetSnapshot {
    let raw = RawDataset {
        confirmed: parse_series_csv(support::confirmed_csv(0).as_bytes()).unwrap(),
        recovered: parse_series_csv(support::recovered_csv().as_bytes()).unwrap(),
        deaths: parse_series_csv(support::deaths_csv().as_bytes()).unwrap(),
        iso_codes: parse_iso_codes(support::iso_csv().as_bytes()).unwrap(),
        continents: parse_continents(support::continents_csv().as_bytes()).unwrap(),
    };
    DatasetSnapshot::build(&raw, "fixture", &SnapshotOptions::default()).unwrap()
}

#[test]
fn test_summary_metrics() {
    let m = snapshot().summary.metrics;
    assert_eq!(m.total_confirmed, 169);
    assert_eq!(m.total_recovered, 12);
    assert_eq!(m.total_deaths, 7);
    assert_eq!(m.total_active, 150);
    assert_eq!(m.change_confirmed, 63);
    assert_eq!(m.change_recovered, 6);
    assert_eq!(m.change_deaths, 4);
    assert_eq!(m.change_active, 63 - 6 + 4);
    assert!((m.mortality_rate - 100.0 * 7.0 / 169.0).abs() < 1e-9);
}

#[test]
fn test_summary_cards_are_formatted() {
    let cards = snapshot().summary.cards;
    let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Confirmed", "Recovered", "Deceased", "Active"]);
    assert_eq!(cards[0].total, "169");
    assert_eq!(cards[0].change, "+63");
}

#[test]
fn test_side_table_order_and_hidden_recoveries() {
    let table = snapshot().table;
    let countries: Vec<&str> = table.rows.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(countries, vec!["US", "India", "Canada", "Chad"]);
    assert_eq!(table.rows[0].recovered, "-");
    assert_eq!(table.rows[0].active, "-");
    assert_eq!(table.rows[1].recovered, "10");
}

#[test]
fn test_country_list_ends_with_global() {
    let list = snapshot().countries;
    assert_eq!(list.countries, vec!["Canada", "Chad", "India", "US", "Global"]);
}

#[test]
fn test_map_uses_iso_overrides() {
    let map = snapshot().map;
    match &map.data[0] {
        Trace::Choropleth(trace) => {
            assert!(trace.locations.contains(&"USA".to_string()));
            assert_eq!(trace.locations.len(), 4);
        }
        other => panic!("expected choropleth, got {:?}", other),
    }
}

#[test]
fn test_sunburst_drops_countries_with_zero_metrics() {
    let snap = snapshot();
    match &snap.sunburst(Metric::Confirmed).data[0] {
        Trace::Sunburst(trace) => {
            assert!(trace.labels.contains(&"India".to_string()));
            assert!(trace.labels.contains(&"Canada".to_string()));
            assert!(!trace.labels.contains(&"Chad".to_string()));
            assert!(!trace.labels.contains(&"US".to_string()));
        }
        other => panic!("expected sunburst, got {:?}", other),
    }
}

#[test]
fn test_default_view_serves_precomputed_charts() {
    let snap = snapshot();
    let response = respond(&ViewState::Default, &snap);
    assert!(!response.filtered);
    assert_eq!(response.charts, snap.default_charts);
    assert_eq!(response.charts.figures().len(), 13);
}

#[test]
fn test_filtered_view_recomputes_with_submitted_controls() {
    let snap = snapshot();
    let controller = ViewController::new();
    let request = ChartRequest {
        top: Some(json!(2)),
        order: Some("lowest".to_string()),
        metric: Some("deaths".to_string()),
        ..ChartRequest::default()
    };
    controller.submit(resolve_filters(&request, &snap));

    let response = respond(&controller.state(), &snap);
    assert!(response.filtered);
    assert_eq!(response.filters.order, SortOrder::Lowest);
    assert_eq!(response.filters.metric, Metric::Deaths);
    match &response.charts.bar.data[0] {
        Trace::Bar(trace) => assert_eq!(trace.x, vec!["Chad", "Canada"]),
        other => panic!("expected bar, got {:?}", other),
    }
}

#[test]
fn test_country_scope_and_fallbacks() {
    let snap = snapshot();

    let canada = ChartRequest {
        country: Some("Canada".to_string()),
        tab: Some("country".to_string()),
        ..ChartRequest::default()
    };
    assert_eq!(
        resolve_filters(&canada, &snap).scope,
        CountryScope::Country("Canada".to_string())
    );

    let unknown = ChartRequest {
        country: Some("Atlantis".to_string()),
        tab: Some("country".to_string()),
        ..ChartRequest::default()
    };
    assert_eq!(resolve_filters(&unknown, &snap).scope, CountryScope::Global);

    let sentinel = ChartRequest {
        country: Some("Global".to_string()),
        ..ChartRequest::default()
    };
    assert_eq!(resolve_filters(&sentinel, &snap).scope, CountryScope::Global);
}

#[test]
fn test_country_charts_use_that_country_series() {
    let snap = snapshot();
    let request = ChartRequest {
        country: Some("Canada".to_string()),
        tab: Some("country".to_string()),
        ..ChartRequest::default()
    };
    let response = respond(&ViewState::Filtered(resolve_filters(&request, &snap)), &snap);

    match &response.charts.cumulative.confirmed.data[0] {
        Trace::Scatter(trace) => assert_eq!(trace.y, vec![3.0, 5.0, 8.0]),
        other => panic!("expected scatter, got {:?}", other),
    }
    match &response.charts.bar.data[0] {
        Trace::Bar(trace) => assert_eq!(trace.x, vec!["Canada"]),
        other => panic!("expected bar, got {:?}", other),
    }
}

#[test]
fn test_out_of_range_top_is_clamped() {
    let snap = snapshot();
    let request = ChartRequest {
        top: Some(json!("500")),
        ..ChartRequest::default()
    };
    assert_eq!(resolve_filters(&request, &snap).top.get(), 180);
}

#[test]
fn test_global_sentinel_matches_default_charts() {
    let snap = snapshot();
    let request = ChartRequest {
        country: Some("Global".to_string()),
        tab: Some("country".to_string()),
        ..ChartRequest::default()
    };
    let filters = resolve_filters(&request, &snap);
    assert_eq!(filters, snap.default_filters);

    let response = respond(&ViewState::Filtered(filters), &snap);
    assert_eq!(response.charts, snap.default_charts);
}
