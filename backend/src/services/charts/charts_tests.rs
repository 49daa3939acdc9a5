use chrono::NaiveDate;

use crate::api::{Figure, SnapshotRow, Trace};
use crate::models::{CountryScope, DateValue, Metric, SortOrder, TopN, ViewFilters};
use crate::services::charts::{
    cumulative_chart, daily_chart, rate_chart, ranked_bar_chart, sunburst_chart, world_map,
};
use crate::services::tables::{ContinentRow, MapRow};

fn series(values: &[i64]) -> Vec<DateValue> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| DateValue::new(start + chrono::Duration::days(i as i64), *v))
        .collect()
}

fn snapshot_row(country: &str, confirmed: i64, recovered: i64, deaths: i64) -> SnapshotRow {
    SnapshotRow {
        country: country.to_string(),
        confirmed,
        recovered,
        deaths,
        active: confirmed - recovered - deaths,
    }
}

fn rows() -> Vec<SnapshotRow> {
    vec![
        snapshot_row("Albania", 500, 100, 30),
        snapshot_row("Belgium", 900, 200, 10),
        snapshot_row("Chile", 100, 50, 20),
        snapshot_row("US", 2_000, 0, 90),
    ]
}

fn title(fig: &Figure) -> &str {
    fig.layout.title.as_ref().map(|t| t.text.as_str()).unwrap_or("")
}

fn bar_x(fig: &Figure) -> Vec<String> {
    match &fig.data[0] {
        Trace::Bar(bar) => bar.x.clone(),
        other => panic!("expected bar trace, got {:?}", other),
    }
}

#[test]
fn test_cumulative_chart_global_title_and_points() {
    let fig = cumulative_chart(&series(&[1, 3, 6]), Metric::Confirmed, &CountryScope::Global);
    assert_eq!(title(&fig), "Cumulative confirmed cases in the world");
    assert_eq!(fig.layout.hovermode.as_deref(), Some("y"));
    match &fig.data[0] {
        Trace::Scatter(s) => {
            assert_eq!(s.x[0], "2020-01-22");
            assert_eq!(s.y, vec![1.0, 3.0, 6.0]);
            assert_eq!(s.line.as_ref().and_then(|l| l.width), Some(4.0));
        }
        other => panic!("unexpected trace {:?}", other),
    }
    assert!(fig.layout.xaxis.is_some());
    assert_eq!(fig.layout.updatemenus.len(), 1);
}

#[test]
fn test_daily_chart_uses_deltas() {
    let scope = CountryScope::Country("Chile".into());
    let fig = daily_chart(&series(&[1, 3, 6]), Metric::Deaths, &scope);
    assert_eq!(title(&fig), "Daily deceased cases in Chile");
    match &fig.data[0] {
        Trace::Bar(bar) => {
            assert_eq!(bar.y, vec![2.0, 3.0]);
            assert_eq!(bar.x, vec!["2020-01-22", "2020-01-23"]);
            let outline = bar.marker.line.as_ref().unwrap();
            assert_eq!(outline.width, Some(1.5));
            assert_eq!(outline.color.as_deref(), Some("rgba(247, 80, 80, 0.2)"));
        }
        other => panic!("unexpected trace {:?}", other),
    }
}

#[test]
fn test_rate_chart_zero_denominator() {
    let fig = rate_chart(&series(&[0, 5, 10]), Metric::Active, &CountryScope::Global);
    assert_eq!(title(&fig), "Rate of active cases in the world");
    match &fig.data[0] {
        Trace::Scatter(s) => assert_eq!(s.y, vec![500.0, 100.0]),
        other => panic!("unexpected trace {:?}", other),
    }
}

#[test]
fn test_ranked_bar_global_mode() {
    let filters = ViewFilters {
        top: TopN::clamped(2),
        order: SortOrder::Highest,
        metric: Metric::Deaths,
        scope: CountryScope::Global,
    };
    let fig = ranked_bar_chart(&rows(), &filters);
    assert_eq!(title(&fig), "Top 2 countries with highest Deaths cases");
    assert_eq!(fig.data.len(), 4);
    assert_eq!(bar_x(&fig), vec!["US", "Albania"]);
    assert_eq!(fig.layout.barmode.as_deref(), Some("stack"));
    assert_eq!(fig.layout.hovermode.as_deref(), Some("x"));
}

#[test]
fn test_ranked_bar_country_mode() {
    let filters = ViewFilters {
        top: TopN::clamped(5),
        order: SortOrder::Lowest,
        metric: Metric::Recovered,
        scope: CountryScope::Country("US".into()),
    };
    let fig = ranked_bar_chart(&rows(), &filters);
    assert_eq!(title(&fig), "the United States");
    assert_eq!(bar_x(&fig), vec!["US"]);
    assert!(fig.layout.barmode.is_none());
    assert!(fig.layout.hovermode.is_none());
}

#[test]
fn test_world_map_layout() {
    let map_rows = vec![MapRow {
        iso_code: "ALB".into(),
        confirmed: 500,
        text: "Confirmed cases in Albania".into(),
    }];
    let fig = world_map(&map_rows);
    assert_eq!(fig.layout.height, Some(600));
    let json = serde_json::to_value(&fig).unwrap();
    assert_eq!(json["data"][0]["type"], "choropleth");
    assert_eq!(json["data"][0]["locations"][0], "ALB");
    assert_eq!(json["layout"]["geo"]["projection"]["type"], "orthographic");
    assert_eq!(
        json["data"][0]["colorbar"]["title"]["text"],
        "number of confirmed cases"
    );
}

#[test]
fn test_sunburst_hierarchy() {
    let breakdown = vec![
        ContinentRow {
            continent: "Europe".into(),
            row: snapshot_row("Albania", 500, 100, 30),
        },
        ContinentRow {
            continent: "Europe".into(),
            row: snapshot_row("Belgium", 900, 200, 10),
        },
        ContinentRow {
            continent: "South America".into(),
            row: snapshot_row("Chile", 100, 50, 20),
        },
    ];
    let fig = sunburst_chart(&breakdown, Metric::Recovered);
    assert_eq!(title(&fig), "Sunburst plot for global recovered cases");
    match &fig.data[0] {
        Trace::Sunburst(s) => {
            assert_eq!(s.ids.len(), 5);
            let europe = s.ids.iter().position(|id| id == "Europe").unwrap();
            assert_eq!(s.values[europe], 300.0);
            assert_eq!(s.parents[europe], "");
            assert_eq!(s.parents[0], "Europe");
            assert_eq!(s.marker.colorscale[1].1, "green");
        }
        other => panic!("unexpected trace {:?}", other),
    }
}
