//! Ranked multi-series bar chart.

use crate::api::{BarTrace, Figure, Marker, SnapshotRow, Trace};
use crate::models::{CountryScope, Metric, ViewFilters};
use crate::services::lookups::title_name;
use crate::services::tables::rank_countries;

use super::style::{axis_layout, case_color, BAR_TOGGLE_Y};

const TRACE_NAMES: [(Metric, &str); 4] = [
    (Metric::Confirmed, "confirmed cases"),
    (Metric::Recovered, "recovered cases"),
    (Metric::Deaths, "deaths"),
    (Metric::Active, "active cases"),
];

/// Four stacked bars per country, ranked by the filter's metric and order.
///
/// In country scope only that country's row is drawn, ranked by Confirmed,
/// unstacked, titled with its display name.
pub fn ranked_bar_chart(rows: &[SnapshotRow], filters: &ViewFilters) -> Figure {
    let (selected, metric, title, barmode, hovermode) = match &filters.scope {
        CountryScope::Global => (
            rows.to_vec(),
            filters.metric,
            format!(
                "Top {} countries with {} {} cases",
                filters.top.get(),
                filters.order,
                filters.metric
            ),
            Some("stack".to_string()),
            Some("x".to_string()),
        ),
        CountryScope::Country(name) => (
            rows.iter().filter(|r| &r.country == name).cloned().collect(),
            Metric::Confirmed,
            title_name(name).to_string(),
            None,
            None,
        ),
    };

    let ranked = rank_countries(&selected, metric, filters.order, filters.top);
    let countries: Vec<String> = ranked.iter().map(|r| r.country.clone()).collect();

    let data = TRACE_NAMES
        .iter()
        .map(|(m, name)| {
            Trace::Bar(BarTrace {
                x: countries.clone(),
                y: ranked.iter().map(|r| r.metric(*m) as f64).collect(),
                name: Some(name.to_string()),
                marker: Marker {
                    color: Some(case_color(*m).to_string()),
                    line: None,
                },
            })
        })
        .collect();

    let mut layout = axis_layout(title, BAR_TOGGLE_Y);
    layout.barmode = barmode;
    layout.hovermode = hovermode;
    Figure { data, layout }
}
