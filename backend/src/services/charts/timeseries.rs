//! Cumulative, daily and rate charts for one case category.

use crate::api::{BarTrace, Figure, Line, Marker, ScatterTrace, Trace};
use crate::models::{CountryScope, DateValue, Metric};
use crate::services::reshape::{daily_deltas, daily_rates};

use super::style::{axis_layout, case_color, date_range_axis, hue, SERIES_TOGGLE_Y};

fn x_dates<T>(series: &[DateValue<T>]) -> Vec<String> {
    series
        .iter()
        .map(|p| p.date.format("%Y-%m-%d").to_string())
        .collect()
}

fn outlined_marker(metric: Metric, width: Option<f64>) -> Marker {
    let color = case_color(metric);
    Marker {
        color: Some(color.to_string()),
        line: Some(Line {
            color: Some(hue(color, 0.2)),
            width,
        }),
    }
}

fn series_figure(trace: Trace, title: String, hovermode: Option<&str>) -> Figure {
    let mut layout = axis_layout(title, SERIES_TOGGLE_Y);
    layout.xaxis = Some(date_range_axis());
    layout.hovermode = hovermode.map(str::to_string);
    Figure {
        data: vec![trace],
        layout,
    }
}

/// Running total as a thick line with markers.
pub fn cumulative_chart(series: &[DateValue], metric: Metric, scope: &CountryScope) -> Figure {
    let trace = Trace::Scatter(ScatterTrace {
        x: x_dates(series),
        y: series.iter().map(|p| p.value as f64).collect(),
        mode: "lines+markers".to_string(),
        line: Some(Line {
            color: None,
            width: Some(4.0),
        }),
        marker: Some(outlined_marker(metric, None)),
    });
    let title = format!("Cumulative {} cases in {}", metric.case_name(), scope.place());
    series_figure(trace, title, Some("y"))
}

/// New cases per day as bars.
pub fn daily_chart(series: &[DateValue], metric: Metric, scope: &CountryScope) -> Figure {
    let deltas = daily_deltas(series);
    let trace = Trace::Bar(BarTrace {
        x: x_dates(&deltas),
        y: deltas.iter().map(|p| p.value as f64).collect(),
        name: None,
        marker: outlined_marker(metric, Some(1.5)),
    });
    let title = format!("Daily {} cases in {}", metric.case_name(), scope.place());
    series_figure(trace, title, None)
}

/// Day-over-day percent change as a line.
pub fn rate_chart(series: &[DateValue], metric: Metric, scope: &CountryScope) -> Figure {
    let rates = daily_rates(series);
    let trace = Trace::Scatter(ScatterTrace {
        x: x_dates(&rates),
        y: rates.iter().map(|p| p.value).collect(),
        mode: "lines+markers".to_string(),
        line: Some(Line {
            color: Some(case_color(metric).to_string()),
            width: None,
        }),
        marker: Some(outlined_marker(metric, Some(1.5))),
    });
    let title = format!("Rate of {} cases in {}", metric.case_name(), scope.place());
    series_figure(trace, title, None)
}
