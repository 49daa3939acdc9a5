//! World choropleth and continent sunbursts.

use crate::api::{
    ChoroplethTrace, ColorBar, Figure, Geo, Line, Marker, Projection, SunburstMarker,
    SunburstTrace, Title, Trace,
};
use crate::models::Metric;
use crate::services::tables::{ContinentRow, MapRow};

use super::style::{dark_layout, scale_toggle, DARK_PAPER, SERIES_TOGGLE_Y};

pub const MAP_HEIGHT: u32 = 600;

/// Orthographic globe shaded by confirmed cases.
pub fn world_map(rows: &[MapRow]) -> Figure {
    let trace = Trace::Choropleth(ChoroplethTrace {
        locations: rows.iter().map(|r| r.iso_code.clone()).collect(),
        z: rows.iter().map(|r| r.confirmed as f64).collect(),
        text: rows.iter().map(|r| r.text.clone()).collect(),
        colorscale: "Teal".to_string(),
        marker: Marker {
            color: None,
            line: Some(Line {
                color: Some("gray".to_string()),
                width: None,
            }),
        },
        colorbar: ColorBar {
            title: Title {
                text: "number of confirmed cases".to_string(),
            },
        },
    });

    let mut layout = dark_layout(String::new());
    layout.title = None;
    layout.geo = Some(Geo {
        projection: Projection {
            kind: "orthographic".to_string(),
        },
        bgcolor: DARK_PAPER.to_string(),
    });
    layout.autosize = Some(true);
    layout.height = Some(MAP_HEIGHT);
    layout.updatemenus = vec![scale_toggle(SERIES_TOGGLE_Y)];

    Figure {
        data: vec![trace],
        layout,
    }
}

fn scale_end(metric: Metric) -> &'static str {
    match metric {
        Metric::Confirmed => "purple",
        Metric::Recovered => "green",
        Metric::Deaths => "red",
        Metric::Active => "yellow",
    }
}

/// Continent to country hierarchy sized and colored by `metric`.
///
/// Continent nodes carry the sum of their countries and a value-weighted
/// mean color; continents appear in first-seen order.
pub fn sunburst_chart(rows: &[ContinentRow], metric: Metric) -> Figure {
    let mut continents: Vec<(&str, f64, f64)> = Vec::new();
    for r in rows {
        let v = r.row.metric(metric) as f64;
        match continents.iter_mut().find(|(c, _, _)| *c == r.continent) {
            Some((_, sum, weighted)) => {
                *sum += v;
                *weighted += v * v;
            }
            None => continents.push((r.continent.as_str(), v, v * v)),
        }
    }

    let mut ids = Vec::with_capacity(rows.len() + continents.len());
    let mut labels = Vec::with_capacity(ids.capacity());
    let mut parents = Vec::with_capacity(ids.capacity());
    let mut values = Vec::with_capacity(ids.capacity());
    let mut colors = Vec::with_capacity(ids.capacity());

    for r in rows {
        let v = r.row.metric(metric) as f64;
        ids.push(format!("{}/{}", r.continent, r.row.country));
        labels.push(r.row.country.clone());
        parents.push(r.continent.clone());
        values.push(v);
        colors.push(v);
    }
    for (continent, sum, weighted) in &continents {
        ids.push(continent.to_string());
        labels.push(continent.to_string());
        parents.push(String::new());
        values.push(*sum);
        colors.push(if *sum == 0.0 { 0.0 } else { weighted / sum });
    }

    let trace = Trace::Sunburst(SunburstTrace {
        ids,
        labels,
        parents,
        values,
        branchvalues: "total".to_string(),
        marker: SunburstMarker {
            colors,
            colorscale: vec![
                (0.0, "black".to_string()),
                (1.0, scale_end(metric).to_string()),
            ],
            showscale: true,
            colorbar: ColorBar {
                title: Title {
                    text: metric.label().to_string(),
                },
            },
        },
    });

    let title = format!(
        "Sunburst plot for global {} cases",
        metric.label().to_lowercase()
    );
    let mut layout = dark_layout(title);
    layout.updatemenus = vec![scale_toggle(SERIES_TOGGLE_Y)];

    Figure {
        data: vec![trace],
        layout,
    }
}
