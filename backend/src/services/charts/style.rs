//! Shared look of every figure: dark template, case palette, the Linear/Log
//! toggle and the date range controls.

use serde_json::json;

use crate::api::{
    Font, Layout, MenuButton, Pad, RangeButton, RangeSelector, RangeSlider, Title, UpdateMenu,
    XAxis,
};
use crate::models::Metric;

/// Paper color of plotly's dark template.
pub const DARK_PAPER: &str = "rgb(17,17,17)";
pub const TRANSPARENT_PLOT: &str = "rgba(100,100,100,0)";
pub const MENU_BACKGROUND: &str = "rgba(100,100,100,0.2)";

/// Toggle offsets below the plot area.
pub const BAR_TOGGLE_Y: f64 = -0.7;
pub const SERIES_TOGGLE_Y: f64 = -0.6;

pub fn case_color(metric: Metric) -> &'static str {
    match metric {
        Metric::Confirmed => "rgba(156, 58, 255, 1)",
        Metric::Recovered => "rgba(80, 247, 138, 1)",
        Metric::Deaths => "rgba(247, 80, 80, 1)",
        Metric::Active => "rgba(253, 241, 73, 1)",
    }
}

/// Same `rgba(...)` color with its alpha replaced.
pub fn hue(color: &str, alpha: f64) -> String {
    match color.rfind(',') {
        Some(idx) => format!("{}, {})", &color[..idx], alpha),
        None => color.to_string(),
    }
}

fn font(color: &str) -> Font {
    Font {
        color: color.to_string(),
        size: 12,
    }
}

/// Dark layout with white text and nothing else set.
pub fn dark_layout(title: impl Into<String>) -> Layout {
    Layout {
        title: Some(Title { text: title.into() }),
        barmode: None,
        hovermode: None,
        xaxis: None,
        geo: None,
        height: None,
        autosize: None,
        updatemenus: vec![],
        font: font("white"),
        paper_bgcolor: DARK_PAPER.to_string(),
        plot_bgcolor: DARK_PAPER.to_string(),
    }
}

/// Linear/Log y-axis switch placed `y` below the plot.
pub fn scale_toggle(y: f64) -> UpdateMenu {
    let button = |label: &str, kind: &str| MenuButton {
        label: label.to_string(),
        method: "relayout".to_string(),
        args: vec![json!({ "yaxis.type": kind })],
    };
    UpdateMenu {
        buttons: vec![button("Linear", "linear"), button("Log", "log")],
        direction: "right".to_string(),
        pad: Pad { r: 10, t: 10 },
        showactive: true,
        x: 0.0,
        xanchor: "left".to_string(),
        y,
        yanchor: "top".to_string(),
        bgcolor: MENU_BACKGROUND.to_string(),
        font: font("#777"),
    }
}

/// Range slider plus the 7d / 1m / 3m / all selector.
pub fn date_range_axis() -> XAxis {
    let back = |count: u32, label: &str, step: &str| RangeButton {
        count: Some(count),
        label: Some(label.to_string()),
        step: step.to_string(),
        stepmode: Some("backward".to_string()),
    };
    XAxis {
        rangeslider: RangeSlider { visible: true },
        rangeselector: RangeSelector {
            buttons: vec![
                back(7, "7d", "day"),
                back(1, "1m", "month"),
                back(3, "3m", "month"),
                RangeButton {
                    count: None,
                    label: None,
                    step: "all".to_string(),
                    stepmode: None,
                },
            ],
            font: font("black"),
        },
    }
}

/// Layout for plots with axes: transparent plot area and the scale toggle.
pub fn axis_layout(title: impl Into<String>, toggle_y: f64) -> Layout {
    Layout {
        updatemenus: vec![scale_toggle(toggle_y)],
        plot_bgcolor: TRANSPARENT_PLOT.to_string(),
        ..dark_layout(title)
    }
}
