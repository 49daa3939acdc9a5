//! Chart builders: pure functions from prepared tables and display options
//! to Plotly figure descriptions.

pub mod geo;
pub mod ranking;
pub mod style;
pub mod timeseries;

#[cfg(test)]
#[path = "charts_tests.rs"]
mod charts_tests;

pub use geo::{sunburst_chart, world_map};
pub use ranking::ranked_bar_chart;
pub use timeseries::{cumulative_chart, daily_chart, rate_chart};
