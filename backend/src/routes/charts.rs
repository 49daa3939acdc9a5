use serde::{Deserialize, Serialize};
use serde_json::Value;

// =========================================================
// Plotly figure description types
// =========================================================

/// A complete figure: traces plus layout, handed to plotly.js verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// One trace of a figure, tagged with its plotly `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Bar(BarTrace),
    Choropleth(ChoroplethTrace),
    Sunburst(SunburstTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethTrace {
    pub locations: Vec<String>,
    pub z: Vec<f64>,
    pub text: Vec<String>,
    pub colorscale: String,
    pub marker: Marker,
    pub colorbar: ColorBar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunburstTrace {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<f64>,
    pub branchvalues: String,
    pub marker: SunburstMarker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunburstMarker {
    pub colors: Vec<f64>,
    /// `(position, color)` stops.
    pub colorscale: Vec<(f64, String)>,
    pub showscale: bool,
    pub colorbar: ColorBar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub color: String,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<XAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosize: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub updatemenus: Vec<UpdateMenu>,
    pub font: Font,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XAxis {
    pub rangeslider: RangeSlider,
    pub rangeselector: RangeSelector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSlider {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSelector {
    pub buttons: Vec<RangeButton>,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeButton {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stepmode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub projection: Projection,
    pub bgcolor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Button row that relayouts the figure (the Linear/Log toggle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMenu {
    pub buttons: Vec<MenuButton>,
    pub direction: String,
    pub pad: Pad,
    pub showactive: bool,
    pub x: f64,
    pub xanchor: String,
    pub y: f64,
    pub yanchor: String,
    pub bgcolor: String,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuButton {
    pub label: String,
    pub method: String,
    pub args: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub r: u32,
    pub t: u32,
}

// =========================================================
// Chart set + routes
// =========================================================

/// Per-metric figures in case order: confirmed, recovered, deceased, active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFigures {
    pub confirmed: Figure,
    pub recovered: Figure,
    pub deceased: Figure,
    pub active: Figure,
}

impl CaseFigures {
    pub fn get(&self, metric: crate::models::Metric) -> &Figure {
        use crate::models::Metric;
        match metric {
            Metric::Confirmed => &self.confirmed,
            Metric::Recovered => &self.recovered,
            Metric::Deaths => &self.deceased,
            Metric::Active => &self.active,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Figure> {
        [&self.confirmed, &self.recovered, &self.deceased, &self.active].into_iter()
    }
}

/// The thirteen slots refreshed together on submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    pub bar: Figure,
    pub cumulative: CaseFigures,
    pub daily: CaseFigures,
    pub rate: CaseFigures,
}

impl ChartSet {
    pub const SLOT_COUNT: usize = 13;

    /// All figures in slot order.
    pub fn figures(&self) -> Vec<&Figure> {
        std::iter::once(&self.bar)
            .chain(self.cumulative.iter())
            .chain(self.daily.iter())
            .chain(self.rate.iter())
            .collect()
    }
}

/// Raw control values as the page submits them. Every field is optional and
/// validated by the view controller; nothing here is trusted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Number or numeric string.
    pub top: Option<Value>,
    pub order: Option<String>,
    pub metric: Option<String>,
    pub country: Option<String>,
    pub tab: Option<String>,
}

/// Chart set plus the filters it was computed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartsResponse {
    pub filtered: bool,
    pub filters: crate::models::ViewFilters,
    pub snapshot_version: u64,
    pub charts: ChartSet,
}

pub const GET_CHARTS: &str = "/charts";
pub const POST_CHARTS: &str = "/charts";
pub const GET_MAP: &str = "/map";
pub const GET_SUNBURST: &str = "/sunburst/{metric}";
