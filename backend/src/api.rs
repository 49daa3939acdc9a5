//! Public API surface for the dashboard backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::charts::BarTrace;
pub use crate::routes::charts::CaseFigures;
pub use crate::routes::charts::ChartRequest;
pub use crate::routes::charts::ChartSet;
pub use crate::routes::charts::ChartsResponse;
pub use crate::routes::charts::ChoroplethTrace;
pub use crate::routes::charts::ColorBar;
pub use crate::routes::charts::Figure;
pub use crate::routes::charts::Font;
pub use crate::routes::charts::Geo;
pub use crate::routes::charts::Layout;
pub use crate::routes::charts::Line;
pub use crate::routes::charts::Marker;
pub use crate::routes::charts::MenuButton;
pub use crate::routes::charts::Pad;
pub use crate::routes::charts::Projection;
pub use crate::routes::charts::RangeButton;
pub use crate::routes::charts::RangeSelector;
pub use crate::routes::charts::RangeSlider;
pub use crate::routes::charts::ScatterTrace;
pub use crate::routes::charts::SunburstMarker;
pub use crate::routes::charts::SunburstTrace;
pub use crate::routes::charts::Title;
pub use crate::routes::charts::Trace;
pub use crate::routes::charts::UpdateMenu;
pub use crate::routes::charts::XAxis;
pub use crate::routes::dashboard::DashboardData;
pub use crate::routes::summary::DerivedMetrics;
pub use crate::routes::summary::SummaryCard;
pub use crate::routes::summary::SummaryData;
pub use crate::routes::table::CountryList;
pub use crate::routes::table::SnapshotRow;
pub use crate::routes::table::TableData;
pub use crate::routes::table::TableRow;

pub use crate::models::{CountryScope, Metric, SortOrder, TopN, ViewFilters};
