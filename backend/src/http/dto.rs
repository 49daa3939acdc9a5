//! Data Transfer Objects for the HTTP API.
//!
//! Most response DTOs are re-exported from the routes module since they
//! already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Charts
    CaseFigures, ChartRequest, ChartSet, ChartsResponse, Figure,
    // Page
    DashboardData,
    // Summary
    DerivedMetrics, SummaryCard, SummaryData,
    // Table
    CountryList, TableData, TableRow,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
    /// Installed snapshot version
    pub snapshot_version: u64,
    /// Latest date in the data, if any
    pub data_as_of: Option<chrono::NaiveDate>,
    /// When the snapshot was installed
    pub refreshed_at: chrono::DateTime<chrono::Utc>,
}
