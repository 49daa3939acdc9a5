use serde::{Deserialize, Serialize};

// =========================================================
// Summary card types + route
// =========================================================

/// Whole-world scalar statistics for the latest refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub total_confirmed: i64,
    pub total_recovered: i64,
    pub total_deaths: i64,
    pub total_active: i64,
    pub change_confirmed: i64,
    pub change_recovered: i64,
    pub change_deaths: i64,
    pub change_active: i64,
    pub active_rate: f64,
    pub recovery_rate: f64,
    pub mortality_rate: f64,
    pub cases_per_million: f64,
}

/// One of the four headline cards (`+1,234` over `56,789`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCard {
    pub title: String,
    pub change: String,
    pub total: String,
}

/// Cards plus the raw numbers behind them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryData {
    pub cards: Vec<SummaryCard>,
    pub metrics: DerivedMetrics,
}

pub const GET_SUMMARY: &str = "/summary";
