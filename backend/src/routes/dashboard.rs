use serde::{Deserialize, Serialize};

use super::charts::{CaseFigures, ChartsResponse, Figure};
use super::summary::SummaryData;
use super::table::{CountryList, TableData};

// =========================================================
// Full page payload + route
// =========================================================

/// Everything the page needs on first load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub summary: SummaryData,
    pub table: TableData,
    pub countries: CountryList,
    pub map: Figure,
    pub sunbursts: CaseFigures,
    pub charts: ChartsResponse,
    pub refreshed_at: chrono::DateTime<chrono::Utc>,
    /// e.g. `The data was last updated 3 hours ago.`
    pub last_update: String,
}

pub const GET_DASHBOARD: &str = "/dashboard";

/// Footer line under the side table.
pub fn last_update_message(hours: i64) -> String {
    match hours {
        0 => "The data was last updated less than an hour ago.".to_string(),
        1 => "The data was last updated 1 hour ago.".to_string(),
        n => format!("The data was last updated {} hours ago.", n),
    }
}
