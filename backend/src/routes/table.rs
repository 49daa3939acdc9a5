use serde::{Deserialize, Serialize};

// =========================================================
// Snapshot table types + routes
// =========================================================

/// Four metrics for one country at the most recent date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnapshotRow {
    pub country: String,
    pub confirmed: i64,
    pub recovered: i64,
    pub deaths: i64,
    pub active: i64,
}

impl SnapshotRow {
    pub fn metric(&self, metric: crate::models::Metric) -> i64 {
        use crate::models::Metric;
        match metric {
            Metric::Confirmed => self.confirmed,
            Metric::Recovered => self.recovered,
            Metric::Deaths => self.deaths,
            Metric::Active => self.active,
        }
    }
}

/// Side-table row; unreported figures are shown as `-`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableRow {
    pub country: String,
    pub confirmed: String,
    pub recovered: String,
    pub deaths: String,
    pub active: String,
}

/// Ranked side table, highest confirmed first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub as_of: Option<chrono::NaiveDate>,
    pub rows: Vec<TableRow>,
}

/// Countries offered by the lookup box, `Global` last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryList {
    pub countries: Vec<String>,
    pub default_country: String,
}

pub const GET_TABLE: &str = "/table";
pub const GET_COUNTRIES: &str = "/countries";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Metric;

    #[test]
    fn test_snapshot_row_metric_accessor() {
        let row = SnapshotRow {
            country: "Peru".into(),
            confirmed: 10,
            recovered: 6,
            deaths: 1,
            active: 3,
        };
        assert_eq!(row.metric(Metric::Confirmed), 10);
        assert_eq!(row.metric(Metric::Recovered), 6);
        assert_eq!(row.metric(Metric::Deaths), 1);
        assert_eq!(row.metric(Metric::Active), 3);
    }

    #[test]
    fn test_snapshot_row_uses_column_labels() {
        let row = SnapshotRow {
            country: "Peru".into(),
            confirmed: 10,
            recovered: 6,
            deaths: 1,
            active: 3,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Country"], "Peru");
        assert_eq!(json["Deaths"], 1);
    }
}
