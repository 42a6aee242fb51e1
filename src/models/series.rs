use serde::{Deserialize, Serialize};

/// One chart-ready sample, derived from exactly one reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// "HH:MM:SS" in UTC; used as the chart category key, duplicates allowed.
    pub time: String,
    pub temperature: f64,
    pub humidity: f64,
    pub glucose: f64,
    pub air_quality_percentage: f64,
}
