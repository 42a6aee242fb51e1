// Batch summary: per-field means plus metrics derived from those means.

use serde::{Deserialize, Serialize};

/// Transient; recomputed on every fetch and never persisted.
/// All fields are zero for an empty batch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageSensorData {
    pub temperature: f64,
    pub humidity: f64,
    pub gas_sensor_primary: f64,
    pub gas_sensor_secondary: f64,
    pub air_sensor: f64,
    pub glucose_estimate: f64,
    pub air_quality_percentage: f64,
}
