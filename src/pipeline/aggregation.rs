// Batch → AverageSensorData. Pure; no rounding (presentation rounds).

use crate::models::{AverageSensorData, SensorReading};

use super::metrics;

/// Per-field arithmetic mean over the batch. Derived fields are computed from the means,
/// not by averaging per-reading derived values. Empty batch → all zeros.
pub fn calculate_average_readings(readings: &[SensorReading]) -> AverageSensorData {
    if readings.is_empty() {
        return AverageSensorData::default();
    }

    let temperature = mean_of(readings, |r| r.temperature);
    let humidity = mean_of(readings, |r| r.humidity);
    let gas_sensor_primary = mean_of(readings, |r| r.gas_sensor_primary);
    let gas_sensor_secondary = mean_of(readings, |r| r.gas_sensor_secondary);
    let air_sensor = mean_of(readings, |r| r.air_sensor);

    AverageSensorData {
        temperature,
        humidity,
        gas_sensor_primary,
        gas_sensor_secondary,
        air_sensor,
        glucose_estimate: metrics::glucose_estimate(gas_sensor_primary, gas_sensor_secondary),
        air_quality_percentage: metrics::calculate_air_quality_percentage(air_sensor),
    }
}

/// Caller guarantees a non-empty batch.
fn mean_of(readings: &[SensorReading], field: impl Fn(&SensorReading) -> f64) -> f64 {
    readings.iter().map(field).sum::<f64>() / (readings.len() as f64)
}
