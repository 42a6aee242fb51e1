// Readings → chart-ready points. One point per reading, input order preserved;
// callers reverse for left-to-right chronological charts.

use crate::models::{SensorReading, TimeSeriesPoint};

use super::metrics;

/// Clock format of `TimeSeriesPoint::time` (UTC, locale independent).
pub const TIME_FORMAT: &str = "%H:%M:%S";

pub fn get_time_series_data(readings: &[SensorReading]) -> Vec<TimeSeriesPoint> {
    readings.iter().map(to_point).collect()
}

fn to_point(r: &SensorReading) -> TimeSeriesPoint {
    TimeSeriesPoint {
        time: r.timestamp.format(TIME_FORMAT).to_string(),
        temperature: r.temperature,
        humidity: r.humidity,
        glucose: metrics::glucose_estimate(r.gas_sensor_primary, r.gas_sensor_secondary),
        air_quality_percentage: metrics::calculate_air_quality_percentage(r.air_sensor),
    }
}
