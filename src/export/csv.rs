// CSV export. All columns are numeric or fixed-format dates, so no quoting is needed;
// a free-text column would have to add it.

use crate::models::SensorReading;
use crate::pipeline::metrics;

pub const CSV_HEADER: &str = "Timestamp,Temperature,Humidity,Glucose,Air Quality (%)";
/// Full datetime column format (UTC).
pub const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// UTF-8 CSV, one row per reading in input order. Empty input → header line only.
pub fn export_readings_to_csv(readings: &[SensorReading]) -> Vec<u8> {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + readings.len() * 48);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for r in readings {
        out.push_str(&format!(
            "{},{:.2},{:.2},{:.2},{:.1}\n",
            r.timestamp.format(CSV_DATETIME_FORMAT),
            r.temperature,
            r.humidity,
            metrics::glucose_estimate(r.gas_sensor_primary, r.gas_sensor_secondary),
            metrics::calculate_air_quality_percentage(r.air_sensor),
        ));
    }
    out.into_bytes()
}
