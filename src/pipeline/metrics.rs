// Derived metrics. Every consumer (summary, per-point series, CSV, report) goes through
// these functions; the formulas live nowhere else.

use crate::models::{AirQualityBand, AirQualityStatus};

/// Raw air-sensor (mq135) output that maps to 100 % air quality.
pub const AIR_SENSOR_CLEAN_RAW: f64 = 0.0;
/// Raw air-sensor output at and above which air quality reads 0 %.
pub const AIR_SENSOR_SATURATED_RAW: f64 = 1000.0;

/// Inverse linear map of the raw air-sensor value onto [0, 100].
/// Higher raw output means worse air. Out-of-range noise is clamped; NaN reads as 0 %.
pub fn calculate_air_quality_percentage(air_sensor_raw: f64) -> f64 {
    if air_sensor_raw.is_nan() {
        return 0.0;
    }
    let span = AIR_SENSOR_SATURATED_RAW - AIR_SENSOR_CLEAN_RAW;
    let percentage = 100.0 * (AIR_SENSOR_SATURATED_RAW - air_sensor_raw) / span;
    percentage.clamp(0.0, 100.0)
}

/// Mean of the two gas sensors. No calibration curve, no clamping.
pub fn glucose_estimate(gas_sensor_primary: f64, gas_sensor_secondary: f64) -> f64 {
    (gas_sensor_primary + gas_sensor_secondary) / 2.0
}

/// Total classification of a percentage. Input is clamped to [0, 100] first (NaN → 0);
/// band boundaries belong to the higher band.
pub fn get_air_quality_status(percentage: f64) -> AirQualityStatus {
    let p = if percentage.is_nan() {
        0.0
    } else {
        percentage.clamp(0.0, 100.0)
    };
    let band = if p >= 80.0 {
        AirQualityBand::Excellent
    } else if p >= 60.0 {
        AirQualityBand::Good
    } else if p >= 40.0 {
        AirQualityBand::Moderate
    } else if p >= 20.0 {
        AirQualityBand::Poor
    } else {
        AirQualityBand::Hazardous
    };
    AirQualityStatus::from(band)
}
