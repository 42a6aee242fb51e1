// Time-series formatter tests: one point per reading, input order, per-point derivation

mod common;

use common::reading;
use healthmon::pipeline::{
    calculate_air_quality_percentage, calculate_average_readings, get_time_series_data,
    glucose_estimate,
};

#[test]
fn empty_readings_give_empty_series() {
    assert!(get_time_series_data(&[]).is_empty());
}

#[test]
fn one_point_per_reading_in_input_order() {
    // Newest first, as the accessor returns them.
    let readings = vec![
        reading(3, 1_700_000_003_000, 22.0, 55.0, 12.0, 18.0, 60.0),
        reading(2, 1_700_000_002_000, 21.0, 52.0, 11.0, 19.0, 55.0),
        reading(1, 1_700_000_001_000, 20.0, 50.0, 10.0, 20.0, 50.0),
    ];
    let series = get_time_series_data(&readings);
    assert_eq!(series.len(), readings.len());
    // 1_700_000_001 s = 2023-11-14T22:13:21Z
    assert_eq!(series[0].time, "22:13:23");
    assert_eq!(series[1].time, "22:13:22");
    assert_eq!(series[2].time, "22:13:21");
    for (point, r) in series.iter().zip(&readings) {
        assert_eq!(point.temperature, r.temperature);
        assert_eq!(point.humidity, r.humidity);
        assert_eq!(
            point.glucose,
            glucose_estimate(r.gas_sensor_primary, r.gas_sensor_secondary)
        );
        assert_eq!(
            point.air_quality_percentage,
            calculate_air_quality_percentage(r.air_sensor)
        );
    }
}

#[test]
fn duplicate_times_are_kept() {
    let readings = vec![
        reading(1, 1_700_000_001_100, 20.0, 50.0, 10.0, 20.0, 50.0),
        reading(2, 1_700_000_001_900, 21.0, 51.0, 10.0, 20.0, 50.0),
    ];
    let series = get_time_series_data(&readings);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].time, series[1].time);
    assert_eq!(series[1].temperature, 21.0);
}

#[test]
fn per_point_path_differs_from_aggregate_path() {
    // Raw air values on both sides of the clamp: per-point percentages are 100 and 0,
    // the aggregate uses the mean raw value (800 → 20 %).
    let readings = vec![
        reading(1, 1_000, 20.0, 50.0, 10.0, 20.0, 0.0),
        reading(2, 2_000, 20.0, 50.0, 12.0, 18.0, 1_600.0),
    ];
    let series = get_time_series_data(&readings);
    assert_eq!(series[0].air_quality_percentage, 100.0);
    assert_eq!(series[1].air_quality_percentage, 0.0);
    assert_eq!(series[0].glucose, 15.0);
    assert_eq!(series[1].glucose, 15.0);

    let summary = calculate_average_readings(&readings);
    assert_eq!(summary.air_quality_percentage, 20.0);
    let mean_of_points = series.iter().map(|p| p.air_quality_percentage).sum::<f64>() / 2.0;
    assert_eq!(mean_of_points, 50.0);
}

#[test]
fn time_is_formatted_in_utc() {
    let series = get_time_series_data(&[reading(1, 0, 20.0, 50.0, 1.0, 1.0, 1.0)]);
    assert_eq!(series[0].time, "00:00:00");
}
