// Aggregation and derived-metrics pipeline: synchronous, side-effect free stages.

pub mod aggregation;
pub mod metrics;
pub mod series;

pub use aggregation::calculate_average_readings;
pub use metrics::{calculate_air_quality_percentage, get_air_quality_status, glucose_estimate};
pub use series::get_time_series_data;
