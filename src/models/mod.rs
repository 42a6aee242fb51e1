// Domain models for sensor readings and everything derived from them

mod reading;
mod series;
mod status;
mod summary;

pub use reading::{MAX_CLOCK_SKEW_MS, ReadingRecord, SensorReading};
pub use series::TimeSeriesPoint;
pub use status::{AirQualityBand, AirQualityStatus};
pub use summary::AverageSensorData;
