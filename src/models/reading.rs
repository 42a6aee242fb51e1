// Raw sensor readings: the validated domain shape and the store/feed row shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Readings stamped up to this far ahead of the ingesting host are accepted (clock skew).
pub const MAX_CLOCK_SKEW_MS: i64 = 5_000;

/// One raw observation. Immutable once stored; the table is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    /// °C
    pub temperature: f64,
    /// % relative humidity
    pub humidity: f64,
    pub gas_sensor_primary: f64,
    pub gas_sensor_secondary: f64,
    pub air_sensor: f64,
}

/// Row shape used by the reading table, the ingestion ingress and the insert feed.
/// Column names follow the device firmware (mq3_1, mq3_2, mq135).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    pub temperature: f64,
    pub humidity: f64,
    pub mq3_1: f64,
    pub mq3_2: f64,
    pub mq135: f64,
}

impl ReadingRecord {
    fn measurements(&self) -> [(&'static str, f64); 5] {
        [
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("mq3_1", self.mq3_1),
            ("mq3_2", self.mq3_2),
            ("mq135", self.mq135),
        ]
    }

    /// Checks the SensorReading invariants: finite, non-negative values and no future timestamp.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), PipelineError> {
        for (name, value) in self.measurements() {
            if !value.is_finite() {
                return Err(PipelineError::MalformedPayload(format!(
                    "{name} is not a finite number"
                )));
            }
            if value < 0.0 {
                return Err(PipelineError::MalformedPayload(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if let Some(ts) = self.timestamp
            && (ts - now).num_milliseconds() > MAX_CLOCK_SKEW_MS
        {
            return Err(PipelineError::MalformedPayload(format!(
                "timestamp {} is in the future",
                ts.to_rfc3339()
            )));
        }
        Ok(())
    }

    /// Converts a stored row (id and timestamp present) into a SensorReading.
    pub fn into_reading(self, now: DateTime<Utc>) -> Result<SensorReading, PipelineError> {
        self.validate(now)?;
        let id = self
            .id
            .ok_or_else(|| PipelineError::MalformedPayload("missing id".into()))?;
        let timestamp = self
            .timestamp
            .ok_or_else(|| PipelineError::MalformedPayload("missing timestamp".into()))?;
        Ok(SensorReading {
            id,
            timestamp,
            temperature: self.temperature,
            humidity: self.humidity,
            gas_sensor_primary: self.mq3_1,
            gas_sensor_secondary: self.mq3_2,
            air_sensor: self.mq135,
        })
    }
}

impl From<&SensorReading> for ReadingRecord {
    fn from(r: &SensorReading) -> Self {
        Self {
            id: Some(r.id),
            timestamp: Some(r.timestamp),
            temperature: r.temperature,
            humidity: r.humidity,
            mq3_1: r.gas_sensor_primary,
            mq3_2: r.gas_sensor_secondary,
            mq135: r.air_sensor,
        }
    }
}
