// Shared test helpers
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use healthmon::accessor::{ReadingSource, RecentQuery};
use healthmon::models::{ReadingRecord, SensorReading};
use std::sync::Mutex;

pub fn ts(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap()
}

pub fn reading(
    id: i64,
    millis: i64,
    temperature: f64,
    humidity: f64,
    gas_primary: f64,
    gas_secondary: f64,
    air: f64,
) -> SensorReading {
    SensorReading {
        id,
        timestamp: ts(millis),
        temperature,
        humidity,
        gas_sensor_primary: gas_primary,
        gas_sensor_secondary: gas_secondary,
        air_sensor: air,
    }
}

pub fn record(millis: i64, temperature: f64, humidity: f64, air: f64) -> ReadingRecord {
    ReadingRecord {
        id: None,
        timestamp: Some(ts(millis)),
        temperature,
        humidity,
        mq3_1: 10.0,
        mq3_2: 20.0,
        mq135: air,
    }
}

/// In-memory ReadingSource. Keeps rows newest first and records every query it receives.
pub struct FakeSource {
    rows: Vec<SensorReading>,
    pub fail: bool,
    pub queries: Mutex<Vec<(String, u32)>>,
}

impl FakeSource {
    pub fn new(mut rows: Vec<SensorReading>) -> Self {
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Self {
            rows,
            fail: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            rows: Vec::new(),
            fail: true,
            queries: Mutex::new(Vec::new()),
        }
    }
}

impl ReadingSource for FakeSource {
    async fn fetch_recent(&self, query: RecentQuery<'_>) -> anyhow::Result<Vec<SensorReading>> {
        self.queries
            .lock()
            .unwrap()
            .push((query.table.to_string(), query.limit));
        anyhow::ensure!(!self.fail, "connection refused");
        Ok(self
            .rows
            .iter()
            .take(query.limit as usize)
            .cloned()
            .collect())
    }
}
