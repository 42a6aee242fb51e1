// Reading Store Accessor. The store client is injected, so tests swap in a fake source
// without touching process-wide state.

use std::future::Future;
use std::sync::Arc;

use tracing::instrument;

use crate::error::PipelineError;
use crate::models::SensorReading;

/// Table holding the raw readings.
pub const SENSOR_READINGS_TABLE: &str = "sensor_readings";

/// `fetch_recent(table, limit)`; rows are ordered by timestamp, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentQuery<'a> {
    pub table: &'a str,
    pub limit: u32,
}

/// Query capability of the backing store.
pub trait ReadingSource: Send + Sync {
    fn fetch_recent(
        &self,
        query: RecentQuery<'_>,
    ) -> impl Future<Output = anyhow::Result<Vec<SensorReading>>> + Send;
}

pub struct ReadingAccessor<S> {
    source: Arc<S>,
    table: String,
}

impl<S> Clone for ReadingAccessor<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            table: self.table.clone(),
        }
    }
}

impl<S: ReadingSource> ReadingAccessor<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self::with_table(source, SENSOR_READINGS_TABLE)
    }

    pub fn with_table(source: Arc<S>, table: impl Into<String>) -> Self {
        Self {
            source,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// The `limit` most recent readings, newest first. Fewer rows than `limit` is not an
    /// error. Store failures surface as DataUnavailable.
    #[instrument(skip(self), fields(operation = "get_latest_readings", table = %self.table))]
    pub async fn get_latest_readings(
        &self,
        limit: u32,
    ) -> Result<Vec<SensorReading>, PipelineError> {
        if limit == 0 {
            return Err(PipelineError::InvalidLimit);
        }
        let query = RecentQuery {
            table: &self.table,
            limit,
        };
        let mut readings = self
            .source
            .fetch_recent(query)
            .await
            .map_err(|e| PipelineError::DataUnavailable(format!("{e:#}")))?;
        readings.truncate(limit as usize);
        tracing::debug!(readings_count = readings.len(), "fetched latest readings");
        Ok(readings)
    }
}
