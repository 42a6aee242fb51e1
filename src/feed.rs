// Insert change feed. Payloads are untyped JSON rows; they are parsed into SensorReading
// at this boundary and malformed ones are dropped with a warning.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::PipelineError;
use crate::models::{ReadingRecord, SensorReading};

/// One row appended to `table`, as delivered by the change feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertEvent {
    pub table: String,
    pub record: serde_json::Value,
}

#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<InsertEvent>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Returns the number of subscribers that will see the event (0 when nobody listens).
    pub fn publish(&self, event: InsertEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InsertEvent> {
        self.tx.subscribe()
    }

    /// Invokes `callback` with each valid reading inserted into `table`.
    /// The subscription is taken before this returns, so no event published afterwards is missed.
    pub fn on_insert<F>(&self, table: &str, callback: F) -> tokio::task::JoinHandle<()>
    where
        F: Fn(SensorReading) + Send + 'static,
    {
        self.watch_inserts(table, callback, |_| {})
    }

    /// `on_insert`, plus `on_lag(skipped)` whenever this subscriber fell behind and the
    /// channel dropped events it never saw (inserts to `table` may be among them).
    pub fn watch_inserts<F, L>(
        &self,
        table: &str,
        on_insert: F,
        on_lag: L,
    ) -> tokio::task::JoinHandle<()>
    where
        F: Fn(SensorReading) + Send + 'static,
        L: Fn(u64) + Send + 'static,
    {
        let mut rx = self.subscribe();
        let table = table.to_string();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) if event.table == table => match parse_insert_payload(&event.record) {
                        Ok(reading) => on_insert(reading),
                        Err(e) => {
                            tracing::warn!(error = %e, table = %table, "dropping insert event");
                        }
                    },
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(table = %table, skipped = n, "insert feed subscriber lagged");
                        on_lag(n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            tracing::debug!(table = %table, "insert feed closed");
        })
    }
}

/// Untyped feed row → SensorReading. Rejects missing or mistyped fields, negative or
/// non-finite values and future timestamps.
pub fn parse_insert_payload(record: &serde_json::Value) -> Result<SensorReading, PipelineError> {
    let row = ReadingRecord::deserialize(record)
        .map_err(|e| PipelineError::MalformedPayload(e.to_string()))?;
    row.into_reading(Utc::now())
}
