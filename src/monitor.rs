// Background monitor: polling tick and insert notifications both converge on one
// fetch-then-recompute pass. Last write wins; a failed fetch keeps the previous snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Notify, oneshot, watch};
use tokio::time::{Duration, interval};
use tracing::Instrument;

use crate::accessor::{ReadingAccessor, ReadingSource};
use crate::error::PipelineError;
use crate::feed::ChangeFeed;
use crate::models::{AirQualityStatus, AverageSensorData, SensorReading, TimeSeriesPoint};
use crate::pipeline;

/// Everything the dashboards render for one fetch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub reading_count: usize,
    /// Newest first, as fetched.
    pub readings: Vec<SensorReading>,
    pub summary: AverageSensorData,
    pub status: AirQualityStatus,
    /// Oldest first, for left-to-right charts.
    pub series: Vec<TimeSeriesPoint>,
}

impl MonitorSnapshot {
    pub fn from_readings(readings: Vec<SensorReading>, fetched_at: DateTime<Utc>) -> Self {
        let summary = pipeline::calculate_average_readings(&readings);
        let status = pipeline::get_air_quality_status(summary.air_quality_percentage);
        let mut series = pipeline::get_time_series_data(&readings);
        series.reverse();
        Self {
            fetched_at,
            reading_count: readings.len(),
            readings,
            summary,
            status,
            series,
        }
    }
}

pub type SnapshotSender = watch::Sender<Option<Arc<MonitorSnapshot>>>;
pub type SnapshotReceiver = watch::Receiver<Option<Arc<MonitorSnapshot>>>;

/// Accessor, feed, output channel and shutdown for the monitor.
pub struct MonitorDeps<S> {
    pub accessor: ReadingAccessor<S>,
    pub feed: ChangeFeed,
    pub snapshot_tx: SnapshotSender,
    pub shutdown_rx: oneshot::Receiver<()>,
}

/// Zero intervals are raised to the smallest tick (1 ms poll, 1 s stats).
pub struct MonitorConfig {
    pub poll_interval_ms: u64,
    pub reading_limit: u32,
    /// How often to log monitor stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// One fetch-and-recompute pass.
pub async fn refresh<S: ReadingSource>(
    accessor: &ReadingAccessor<S>,
    limit: u32,
) -> Result<MonitorSnapshot, PipelineError> {
    let readings = accessor.get_latest_readings(limit).await?;
    Ok(MonitorSnapshot::from_readings(readings, Utc::now()))
}

pub fn spawn<S: ReadingSource + 'static>(
    deps: MonitorDeps<S>,
    config: MonitorConfig,
) -> tokio::task::JoinHandle<()> {
    let MonitorDeps {
        accessor,
        feed,
        snapshot_tx,
        mut shutdown_rx,
    } = deps;
    let MonitorConfig {
        poll_interval_ms,
        reading_limit,
        stats_log_interval_secs,
    } = config;

    let insert_signal = Arc::new(Notify::new());
    let feed_handle = {
        let on_insert = insert_signal.clone();
        let on_lag = insert_signal.clone();
        // Payload is discarded; an insert only means "re-fetch". Skipped events may
        // have been inserts, so a lag re-fetches too.
        feed.watch_inserts(
            accessor.table(),
            move |_reading| on_insert.notify_one(),
            move |_skipped| on_lag.notify_one(),
        )
    };

    tokio::spawn(async move {
        let mut poll_tick = interval(Duration::from_millis(poll_interval_ms.max(1)));
        poll_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs.max(1)));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut refreshes_total: u64 = 0;
        let mut refresh_failures_total: u64 = 0;
        let mut insert_triggers_total: u64 = 0;

        loop {
            let trigger = tokio::select! {
                _ = poll_tick.tick() => "poll",
                _ = insert_signal.notified() => {
                    insert_triggers_total += 1;
                    "insert"
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        refreshes_total,
                        refresh_failures_total,
                        insert_triggers_total,
                        "monitor stats"
                    );
                    continue;
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Monitor shutting down");
                    break;
                }
            };

            match refresh(&accessor, reading_limit).await {
                Ok(snapshot) => {
                    refreshes_total += 1;
                    tracing::debug!(
                        trigger,
                        readings_count = snapshot.reading_count,
                        "snapshot refreshed"
                    );
                    snapshot_tx.send_replace(Some(Arc::new(snapshot)));
                }
                Err(e) => {
                    refresh_failures_total += 1;
                    tracing::warn!(
                        error = %e,
                        trigger,
                        operation = "refresh",
                        "refresh failed; keeping previous snapshot"
                    );
                }
            }
        }
        feed_handle.abort();
    }
    .instrument(tracing::debug_span!("monitor", poll_interval_ms)))
}
