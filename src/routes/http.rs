// HTTP handlers: version, readings, summary/series from the monitor, exports, ingestion

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use super::AppState;
use crate::error::PipelineError;
use crate::export::{self, DeviceVitals, ReportInput};
use crate::feed::InsertEvent;
use crate::models::ReadingRecord;
use crate::monitor::MonitorSnapshot;
use crate::pipeline;
use crate::version::{NAME, VERSION};

#[derive(Debug, Deserialize)]
pub(super) struct LimitQuery {
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ReportQuery {
    limit: Option<u32>,
    heart_rate: Option<f64>,
    body_temperature: Option<f64>,
    activity: Option<f64>,
    battery: Option<f64>,
}

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/readings/latest?limit=N — newest first.
pub(super) async fn latest_readings_handler(
    State(state): State<AppState>,
    Query(q): Query<LimitQuery>,
) -> Result<impl IntoResponse, PipelineError> {
    let limit = q.limit.unwrap_or(state.config.monitoring.reading_limit);
    let readings = state.accessor.get_latest_readings(limit).await?;
    Ok(Json(readings))
}

fn current_snapshot(state: &AppState) -> Result<Arc<MonitorSnapshot>, PipelineError> {
    state
        .snapshot_rx
        .borrow()
        .clone()
        .ok_or_else(|| PipelineError::DataUnavailable("no readings fetched yet".into()))
}

/// GET /api/summary — averages and air-quality status of the latest monitor pass.
pub(super) async fn summary_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, PipelineError> {
    let snapshot = current_snapshot(&state)?;
    Ok(Json(serde_json::json!({
        "fetchedAt": snapshot.fetched_at,
        "readingCount": snapshot.reading_count,
        "summary": snapshot.summary,
        "status": snapshot.status,
    })))
}

/// GET /api/series — chart points of the latest monitor pass, oldest first.
pub(super) async fn series_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, PipelineError> {
    let snapshot = current_snapshot(&state)?;
    Ok(Json(snapshot.series.clone()))
}

/// GET /api/export/csv?limit=N — download of the most recent readings.
pub(super) async fn export_csv_handler(
    State(state): State<AppState>,
    Query(q): Query<LimitQuery>,
) -> Result<impl IntoResponse, PipelineError> {
    let limit = q.limit.unwrap_or(state.config.monitoring.reading_limit);
    let readings = state.accessor.get_latest_readings(limit).await?;
    let body = export::export_readings_to_csv(&readings);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::csv_file_name(Utc::now())
    );
    tracing::info!(
        operation = "export_csv",
        readings_count = readings.len(),
        "CSV export"
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// GET /api/export/pdf?limit=N&heart_rate=..&body_temperature=..&activity=..&battery=.. — health report download.
pub(super) async fn export_pdf_handler(
    State(state): State<AppState>,
    Query(q): Query<ReportQuery>,
) -> Result<impl IntoResponse, PipelineError> {
    let limit = q.limit.unwrap_or(state.config.monitoring.reading_limit);
    let readings = state.accessor.get_latest_readings(limit).await?;
    let summary = pipeline::calculate_average_readings(&readings);
    let trend = pipeline::get_time_series_data(&readings);
    let now = Utc::now();
    let body = export::generate_health_report_pdf(&ReportInput {
        summary: &summary,
        trend: &trend,
        vitals: DeviceVitals {
            heart_rate: q.heart_rate,
            body_temperature: q.body_temperature,
            activity: q.activity,
            battery: q.battery,
        },
        reading_count: readings.len(),
        generated_at: now,
        trend_rows: state.config.report.trend_rows,
    })?;
    let disposition = format!("attachment; filename=\"{}\"", export::pdf_file_name(now));
    tracing::info!(
        operation = "export_pdf",
        readings_count = readings.len(),
        bytes = body.len(),
        "PDF export"
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// POST /api/readings — ingestion ingress: validate, append, announce on the insert feed.
pub(super) async fn ingest_handler(
    State(state): State<AppState>,
    Json(record): Json<ReadingRecord>,
) -> Result<impl IntoResponse, PipelineError> {
    record.validate(Utc::now())?;
    let reading = state
        .repo
        .append_reading(&record)
        .await
        .map_err(|e| PipelineError::DataUnavailable(format!("{e:#}")))?;
    let row = serde_json::to_value(ReadingRecord::from(&reading))
        .map_err(|e| PipelineError::MalformedPayload(e.to_string()))?;
    let receivers = state.feed.publish(InsertEvent {
        table: state.config.feed.table.clone(),
        record: row,
    });
    tracing::debug!(id = reading.id, receivers, "reading appended");
    Ok((StatusCode::CREATED, Json(reading)))
}
