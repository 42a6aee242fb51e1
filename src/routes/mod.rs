// HTTP + WebSocket routes

mod http;
mod ws;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::accessor::ReadingAccessor;
use crate::config::AppConfig;
use crate::feed::ChangeFeed;
use crate::monitor::SnapshotReceiver;
use crate::reading_repo::ReadingRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) repo: Arc<ReadingRepo>,
    pub(crate) accessor: ReadingAccessor<ReadingRepo>,
    pub(crate) feed: ChangeFeed,
    pub(crate) snapshot_rx: SnapshotReceiver,
    pub(crate) config: AppConfig,
}

pub fn app(
    repo: Arc<ReadingRepo>,
    feed: ChangeFeed,
    snapshot_rx: SnapshotReceiver,
    config: AppConfig,
) -> Router {
    let accessor = ReadingAccessor::with_table(repo.clone(), config.feed.table.clone());
    let state = AppState {
        repo,
        accessor,
        feed,
        snapshot_rx,
        config,
    };
    Router::new()
        .route("/", get(|| async { crate::version::banner() })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/readings", post(http::ingest_handler)) // POST /api/readings
        .route("/api/readings/latest", get(http::latest_readings_handler)) // GET /api/readings/latest
        .route("/api/summary", get(http::summary_handler)) // GET /api/summary
        .route("/api/series", get(http::series_handler)) // GET /api/series
        .route("/api/export/csv", get(http::export_csv_handler)) // GET /api/export/csv
        .route("/api/export/pdf", get(http::export_pdf_handler)) // GET /api/export/pdf
        .route("/ws/readings", get(ws::ws_readings)) // WS /ws/readings
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
