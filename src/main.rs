use anyhow::Result;
use healthmon::*;
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(service = version::NAME, version = version::VERSION, "starting");

    let reading_repo = Arc::new(
        reading_repo::ReadingRepo::connect(
            &app_config.database.path,
            app_config.database.max_pool_size,
        )
        .await?,
    );
    reading_repo.init().await?;

    let feed = feed::ChangeFeed::new(app_config.feed.broadcast_capacity);
    let (snapshot_tx, snapshot_rx) = watch::channel(None);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let monitor_handle = monitor::spawn(
        monitor::MonitorDeps {
            accessor: accessor::ReadingAccessor::with_table(
                reading_repo.clone(),
                app_config.feed.table.clone(),
            ),
            feed: feed.clone(),
            snapshot_tx,
            shutdown_rx,
        },
        monitor::MonitorConfig {
            poll_interval_ms: app_config.monitoring.poll_interval_ms,
            reading_limit: app_config.monitoring.reading_limit,
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
        },
    );

    let app = routes::app(reading_repo, feed, snapshot_rx, app_config.clone());
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = async {
            #[cfg(unix)]
            {
                let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                    Ok(s) => s,
                    Err(_) => {
                        let _ = tokio::signal::ctrl_c().await;
                        return;
                    }
                };
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            #[cfg(not(unix))]
            {
                let _ = tokio::signal::ctrl_c().await;
            }
        } => {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
            let _ = monitor_handle.await;
        }
    }

    Ok(())
}
