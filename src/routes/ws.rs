// WebSocket push of monitor snapshots

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use tokio::time::{Duration, timeout};

use super::AppState;
use crate::monitor::SnapshotReceiver;

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

pub(super) async fn ws_readings(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let rx = state.snapshot_rx.clone();
    ws.on_upgrade(move |socket| async move {
        if let Err(e) = stream_snapshots(socket, rx).await {
            tracing::info!("Readings stream error: {}", e);
        }
    })
}

async fn send_text(socket: &mut WebSocket, json: String) -> bool {
    let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Text(json.into()))).await;
    matches!(r, Ok(Ok(())))
}

/// Sends the current snapshot (if any) on connect, then every new one.
async fn stream_snapshots(mut socket: WebSocket, mut rx: SnapshotReceiver) -> anyhow::Result<()> {
    tracing::info!("Client connected to readings stream");

    let initial = rx.borrow_and_update().clone();
    if let Some(snapshot) = initial
        && !send_text(&mut socket, serde_json::to_string(snapshot.as_ref())?).await
    {
        return Ok(());
    }

    let mut ping_interval =
        tokio::time::interval_at(tokio::time::Instant::now() + WS_PING_INTERVAL, WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let latest = rx.borrow_and_update().clone();
                if let Some(snapshot) = latest {
                    let json = serde_json::to_string(snapshot.as_ref())?;
                    if !send_text(&mut socket, json).await {
                        break;
                    }
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Ping(Bytes::new()))).await;
                if !matches!(r, Ok(Ok(()))) {
                    break;
                }
            }
        }
    }
    Ok(())
}
