//! `WebSocket` handler for live status-change subscriptions.
//!
//! Clients connect to `GET /ws/{topic}` where `topic` is
//! `lift-status-change` or `trail-status-change`, and receive the updated
//! entity as a JSON text frame for every mutation published after the
//! upgrade request was accepted. There is no replay of earlier changes.
//!
//! The subscription is registered before the upgrade completes and is
//! dropped (and thereby deregistered) when the socket closes.

use std::sync::Arc;

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::{IntoResponse, Response};
use snowtooth_core::Subscription;
use snowtooth_types::{StatusChange, Topic};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming status changes for `topic`.
///
/// # Route
///
/// `GET /ws/{topic}`
///
/// # Errors
///
/// Responds `404` if `topic` is not a known topic name, whether or not
/// the request is a valid upgrade.
pub async fn ws_subscribe(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    Path(topic): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let topic: Topic = topic
        .parse()
        .map_err(|err: snowtooth_types::ParseEnumError| ApiError::NotFound(err.to_string()))?;
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return Ok(rejection.into_response()),
    };
    let subscription = state.resort.subscribe(topic);
    Ok(ws.on_upgrade(move |socket| handle_ws(socket, subscription)))
}

/// Forward each published change as a text frame until either side
/// goes away.
async fn handle_ws(mut socket: WebSocket, mut subscription: Subscription<StatusChange>) {
    let topic = subscription.topic();
    debug!(%topic, id = %subscription.id(), "WebSocket subscriber connected");

    loop {
        tokio::select! {
            change = subscription.recv() => {
                let Some(change) = change else {
                    debug!(%topic, "subscription closed by bus, shutting down WebSocket");
                    return;
                };
                let json = match serde_json::to_string(&change) {
                    Ok(j) => j,
                    Err(e) => {
                        warn!("Failed to serialize status change: {e}");
                        continue;
                    }
                };
                if socket.send(Message::Text(json.into())).await.is_err() {
                    debug!(%topic, "WebSocket client disconnected (send failed)");
                    return;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(%topic, "WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!(%topic, "WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    // Client text and binary frames carry no meaning here.
                    _ => {}
                }
            }
        }
    }
}
