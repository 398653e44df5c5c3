//! WebSocket handler for real-time display notifications
//!
//! Displays connect once and receive every change frame; on each frame they
//! re-fetch the projection they render. Frames are fire-and-forget: a lagged
//! or dead connection never blocks a kitchen command, and a display that
//! misses frames recovers through its polling backstop.

use axum::Router;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use shared::message::DisplayMessage;
use shared::util::{new_id, now_millis};

use crate::core::ServerState;
use crate::live::ConnectedDisplay;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/kitchen/ws", get(handle_display_ws))
}

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    /// Client-chosen display name (e.g. "grill-station")
    pub name: Option<String>,
}

/// GET /api/kitchen/ws — upgrade to WebSocket
async fn handle_display_ws(
    State(state): State<ServerState>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state, query.name))
}

async fn handle_ws_connection(socket: WebSocket, state: ServerState, name: Option<String>) {
    let client_id = new_id();

    // Subscribe before the Welcome snapshot so no frame falls in the gap
    let mut rx = state.hub.subscribe();

    state.hub.register(ConnectedDisplay {
        id: client_id.clone(),
        name,
        connected_at: now_millis(),
    });

    let (mut ws_sink, mut ws_stream) = socket.split();

    let welcome = DisplayMessage::Welcome {
        client_id: client_id.clone(),
        server_version: env!("CARGO_PKG_VERSION").to_string(),
        resource_versions: state.hub.version_snapshot(),
    };
    if let Ok(json) = serde_json::to_string(&welcome) {
        if ws_sink.send(Message::Text(json.into())).await.is_err() {
            tracing::warn!(client_id, "Failed to send Welcome, disconnecting");
            state.hub.unregister(&client_id);
            return;
        }
    }

    let shutdown = state.hub.shutdown_token().clone();

    loop {
        tokio::select! {
            // Change frame to push
            frame = rx.recv() => {
                match frame {
                    Ok(msg) => {
                        if let Ok(json) = serde_json::to_string(&msg) {
                            if ws_sink.send(Message::Text(json.into())).await.is_err() {
                                tracing::warn!(client_id, "Failed to push frame via WS");
                                break;
                            }
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        // Client keeps the connection; its next poll resyncs
                        tracing::warn!(client_id, skipped, "Display lagged behind broadcast");
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            // Incoming message from the display
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!(client_id, "Display WebSocket disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::warn!(client_id, "Display WebSocket error: {e}");
                        break;
                    }
                    _ => {} // Text, Binary, Pong — displays never send commands here
                }
            }

            () = shutdown.cancelled() => {
                tracing::info!(client_id, "Closing display WS on shutdown");
                break;
            }
        }
    }

    let _ = ws_sink.close().await;
    state.hub.unregister(&client_id);
}
