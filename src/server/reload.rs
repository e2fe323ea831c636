//! Live-reload WebSocket support

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ServerState;

/// Reload message types pushed to connected browsers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ReloadMessage {
    /// Connection established
    Connected,

    /// Full page reload required
    FullReload { reason: String },

    /// Stylesheet updated (can be swapped without a reload)
    CssUpdate { path: String },
}

/// Handle WebSocket upgrade for live reload
pub async fn reload_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> Response {
    ws.on_upgrade(|socket| handle_reload_socket(socket, state))
}

/// Handle a live-reload WebSocket connection
async fn handle_reload_socket(socket: WebSocket, state: Arc<ServerState>) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe to reload messages
    let mut reload_rx = state.reload_tx.subscribe();

    // Send connected message
    let connected = ReloadMessage::Connected;
    if let Ok(json) = serde_json::to_string(&connected) {
        let _ = sender.send(Message::Text(json)).await;
    }

    debug!("Reload client connected");

    // Forward reload messages to the client
    let send_task = tokio::spawn(async move {
        while let Ok(message) = reload_rx.recv().await {
            if let Ok(json) = serde_json::to_string(&message) {
                if sender.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
        }
    });

    // Drain incoming messages until the client goes away
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Close(_) => {
                    debug!("Reload client disconnected");
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    debug!("Reload connection closed");
}
