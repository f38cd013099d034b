//! WebSocket upgrade handler for realtime grid sharing.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Upgrade to WebSocket
//! 2. Join the hub (everyone, the newcomer included, gets a presence update)
//! 3. Send the welcome message
//! 4. Relay hub events out and client edits in until either side stops
//! 5. Leave the hub

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};

use crate::domain::foundation::ConnectionId;
use crate::domain::hub::{BroadcastHub, CellEdit};

use super::messages::{ClientMessage, ServerMessage};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    pub hub: Arc<BroadcastHub>,
}

impl WebSocketState {
    pub fn new(hub: Arc<BroadcastHub>) -> Self {
        Self { hub }
    }
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WebSocketState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.hub))
}

/// Runs for the lifetime of one connection.
async fn handle_socket(socket: WebSocket, hub: Arc<BroadcastHub>) {
    let (mut sender, mut receiver) = socket.split();

    let mut subscription = hub.connect().await;
    let connection_id = subscription.id();
    let send_timeout = hub.settings().send_timeout;

    let welcome = ServerMessage::Welcome { connection_id };
    if let Err(e) = send_message(&mut sender, &welcome).await {
        tracing::debug!(connection_id = %connection_id, "Failed to send welcome: {}", e);
        subscription.close().await;
        return;
    }

    // Forward hub events to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = subscription.recv().await {
            let msg = ServerMessage::from(event);
            match tokio::time::timeout(send_timeout, send_message(&mut sender, &msg)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::debug!(connection_id = %connection_id, "Send error, closing connection: {}", e);
                    break;
                }
                Err(_) => {
                    tracing::debug!(connection_id = %connection_id, "Send timed out, closing connection");
                    break;
                }
            }
        }
        subscription
    });

    // Relay client edits through the hub
    let recv_hub = Arc::clone(&hub);
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    handle_client_text(&recv_hub, connection_id, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::warn!(connection_id = %connection_id, "Received unsupported binary message");
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // Protocol-level keepalive, answered by axum
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(connection_id = %connection_id, "Client sent close frame");
                    break;
                }
                Err(e) => {
                    tracing::debug!(connection_id = %connection_id, "Receive error: {}", e);
                    break;
                }
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        result = &mut send_task => {
            recv_task.abort();
            match result {
                Ok(subscription) => subscription.close().await,
                Err(_) => {
                    hub.disconnect(connection_id).await;
                }
            }
        }
        _ = &mut recv_task => {
            send_task.abort();
            hub.disconnect(connection_id).await;
        }
    }
}

/// Parses one text frame and publishes it if it is a valid edit.
pub(crate) async fn handle_client_text(hub: &BroadcastHub, origin: ConnectionId, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Edit(payload)) => match CellEdit::try_from(payload) {
            Ok(edit) => {
                hub.publish(origin, edit).await;
            }
            Err(e) => {
                tracing::warn!(connection_id = %origin, "Rejected edit: {}", e);
            }
        },
        Ok(ClientMessage::Heartbeat) => {
            tracing::trace!(connection_id = %origin, "Received client heartbeat");
        }
        Err(e) => {
            tracing::warn!(connection_id = %origin, "Unparseable client message: {}", e);
        }
    }
}

/// Send a JSON message over the WebSocket.
async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    sender.send(Message::Text(json)).await
}

/// Create axum router for the WebSocket endpoint.
pub fn websocket_router(hub: Arc<BroadcastHub>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(WebSocketState::new(hub))
}
