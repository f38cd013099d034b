//! Server-push transport: an event stream out, plain POSTs in.
//!
//! `GET /stream` opens a participant's event stream. Its first event is the
//! welcome message carrying the connection id; the client quotes that id on
//! every `POST /fill?id=<n>` it sends. Closing the stream leaves the hub.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;

use crate::adapters::http::ErrorResponse;
use crate::adapters::websocket::{ClientMessage, ServerMessage};
use crate::domain::foundation::ConnectionId;
use crate::domain::hub::{BroadcastHub, CellEdit};

/// State required by the stream endpoints.
#[derive(Clone)]
pub struct StreamState {
    pub hub: Arc<BroadcastHub>,
}

/// `?id=` on inbound posts.
#[derive(Debug, Deserialize)]
pub struct FillParams {
    pub id: ConnectionId,
}

/// GET /stream - Join the hub and receive its events
pub async fn stream_events(
    State(state): State<StreamState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let subscription = state.hub.connect().await;
    let welcome = ServerMessage::Welcome {
        connection_id: subscription.id(),
    };
    tracing::debug!(connection_id = %subscription.id(), "event stream opened");

    let initial = stream::once(async move { Ok::<_, Infallible>(to_event(&welcome)) });

    // The subscription lives inside the stream; when the client goes away
    // axum drops the stream and the subscription deregisters itself.
    let events = stream::unfold(subscription, |mut subscription| async move {
        let event = subscription.recv().await?;
        Some((Ok(to_event(&ServerMessage::from(event))), subscription))
    });

    Sse::new(initial.chain(events))
}

/// POST /fill?id=<n> - Relay one message from connection `n`
pub async fn fill(
    State(state): State<StreamState>,
    Query(params): Query<FillParams>,
    Json(message): Json<ClientMessage>,
) -> Response {
    let origin = params.id;
    if !state.hub.registry().contains(origin) {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Connection", &origin.to_string())),
        )
            .into_response();
    }

    match message {
        ClientMessage::Edit(payload) => match CellEdit::try_from(payload) {
            Ok(edit) => {
                state.hub.publish(origin, edit).await;
            }
            Err(e) => {
                tracing::warn!(connection_id = %origin, "Rejected edit: {}", e);
                return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(e.to_string())))
                    .into_response();
            }
        },
        ClientMessage::Heartbeat => {
            tracing::trace!(connection_id = %origin, "Received client heartbeat");
        }
    }

    StatusCode::NO_CONTENT.into_response()
}

fn to_event(message: &ServerMessage) -> Event {
    match Event::default().json_data(message) {
        Ok(event) => event,
        Err(e) => {
            tracing::error!("Failed to encode stream event: {}", e);
            Event::default().comment("encoding error")
        }
    }
}

/// Create axum router for the stream endpoints.
pub fn stream_router(hub: Arc<BroadcastHub>) -> Router {
    Router::new()
        .route("/stream", get(stream_events))
        .route("/fill", post(fill))
        .with_state(StreamState { hub })
}
