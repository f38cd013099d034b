//! HTTP handlers for puzzle endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::adapters::http::ErrorResponse;
use crate::application::{LoadPuzzleError, LoadPuzzleHandler, LoadPuzzleQuery};
use crate::domain::grid::GridError;
use crate::ports::PuzzleFetchError;

use super::dto::PuzzleResponse;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PuzzleHandlers {
    load_handler: Arc<LoadPuzzleHandler>,
}

impl PuzzleHandlers {
    pub fn new(load_handler: Arc<LoadPuzzleHandler>) -> Self {
        Self { load_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/puzzles/:kind/:number - Fetch a puzzle and its built grid
pub async fn get_puzzle(
    State(handlers): State<PuzzleHandlers>,
    Path((kind, number)): Path<(String, String)>,
) -> Response {
    let query = LoadPuzzleQuery::new(kind, number);

    match handlers.load_handler.handle(query).await {
        Ok(loaded) => {
            let response: PuzzleResponse = loaded.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_load_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn handle_load_error(error: LoadPuzzleError) -> Response {
    let (status, body) = match &error {
        LoadPuzzleError::InvalidNumber(number) => {
            (StatusCode::NOT_FOUND, ErrorResponse::not_found("Puzzle", number))
        }
        LoadPuzzleError::Fetch(PuzzleFetchError::UnknownKind(kind)) => {
            (StatusCode::NOT_FOUND, ErrorResponse::not_found("Puzzle kind", kind))
        }
        LoadPuzzleError::Fetch(PuzzleFetchError::NotFound(puzzle)) => (
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found("Puzzle", &puzzle.to_string()),
        ),
        LoadPuzzleError::Fetch(e @ PuzzleFetchError::Status { status, .. }) => (
            StatusCode::BAD_GATEWAY,
            ErrorResponse::upstream(e.to_string()).with_details(json!({ "status": status })),
        ),
        LoadPuzzleError::Fetch(e) => (StatusCode::BAD_GATEWAY, ErrorResponse::upstream(e.to_string())),
        LoadPuzzleError::InvalidGeometry(e @ GridError::EntryOutOfBounds { entry_id, .. }) => (
            StatusCode::BAD_GATEWAY,
            ErrorResponse::invalid_puzzle(e.to_string()).with_details(json!({ "entry": entry_id })),
        ),
    };
    (status, Json(body)).into_response()
}
