//! HTTP routes for puzzle endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_puzzle, PuzzleHandlers};

/// Creates the puzzle router, to be nested under `/api/puzzles`.
pub fn puzzle_routes(handlers: PuzzleHandlers) -> Router {
    Router::new()
        .route("/:kind/:number", get(get_puzzle))
        .with_state(handlers)
}
