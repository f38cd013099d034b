//! HTTP adapters - REST API implementations.
//!
//! - `puzzle` - Puzzle retrieval endpoints
//! - `router` - Assembly of every route with tracing, CORS and timeouts

mod dto;
pub mod puzzle;
mod router;

pub use dto::ErrorResponse;
pub use puzzle::{puzzle_routes, PuzzleHandlers, PuzzleResponse};
pub use router::app_router;
