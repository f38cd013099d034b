//! HTTP adapter for puzzle endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::PuzzleResponse;
pub use handlers::PuzzleHandlers;
pub use routes::puzzle_routes;
