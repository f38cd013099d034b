//! HTTP DTOs for puzzle endpoints.

use serde::Serialize;

use crate::application::LoadedPuzzle;
use crate::domain::grid::{ClueListing, Grid};
use crate::domain::puzzle::Dimensions;

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A puzzle ready to render: the annotated grid plus clue listings.
///
/// `grid` is row-major; each cell is `{"number": "...", "classes": [...]}`
/// and a cell with no classes is blocked.
#[derive(Debug, Clone, Serialize)]
pub struct PuzzleResponse {
    pub id: String,
    pub name: String,
    pub dimensions: Dimensions,
    pub grid: Grid,
    pub across: Vec<ClueListing>,
    pub down: Vec<ClueListing>,
}

impl From<LoadedPuzzle> for PuzzleResponse {
    fn from(loaded: LoadedPuzzle) -> Self {
        let id = if loaded.document.id.is_empty() {
            format!("crosswords/{}", loaded.puzzle)
        } else {
            loaded.document.id
        };
        Self {
            id,
            name: loaded.document.name,
            dimensions: loaded.document.dimensions,
            grid: loaded.built.grid,
            across: loaded.built.across,
            down: loaded.built.down,
        }
    }
}
