//! Puzzle documents as supplied by a provider.

use serde::{Deserialize, Serialize};

use super::ClueEntry;

/// Declared grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

/// A complete puzzle: name, size and clue entries in provider order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuzzleDocument {
    /// Provider-side identifier, e.g. `crosswords/quick/15655`.
    pub id: String,
    pub name: String,
    pub dimensions: Dimensions,
    pub entries: Vec<ClueEntry>,
}

