//! LoadPuzzleHandler - Query handler that fetches a puzzle and builds its grid.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::grid::{self, BuiltGrid, GridError};
use crate::domain::puzzle::{PuzzleDocument, PuzzleKind, PuzzleRef};
use crate::ports::{PuzzleFetchError, PuzzleProvider};

/// Query to load one puzzle, as named in a request path.
#[derive(Debug, Clone)]
pub struct LoadPuzzleQuery {
    /// Series name, matched case-insensitively.
    pub kind: String,
    /// Issue number.
    pub number: String,
}

impl LoadPuzzleQuery {
    pub fn new(kind: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            number: number.into(),
        }
    }

    fn resolve(&self) -> Result<PuzzleRef, LoadPuzzleError> {
        let kind: PuzzleKind = self
            .kind
            .parse()
            .map_err(|_| PuzzleFetchError::UnknownKind(self.kind.clone()))?;
        let number = self
            .number
            .trim()
            .parse::<u32>()
            .map_err(|_| LoadPuzzleError::InvalidNumber(self.number.clone()))?;
        Ok(PuzzleRef::new(kind, number))
    }
}

/// A fetched puzzle and the grid built from it.
#[derive(Debug, Clone)]
pub struct LoadedPuzzle {
    pub puzzle: PuzzleRef,
    pub document: PuzzleDocument,
    pub built: BuiltGrid,
}

/// Errors from loading a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadPuzzleError {
    #[error("'{0}' is not a puzzle number")]
    InvalidNumber(String),

    #[error(transparent)]
    Fetch(#[from] PuzzleFetchError),

    #[error("puzzle has invalid geometry: {0}")]
    InvalidGeometry(#[from] GridError),
}

/// Handler for loading a puzzle.
///
/// Each call fetches afresh; nothing is cached between requests.
pub struct LoadPuzzleHandler {
    provider: Arc<dyn PuzzleProvider>,
}

impl LoadPuzzleHandler {
    pub fn new(provider: Arc<dyn PuzzleProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, query: LoadPuzzleQuery) -> Result<LoadedPuzzle, LoadPuzzleError> {
        let puzzle = query.resolve()?;

        let document = self.provider.fetch(puzzle).await.map_err(|e| {
            tracing::warn!(kind = %puzzle.kind, number = puzzle.number, error = %e, "puzzle fetch failed");
            e
        })?;

        let built = grid::build(document.dimensions, &document.entries).map_err(|e| {
            tracing::warn!(kind = %puzzle.kind, number = puzzle.number, error = %e, "puzzle geometry rejected");
            e
        })?;

        tracing::debug!(
            kind = %puzzle.kind,
            number = puzzle.number,
            entries = document.entries.len(),
            "puzzle loaded"
        );

        Ok(LoadedPuzzle {
            puzzle,
            document,
            built,
        })
    }
}
