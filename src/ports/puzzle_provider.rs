//! PuzzleProvider port - where puzzle documents come from.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::puzzle::{PuzzleDocument, PuzzleRef};

/// Why a puzzle could not be retrieved.
///
/// Every variant is terminal for the request that triggered it; nothing here
/// is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleFetchError {
    /// The requested series is not one we know how to fetch.
    #[error("unknown puzzle kind '{0}'")]
    UnknownKind(String),

    /// No puzzle exists under this reference.
    #[error("puzzle {0} not found")]
    NotFound(PuzzleRef),

    /// The source could not be reached.
    #[error("network error fetching {puzzle}: {message}")]
    Network { puzzle: PuzzleRef, message: String },

    /// The source answered with an unexpected status.
    #[error("source returned status {status} for {puzzle}")]
    Status { puzzle: PuzzleRef, status: u16 },

    /// The page did not carry puzzle data.
    #[error("no crossword data found for {0}")]
    MissingData(PuzzleRef),

    /// Puzzle data was present but could not be decoded.
    #[error("malformed crossword data for {puzzle}: {message}")]
    Parse { puzzle: PuzzleRef, message: String },

    /// Local storage failed.
    #[error("i/o error reading {puzzle}: {message}")]
    Io { puzzle: PuzzleRef, message: String },
}

/// Supplies puzzle documents by reference.
#[async_trait]
pub trait PuzzleProvider: Send + Sync {
    /// Fetch and decode one puzzle.
    async fn fetch(&self, puzzle: PuzzleRef) -> Result<PuzzleDocument, PuzzleFetchError>;
}
