//! Directory-backed puzzle provider for offline development and tests.
//!
//! Puzzles are read from `{base_dir}/{kind}/{number}.json`, each holding the
//! same JSON payload a Guardian page embeds.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::adapters::guardian::parse_crossword_json;
use crate::domain::puzzle::{PuzzleDocument, PuzzleRef};
use crate::ports::{PuzzleFetchError, PuzzleProvider};

/// Serves puzzles from JSON files on disk.
pub struct FilePuzzleProvider {
    base_dir: PathBuf,
}

impl FilePuzzleProvider {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Where the file for `puzzle` is expected.
    pub fn path_for(&self, puzzle: PuzzleRef) -> PathBuf {
        self.base_dir
            .join(puzzle.kind.slug())
            .join(format!("{}.json", puzzle.number))
    }
}

#[async_trait]
impl PuzzleProvider for FilePuzzleProvider {
    async fn fetch(&self, puzzle: PuzzleRef) -> Result<PuzzleDocument, PuzzleFetchError> {
        let path = self.path_for(puzzle);
        tracing::debug!(path = %path.display(), "reading puzzle fixture");

        let json = fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => PuzzleFetchError::NotFound(puzzle),
            _ => PuzzleFetchError::Io {
                puzzle,
                message: format!("{}: {}", path.display(), e),
            },
        })?;

        parse_crossword_json(&json).map_err(|e| PuzzleFetchError::Parse {
            puzzle,
            message: e.to_string(),
        })
    }
}
