//! Puzzle series a provider can be asked for.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A published crossword series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleKind {
    Quick,
    Cryptic,
    Prize,
    Weekend,
    Quiptic,
    Genius,
    Speedy,
    Everyman,
}

impl PuzzleKind {
    pub const ALL: [PuzzleKind; 8] = [
        PuzzleKind::Quick,
        PuzzleKind::Cryptic,
        PuzzleKind::Prize,
        PuzzleKind::Weekend,
        PuzzleKind::Quiptic,
        PuzzleKind::Genius,
        PuzzleKind::Speedy,
        PuzzleKind::Everyman,
    ];

    /// URL path segment for this series.
    pub fn slug(&self) -> &'static str {
        match self {
            PuzzleKind::Quick => "quick",
            PuzzleKind::Cryptic => "cryptic",
            PuzzleKind::Prize => "prize",
            PuzzleKind::Weekend => "weekend",
            PuzzleKind::Quiptic => "quiptic",
            PuzzleKind::Genius => "genius",
            PuzzleKind::Speedy => "speedy",
            PuzzleKind::Everyman => "everyman",
        }
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for PuzzleKind {
    type Err = ValidationError;

    /// Case-insensitive match against the known series.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PuzzleKind::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                ValidationError::invalid_format("kind", format!("unknown puzzle kind '{}'", s))
            })
    }
}

/// A specific puzzle: series plus issue number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PuzzleRef {
    pub kind: PuzzleKind,
    pub number: u32,
}

impl PuzzleRef {
    pub fn new(kind: PuzzleKind, number: u32) -> Self {
        Self { kind, number }
    }
}

impl fmt::Display for PuzzleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.number)
    }
}
