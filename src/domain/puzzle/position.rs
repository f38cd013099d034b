//! Grid coordinates and walking direction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Zero-based (column, row) coordinate within a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Position `offset` cells further along `direction`.
    pub fn step(&self, direction: Direction, offset: usize) -> Self {
        match direction {
            Direction::Across => Self::new(self.col + offset, self.row),
            Direction::Down => Self::new(self.col, self.row + offset),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(col {}, row {})", self.col, self.row)
    }
}

/// Direction in which an answer is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "across" => Ok(Direction::Across),
            "down" => Ok(Direction::Down),
            other => Err(ValidationError::invalid_format(
                "direction",
                format!("expected 'across' or 'down', got '{}'", other),
            )),
        }
    }
}
