//! Puzzle module - what a provider hands us.
//!
//! Positions, directions, clue entries and whole puzzle documents. These are
//! read-only inputs to the grid builder.

mod document;
mod entry;
mod kind;
mod position;

pub use document::{Dimensions, PuzzleDocument};
pub use entry::{ClueEntry, RECOGNISED_SEPARATORS};
pub use kind::{PuzzleKind, PuzzleRef};
pub use position::{Direction, Position};
