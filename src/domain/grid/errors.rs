//! Grid construction errors.

use thiserror::Error;

use crate::domain::puzzle::{Dimensions, Direction, Position};

/// Puzzle geometry that cannot be laid onto its declared grid.
///
/// These are precondition violations in provider data, not recoverable
/// conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error(
        "entry '{entry_id}' ({length} {direction} from {start}) runs outside the {}x{} grid",
        dimensions.rows,
        dimensions.cols
    )]
    EntryOutOfBounds {
        entry_id: String,
        start: Position,
        direction: Direction,
        length: usize,
        dimensions: Dimensions,
    },
}
