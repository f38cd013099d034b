//! Grid module - turning clue entries into an annotated grid.
//!
//! The builder is a pure function with no shared state; independent requests
//! may call it concurrently.

mod builder;
mod cell;
mod errors;

pub use builder::{build, BuiltGrid, ClueListing, Grid};
pub use cell::{Cell, CellLabel};
pub use errors::GridError;
