//! Application handlers.
//!
//! Query handlers that orchestrate domain operations.

pub mod load_puzzle;

pub use load_puzzle::{LoadPuzzleError, LoadPuzzleHandler, LoadPuzzleQuery, LoadedPuzzle};
