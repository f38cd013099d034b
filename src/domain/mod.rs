//! Domain layer containing the puzzle model, grid construction and the
//! real-time hub.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, errors, state machines)
//! - `puzzle` - Puzzle documents as retrieved from a provider
//! - `grid` - Pure construction of the annotated grid
//! - `hub` - Connection registry and edit/presence/heartbeat fan-out

pub mod foundation;
pub mod grid;
pub mod hub;
pub mod puzzle;
