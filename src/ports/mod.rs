//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PuzzleProvider` - Retrieves puzzle documents (Guardian pages, fixture files)

mod puzzle_provider;

pub use puzzle_provider::{PuzzleFetchError, PuzzleProvider};
