//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, validation errors and the state machine trait
//! that form the vocabulary of the rest of the domain.

mod errors;
mod ids;
mod state_machine;

pub use errors::ValidationError;
pub use ids::ConnectionId;
pub use state_machine::StateMachine;
