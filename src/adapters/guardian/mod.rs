//! Guardian crossword provider.
//!
//! - [`extract`] - Finds and decodes the payload attribute in page HTML
//! - [`payload`] - JSON payload → [`PuzzleDocument`](crate::domain::puzzle::PuzzleDocument)
//! - [`provider`] - reqwest-backed [`PuzzleProvider`](crate::ports::PuzzleProvider)

pub mod extract;
pub mod payload;
pub mod provider;

pub use extract::{crossword_data, unescape_html};
pub use payload::parse_crossword_json;
pub use provider::{GuardianConfig, GuardianProvider, DEFAULT_BASE_URL};
