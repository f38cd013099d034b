//! Adapters - Implementations of ports and transports.
//!
//! - `guardian` - Puzzle provider scraping published crossword pages
//! - `fixtures` - Puzzle provider reading JSON files from disk
//! - `websocket` - Realtime channel over WebSocket, plus the shared wire messages
//! - `sse` - Realtime channel over a server-push stream and inbound POSTs
//! - `http` - Puzzle endpoints and router assembly

pub mod fixtures;
pub mod guardian;
pub mod http;
pub mod sse;
pub mod websocket;
