//! WebSocket adapter for realtime grid sharing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  text frames   ┌────────────────────┐   publish    ┌──────────────┐
//! │   browser    │ ─────────────► │     recv task      │ ───────────► │              │
//! │              │                └────────────────────┘              │ BroadcastHub │
//! │              │  text frames   ┌────────────────────┐  Subscription│              │
//! │              │ ◄───────────── │     send task      │ ◄─────────── │              │
//! └──────────────┘                └────────────────────┘              └──────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - Wire protocol types, shared with the server-push transport
//! - [`handler`] - Axum WebSocket upgrade handler

pub mod handler;
pub mod messages;

pub use handler::{websocket_router, ws_handler, WebSocketState};
pub use messages::{ClientMessage, EditPayload, EditRejected, ServerMessage};
