//! Hub module - relaying edits between everyone solving the same grid.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    publish(origin, edit)    ┌─────────────────────────┐
//! │  transport   │ ──────────────────────────► │      BroadcastHub       │
//! │ (ws / sse)   │                             │  ┌───────────────────┐  │
//! │              │ ◄── Subscription::recv ──── │  │ConnectionRegistry │  │
//! └──────────────┘                             │  │ id ─► outbox      │  │
//!                                              │  └───────────────────┘  │
//!                                              └─────────────────────────┘
//!                                                          │
//!                                  heartbeat ticker ───────┘
//! ```
//!
//! The hub knows nothing about sockets. Each participant gets a bounded
//! outbox; a transport drains it through a [`Subscription`] and writes to its
//! own wire. A delivery that cannot find room within the send timeout counts
//! as a failure, and the participant is evicted.

mod connection;
mod events;
#[allow(clippy::module_inception)]
mod hub;
mod registry;

pub use connection::{Connection, ConnectionState, DeliveryError};
pub use events::{CellEdit, EditKey, HubEvent};
pub use hub::{BroadcastHub, FanOutReport, HubSettings, Subscription};
pub use registry::ConnectionRegistry;
