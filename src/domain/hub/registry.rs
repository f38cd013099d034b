//! The set of live connections.
//!
//! This is the only shared mutable state in the hub. Every read and write goes
//! through one mutex, and no caller ever holds it across an `.await`: fan-out
//! takes a [`ConnectionRegistry::snapshot`] and delivers from the copy.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use crate::domain::foundation::ConnectionId;

use super::{Connection, HubEvent};

#[derive(Debug, Default)]
struct RegistryInner {
    /// Last id handed out; ids start at 1.
    last_id: u64,
    connections: BTreeMap<ConnectionId, Connection>,
}

/// In-memory registry of live connections.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    inner: Mutex<RegistryInner>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        // Every critical section leaves the map consistent, so a panic
        // elsewhere does not invalidate it.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a connection and returns its fresh sequence id.
    pub fn admit(&self, outbox: mpsc::Sender<HubEvent>) -> ConnectionId {
        let mut inner = self.lock();
        inner.last_id += 1;
        let id = ConnectionId::from_raw(inner.last_id);
        inner.connections.insert(id, Connection::new(id, outbox));
        id
    }

    /// Deregisters `id`. Returns false if it was not registered.
    pub fn remove(&self, id: ConnectionId) -> bool {
        self.lock().connections.remove(&id).is_some()
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.lock().connections.contains_key(&id)
    }

    /// Point-in-time copy of the live connections, ordered by id.
    pub fn snapshot(&self) -> Vec<Connection> {
        self.lock().connections.values().cloned().collect()
    }

    /// Currently connected, not total ever admitted.
    pub fn live_count(&self) -> usize {
        self.lock().connections.len()
    }

    /// Number of connections ever admitted.
    pub fn total_admitted(&self) -> u64 {
        self.lock().last_id
    }
}
