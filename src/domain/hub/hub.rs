//! Fan-out of edits, presence and heartbeats to every live connection.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::domain::foundation::{ConnectionId, StateMachine};

use super::{CellEdit, ConnectionRegistry, ConnectionState, HubEvent};

/// Tunables for a [`BroadcastHub`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubSettings {
    /// How often every connection is probed.
    pub heartbeat_interval: Duration,
    /// Longest a single delivery may wait for room in a connection's outbox.
    pub send_timeout: Duration,
    /// Events buffered per connection before deliveries start waiting.
    pub outbox_capacity: usize,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(25),
            send_timeout: Duration::from_secs(2),
            outbox_capacity: 64,
        }
    }
}

/// Outcome of one fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutReport {
    /// Connections that accepted the event.
    pub delivered: usize,
    /// Connections removed because a delivery failed, including any removed
    /// while announcing the resulting presence change.
    pub evicted: Vec<ConnectionId>,
}

/// Relays events between participants.
///
/// Edits go to everyone except their originator. Presence and heartbeats go
/// to everyone. Any connection that fails a delivery is evicted and the new
/// live count is announced.
#[derive(Debug)]
pub struct BroadcastHub {
    registry: ConnectionRegistry,
    settings: HubSettings,
    /// Held while a presence count is read and queued, so announcements
    /// reach every outbox in the order their counts were taken.
    presence: Mutex<()>,
}

impl BroadcastHub {
    pub fn new(settings: HubSettings) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            settings,
            presence: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &HubSettings {
        &self.settings
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn live_count(&self) -> usize {
        self.registry.live_count()
    }

    /// Admits a new participant and announces the new count to everyone,
    /// the newcomer included.
    pub async fn connect(self: &Arc<Self>) -> Subscription {
        let (outbox, events) = mpsc::channel(self.settings.outbox_capacity.max(1));
        let id = self.registry.admit(outbox);

        let mut subscription = Subscription {
            id,
            state: ConnectionState::Connecting,
            events,
            hub: Arc::clone(self),
        };
        subscription.advance(ConnectionState::Open);

        tracing::info!(connection_id = %id, live = self.live_count(), "participant connected");
        self.announce_presence().await;

        subscription
    }

    /// Relays `edit` from `origin` to every other connection.
    pub async fn publish(&self, origin: ConnectionId, edit: CellEdit) -> FanOutReport {
        tracing::debug!(
            connection_id = %origin,
            row = edit.row,
            col = edit.col,
            "relaying edit"
        );
        self.fan_out(HubEvent::Edit(edit), Some(origin)).await
    }

    /// Probes every connection, evicting the unresponsive ones.
    pub async fn heartbeat(&self) -> FanOutReport {
        self.fan_out(HubEvent::Heartbeat, None).await
    }

    /// Sends the current live count to everyone.
    pub async fn announce_presence(&self) -> FanOutReport {
        let (delivered, failed) = self.deliver_presence().await;
        let evicted = self.evict(failed, "presence").await;
        FanOutReport { delivered, evicted }
    }

    /// Removes `id` and announces the new count.
    ///
    /// Returns false, and announces nothing, if `id` was already gone.
    pub async fn disconnect(&self, id: ConnectionId) -> bool {
        if !self.registry.remove(id) {
            return false;
        }
        tracing::info!(connection_id = %id, live = self.live_count(), "participant disconnected");
        self.announce_presence().await;
        true
    }

    /// Sends heartbeats every `heartbeat_interval` until `shutdown` flips to
    /// true or its sender goes away.
    pub async fn run_heartbeat(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        let period = self.settings.heartbeat_interval;
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("heartbeat loop stopping");
                        return;
                    }
                }
                _ = interval.tick() => {
                    let report = self.heartbeat().await;
                    tracing::trace!(
                        delivered = report.delivered,
                        evicted = report.evicted.len(),
                        "heartbeat sent"
                    );
                }
            }
        }
    }

    async fn fan_out(&self, event: HubEvent, except: Option<ConnectionId>) -> FanOutReport {
        let (delivered, failed) = self.deliver_once(&event, except).await;
        let evicted = self.evict(failed, event.kind()).await;
        FanOutReport { delivered, evicted }
    }

    /// Removes `failed` and announces the new count. Each announcement may
    /// expose further dead connections.
    async fn evict(&self, mut failed: Vec<ConnectionId>, trigger: &str) -> Vec<ConnectionId> {
        let mut evicted = Vec::new();
        while !failed.is_empty() {
            let removed: Vec<ConnectionId> = failed
                .into_iter()
                .filter(|id| self.registry.remove(*id))
                .collect();
            if removed.is_empty() {
                break;
            }
            for id in &removed {
                tracing::warn!(connection_id = %id, trigger, "evicted unresponsive participant");
            }
            evicted.extend(removed);

            failed = self.deliver_presence().await.1;
        }
        evicted
    }

    async fn deliver_presence(&self) -> (usize, Vec<ConnectionId>) {
        let _guard = self.presence.lock().await;
        let presence = HubEvent::Presence {
            connected: self.registry.live_count(),
        };
        self.deliver_once(&presence, None).await
    }

    async fn deliver_once(
        &self,
        event: &HubEvent,
        except: Option<ConnectionId>,
    ) -> (usize, Vec<ConnectionId>) {
        let targets: Vec<_> = self
            .registry
            .snapshot()
            .into_iter()
            .filter(|c| Some(c.id()) != except)
            .collect();
        let timeout = self.settings.send_timeout;

        let outcomes = join_all(targets.iter().map(|c| c.deliver(event.clone(), timeout))).await;

        let mut delivered = 0;
        let mut failed = Vec::new();
        for (connection, outcome) in targets.iter().zip(outcomes) {
            match outcome {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::debug!(connection_id = %connection.id(), error = %e, "delivery failed");
                    failed.push(connection.id());
                }
            }
        }
        (delivered, failed)
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new(HubSettings::default())
    }
}

/// A participant's handle on the hub: its id and inbound event stream.
///
/// Dropping the subscription deregisters it immediately; the presence update
/// is then sent from a background task. Prefer [`Subscription::close`] where
/// an `.await` is possible.
#[derive(Debug)]
pub struct Subscription {
    id: ConnectionId,
    state: ConnectionState,
    events: mpsc::Receiver<HubEvent>,
    hub: Arc<BroadcastHub>,
}

impl Subscription {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Next event for this participant.
    ///
    /// Returns `None` once the hub has evicted this connection.
    pub async fn recv(&mut self) -> Option<HubEvent> {
        let event = self.events.recv().await;
        if event.is_none() {
            self.advance(ConnectionState::Closing);
        }
        event
    }

    /// Next already-queued event, without waiting.
    pub fn try_recv(&mut self) -> Option<HubEvent> {
        self.events.try_recv().ok()
    }

    /// Deregisters this participant and announces the new count.
    pub async fn close(mut self) {
        self.advance(ConnectionState::Closing);
        self.hub.disconnect(self.id).await;
        self.events.close();
        self.advance(ConnectionState::Closed);
    }

    fn advance(&mut self, next: ConnectionState) {
        match self.state.transition_to(next) {
            Ok(state) => self.state = state,
            Err(e) => tracing::trace!(connection_id = %self.id, "{}", e),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.hub.registry.remove(self.id) {
            return;
        }
        tracing::info!(connection_id = %self.id, live = self.hub.live_count(), "participant dropped");

        let hub = Arc::clone(&self.hub);
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                hub.announce_presence().await;
            });
        }
    }
}
