//! Integration tests for the broadcast hub.
//!
//! These tests drive the hub through its public API only:
//! 1. Echo suppression on edits
//! 2. Eviction of unresponsive participants and the presence update that follows
//! 3. Concurrent joins and leaves keeping the live count exact

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crossword_together::domain::hub::{BroadcastHub, CellEdit, HubEvent, HubSettings, Subscription};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn drain(subscription: &mut Subscription) -> Vec<HubEvent> {
    std::iter::from_fn(|| subscription.try_recv()).collect()
}

fn edits(events: &[HubEvent]) -> usize {
    events.iter().filter(|e| matches!(e, HubEvent::Edit(_))).count()
}

// =============================================================================
// Fan-out
// =============================================================================

#[tokio::test]
async fn edit_reaches_everyone_but_its_author_exactly_once() {
    let hub = Arc::new(BroadcastHub::default());
    let mut a = hub.connect().await;
    let mut b = hub.connect().await;
    let mut c = hub.connect().await;
    drain(&mut a);
    drain(&mut b);
    drain(&mut c);

    let edit = CellEdit::letter(4, 2, 'r').unwrap().with_clue("clue-7-down");
    hub.publish(a.id(), edit.clone()).await;

    assert_eq!(edits(&drain(&mut a)), 0);
    assert_eq!(drain(&mut b), vec![HubEvent::Edit(edit.clone())]);
    assert_eq!(drain(&mut c), vec![HubEvent::Edit(edit)]);
}

#[tokio::test]
async fn edits_from_one_participant_arrive_in_order() {
    let hub = Arc::new(BroadcastHub::default());
    let a = hub.connect().await;
    let mut b = hub.connect().await;
    drain(&mut b);

    for (col, letter) in ['c', 'a', 't'].into_iter().enumerate() {
        hub.publish(a.id(), CellEdit::letter(0, col, letter).unwrap()).await;
    }
    hub.publish(a.id(), CellEdit::clear(0, 2)).await;

    let cols: Vec<usize> = drain(&mut b)
        .into_iter()
        .filter_map(|e| match e {
            HubEvent::Edit(edit) => Some(edit.col),
            _ => None,
        })
        .collect();
    assert_eq!(cols, vec![0, 1, 2, 2]);
}

#[tokio::test]
async fn failed_delivery_evicts_only_the_failing_participant() {
    let hub = Arc::new(BroadcastHub::new(HubSettings {
        outbox_capacity: 3,
        send_timeout: Duration::from_millis(25),
        ..HubSettings::default()
    }));
    let mut a = hub.connect().await;
    let b = hub.connect().await;
    let mut c = hub.connect().await;
    drain(&mut a);
    drain(&mut c);

    // b never reads; two presence events plus this edit fill its outbox.
    let first = hub.publish(a.id(), CellEdit::letter(0, 0, 'x').unwrap()).await;
    assert!(first.evicted.is_empty());
    drain(&mut c);

    let second = hub.publish(a.id(), CellEdit::letter(0, 1, 'y').unwrap()).await;

    assert_eq!(second.evicted, vec![b.id()]);
    assert_eq!(hub.live_count(), 2);
    assert_eq!(
        drain(&mut c),
        vec![
            HubEvent::Edit(CellEdit::letter(0, 1, 'y').unwrap()),
            HubEvent::Presence { connected: 2 },
        ]
    );
    assert_eq!(drain(&mut a), vec![HubEvent::Presence { connected: 2 }]);
}

#[tokio::test]
async fn heartbeat_evicts_unresponsive_participants() {
    let hub = Arc::new(BroadcastHub::new(HubSettings {
        outbox_capacity: 2,
        send_timeout: Duration::from_millis(25),
        ..HubSettings::default()
    }));
    let mut a = hub.connect().await;
    drain(&mut a);
    let b = hub.connect().await;
    drain(&mut a);

    let first = hub.heartbeat().await;
    assert_eq!(first.delivered, 2);
    drain(&mut a);

    let second = hub.heartbeat().await;

    assert_eq!(second.evicted, vec![b.id()]);
    assert_eq!(
        drain(&mut a),
        vec![HubEvent::Heartbeat, HubEvent::Presence { connected: 1 }]
    );
}

// =============================================================================
// Membership
// =============================================================================

#[tokio::test]
async fn presence_always_converges_on_live_count() {
    let hub = Arc::new(BroadcastHub::default());
    let mut watcher = hub.connect().await;

    let mut others: Vec<Subscription> =
        futures::future::join_all((0..5).map(|_| hub.connect())).await;
    for subscription in others.drain(..3) {
        subscription.close().await;
    }

    let last_presence = drain(&mut watcher)
        .into_iter()
        .filter_map(|e| match e {
            HubEvent::Presence { connected } => Some(connected),
            _ => None,
        })
        .last();
    assert_eq!(last_presence, Some(3));
    assert_eq!(hub.live_count(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn presence_settles_on_live_count_under_churn() {
    let hub = Arc::new(BroadcastHub::default());

    for round in 0..200 {
        let mut watcher = hub.connect().await;

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let hub = Arc::clone(&hub);
                tokio::spawn(async move {
                    let subscription = hub.connect().await;
                    tokio::task::yield_now().await;
                    subscription.close().await;
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let last_presence = drain(&mut watcher)
            .into_iter()
            .filter_map(|e| match e {
                HubEvent::Presence { connected } => Some(connected),
                _ => None,
            })
            .last();
        assert_eq!(last_presence, Some(1), "round {round}");
        assert_eq!(hub.live_count(), 1);

        watcher.close().await;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_joins_get_distinct_ids() {
    let hub = Arc::new(BroadcastHub::default());

    let tasks: Vec<_> = (0..40)
        .map(|_| {
            let hub = Arc::clone(&hub);
            tokio::spawn(async move {
                let subscription = hub.connect().await;
                let id = subscription.id();
                // Keep the subscription alive for the caller to close.
                (id, subscription)
            })
        })
        .collect();

    let mut subscriptions = Vec::new();
    for task in tasks {
        subscriptions.push(task.await.unwrap());
    }

    let ids: HashSet<_> = subscriptions.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids.len(), 40);
    assert_eq!(hub.live_count(), 40);

    for (_, subscription) in subscriptions.drain(..15) {
        subscription.close().await;
    }
    assert_eq!(hub.live_count(), 25);
}

#[tokio::test]
async fn disconnecting_twice_changes_nothing() {
    let hub = Arc::new(BroadcastHub::default());
    let a = hub.connect().await;
    let _b = hub.connect().await;

    assert!(hub.disconnect(a.id()).await);
    let count = hub.live_count();
    assert!(!hub.disconnect(a.id()).await);
    assert_eq!(hub.live_count(), count);
}
