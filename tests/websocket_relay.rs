//! End-to-end tests for the WebSocket realtime channel.
//!
//! A real server is bound to an ephemeral port and driven by
//! tokio-tungstenite clients.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crossword_together::adapters::guardian::{GuardianConfig, GuardianProvider};
use crossword_together::adapters::http::app_router;
use crossword_together::adapters::websocket::{EditPayload, ServerMessage};
use crossword_together::application::LoadPuzzleHandler;
use crossword_together::config::ServerConfig;
use crossword_together::domain::foundation::ConnectionId;
use crossword_together::domain::hub::BroadcastHub;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

// =============================================================================
// Test Infrastructure
// =============================================================================

async fn spawn_server() -> (SocketAddr, Arc<BroadcastHub>) {
    let hub = Arc::new(BroadcastHub::default());
    // Never called: these tests only touch the realtime routes.
    let provider = GuardianProvider::new(GuardianConfig::default()).unwrap();
    let app = app_router(
        &ServerConfig::default(),
        Arc::clone(&hub),
        Arc::new(LoadPuzzleHandler::new(Arc::new(provider))),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, hub)
}

async fn connect(addr: SocketAddr) -> (Client, ConnectionId) {
    let (mut client, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    match next_message(&mut client).await {
        ServerMessage::Welcome { connection_id } => (client, connection_id),
        other => panic!("expected welcome, got {:?}", other),
    }
}

/// Next non-heartbeat message, failing the test after a few seconds.
async fn next_message(client: &mut Client) -> ServerMessage {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("timed out waiting for a message")
            .expect("stream ended")
            .expect("websocket error");
        if let Message::Text(text) = frame {
            let msg: ServerMessage = serde_json::from_str(&text).unwrap();
            if msg != ServerMessage::Heartbeat {
                return msg;
            }
        }
    }
}

async fn send_text(client: &mut Client, text: &str) {
    client.send(Message::Text(text.to_string())).await.unwrap();
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn welcome_then_presence() {
    let (addr, _hub) = spawn_server().await;

    let (mut a, a_id) = connect(addr).await;
    assert_eq!(
        next_message(&mut a).await,
        ServerMessage::Presence { connected_count: 1 }
    );

    let (mut b, b_id) = connect(addr).await;
    assert!(b_id > a_id);
    assert_eq!(
        next_message(&mut b).await,
        ServerMessage::Presence { connected_count: 2 }
    );
    assert_eq!(
        next_message(&mut a).await,
        ServerMessage::Presence { connected_count: 2 }
    );
}

#[tokio::test]
async fn edits_are_relayed_without_echo() {
    let (addr, _hub) = spawn_server().await;
    let (mut a, _) = connect(addr).await;
    next_message(&mut a).await;
    let (mut b, _) = connect(addr).await;
    next_message(&mut b).await;
    next_message(&mut a).await;

    send_text(&mut a, r#"{"kind":"edit","row":1,"col":2,"key":"q","clue":"clue-3-across"}"#).await;
    assert_eq!(
        next_message(&mut b).await,
        ServerMessage::Edit(EditPayload {
            row: 1,
            col: 2,
            key: Some("q".to_string()),
            clue: Some("clue-3-across".to_string()),
        })
    );

    // Had a's edit come back to it, it would arrive before b's reply.
    send_text(&mut b, r#"{"kind":"edit","row":1,"col":2,"key":null}"#).await;
    assert_eq!(
        next_message(&mut a).await,
        ServerMessage::Edit(EditPayload {
            row: 1,
            col: 2,
            key: None,
            clue: None,
        })
    );
}

#[tokio::test]
async fn invalid_messages_are_not_relayed() {
    let (addr, _hub) = spawn_server().await;
    let (mut a, _) = connect(addr).await;
    next_message(&mut a).await;
    let (mut b, _) = connect(addr).await;
    next_message(&mut b).await;
    next_message(&mut a).await;

    send_text(&mut a, "garbage").await;
    send_text(&mut a, r#"{"kind":"edit","row":0,"col":0,"key":"!!"}"#).await;
    send_text(&mut a, r#"{"kind":"heartbeat"}"#).await;
    send_text(&mut a, r#"{"kind":"edit","row":0,"col":0,"key":"w"}"#).await;

    // The only thing b sees is the valid edit.
    assert_eq!(
        next_message(&mut b).await,
        ServerMessage::Edit(EditPayload {
            row: 0,
            col: 0,
            key: Some("w".to_string()),
            clue: None,
        })
    );
}

#[tokio::test]
async fn closing_announces_new_count() {
    let (addr, hub) = spawn_server().await;
    let (mut a, _) = connect(addr).await;
    next_message(&mut a).await;
    let (mut b, _) = connect(addr).await;
    next_message(&mut b).await;
    next_message(&mut a).await;

    a.close(None).await.unwrap();

    assert_eq!(
        next_message(&mut b).await,
        ServerMessage::Presence { connected_count: 1 }
    );
    assert_eq!(hub.live_count(), 1);
}
