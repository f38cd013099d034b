//! Integration tests for the Guardian page provider.
//!
//! A canned crossword site is bound to an ephemeral port and the provider
//! is pointed at it:
//! 1. A published page yields its decoded puzzle
//! 2. 404s become "not found", other failures keep their status
//! 3. Pages without a usable payload are reported as such

use std::net::SocketAddr;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crossword_together::adapters::guardian::{GuardianConfig, GuardianProvider};
use crossword_together::domain::puzzle::{PuzzleKind, PuzzleRef};
use crossword_together::ports::{PuzzleFetchError, PuzzleProvider};

// =============================================================================
// Test Infrastructure
// =============================================================================

const PAYLOAD: &str = r#"{
    "id": "crosswords/quick/1",
    "name": "Quick crossword No 1 & friends",
    "dimensions": {"rows": 3, "cols": 3},
    "entries": [
        {"id": "1-across", "number": 1, "length": 3, "direction": "across",
         "clue": "Caf&eacute; order (3)", "position": {"x": 0, "y": 0}},
        {"id": "1-down", "number": 1, "length": 3, "direction": "down",
         "clue": "Taxi (3)", "position": {"x": 0, "y": 0}}
    ]
}"#;

fn page_with(data: &str) -> String {
    let escaped = data.replace('&', "&amp;").replace('"', "&quot;");
    format!(
        r#"<html><body><div class="crossword js-crossword" data-crossword-data="{}"></div></body></html>"#,
        escaped
    )
}

async fn crossword_page(Path(number): Path<u32>) -> (StatusCode, Html<String>) {
    match number {
        1 => (StatusCode::OK, Html(page_with(PAYLOAD))),
        3 => (StatusCode::SERVICE_UNAVAILABLE, Html("down".to_string())),
        4 => (
            StatusCode::OK,
            Html("<html><body><p>No crossword here</p></body></html>".to_string()),
        ),
        5 => (StatusCode::OK, Html(page_with("{\"name\": 42"))),
        _ => (StatusCode::NOT_FOUND, Html("missing".to_string())),
    }
}

async fn spawn_site() -> SocketAddr {
    let app = Router::new().route("/crosswords/quick/:number", get(crossword_page));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn provider() -> GuardianProvider {
    let addr = spawn_site().await;
    GuardianProvider::new(
        GuardianConfig::default().with_base_url(format!("http://{}/crosswords/", addr)),
    )
    .unwrap()
}

fn quick(number: u32) -> PuzzleRef {
    PuzzleRef::new(PuzzleKind::Quick, number)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn published_page_yields_decoded_document() {
    let provider = provider().await;

    let document = provider.fetch(quick(1)).await.unwrap();

    assert_eq!(document.name, "Quick crossword No 1 & friends");
    assert_eq!(document.entries.len(), 2);
    assert_eq!(document.entries[0].clue, "Caf&eacute; order (3)");
}

#[tokio::test]
async fn missing_page_is_not_found() {
    let provider = provider().await;

    let err = provider.fetch(quick(2)).await.unwrap_err();

    assert_eq!(err, PuzzleFetchError::NotFound(quick(2)));
}

#[tokio::test]
async fn other_error_statuses_are_kept() {
    let provider = provider().await;

    let err = provider.fetch(quick(3)).await.unwrap_err();

    assert_eq!(
        err,
        PuzzleFetchError::Status {
            puzzle: quick(3),
            status: 503,
        }
    );
}

#[tokio::test]
async fn page_without_payload_is_missing_data() {
    let provider = provider().await;

    let err = provider.fetch(quick(4)).await.unwrap_err();

    assert_eq!(err, PuzzleFetchError::MissingData(quick(4)));
}

#[tokio::test]
async fn undecodable_payload_is_a_parse_error() {
    let provider = provider().await;

    let err = provider.fetch(quick(5)).await.unwrap_err();

    assert!(matches!(err, PuzzleFetchError::Parse { puzzle, .. } if puzzle == quick(5)));
}

#[tokio::test]
async fn unreachable_site_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let provider = GuardianProvider::new(
        GuardianConfig::default().with_base_url(format!("http://{}/crosswords", addr)),
    )
    .unwrap();

    let err = provider.fetch(quick(1)).await.unwrap_err();

    assert!(matches!(err, PuzzleFetchError::Network { .. }));
}
