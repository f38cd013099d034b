//! Assembly of the full HTTP surface.

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::adapters::sse::stream_router;
use crate::adapters::websocket::websocket_router;
use crate::application::LoadPuzzleHandler;
use crate::config::ServerConfig;
use crate::domain::hub::BroadcastHub;

use super::puzzle::{puzzle_routes, PuzzleHandlers};

/// Builds the application router.
///
/// | Route                          | Purpose                              |
/// |--------------------------------|--------------------------------------|
/// | `GET /api/puzzles/:kind/:num`  | Puzzle with its built grid           |
/// | `GET /ws`                      | WebSocket realtime channel           |
/// | `GET /stream`, `POST /fill`    | Server-push realtime channel         |
/// | `GET /health`                  | Liveness                             |
///
/// The request timeout applies to puzzle routes only; realtime connections
/// are long-lived by nature.
pub fn app_router(
    server: &ServerConfig,
    hub: Arc<BroadcastHub>,
    load_handler: Arc<LoadPuzzleHandler>,
) -> Router {
    let puzzles = puzzle_routes(PuzzleHandlers::new(load_handler))
        .layer(TimeoutLayer::new(server.request_timeout()));

    Router::new()
        .nest("/api/puzzles", puzzles)
        .merge(websocket_router(Arc::clone(&hub)))
        .merge(stream_router(hub))
        .route("/health", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_origins_list()))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{PuzzleFetchError, PuzzleProvider};
    use crate::domain::puzzle::{PuzzleDocument, PuzzleRef};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    struct NoPuzzles;

    #[async_trait]
    impl PuzzleProvider for NoPuzzles {
        async fn fetch(&self, puzzle: PuzzleRef) -> Result<PuzzleDocument, PuzzleFetchError> {
            Err(PuzzleFetchError::NotFound(puzzle))
        }
    }

    fn router(server: &ServerConfig) -> Router {
        app_router(
            server,
            Arc::new(BroadcastHub::default()),
            Arc::new(LoadPuzzleHandler::new(Arc::new(NoPuzzles))),
        )
    }

    #[tokio::test]
    async fn health_responds_ok() {
        let response = router(&ServerConfig::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn configured_origin_is_echoed() {
        let server = ServerConfig {
            cors_origins: Some("http://localhost:5173".to_string()),
            ..Default::default()
        };
        let response = router(&server)
            .oneshot(
                Request::get("/health")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
    }
}
