use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crossword_together::adapters::fixtures::FilePuzzleProvider;
use crossword_together::adapters::guardian::GuardianProvider;
use crossword_together::adapters::http::app_router;
use crossword_together::application::LoadPuzzleHandler;
use crossword_together::config::AppConfig;
use crossword_together::domain::hub::BroadcastHub;
use crossword_together::ports::PuzzleProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let provider: Arc<dyn PuzzleProvider> = match config.provider.fixtures_path() {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "serving puzzles from fixtures");
            Arc::new(FilePuzzleProvider::new(dir))
        }
        None => {
            tracing::info!(base_url = %config.provider.base_url, "serving puzzles from the Guardian");
            Arc::new(GuardianProvider::new(config.provider.guardian())?)
        }
    };
    let load_handler = Arc::new(LoadPuzzleHandler::new(provider));

    let hub = Arc::new(BroadcastHub::new(config.hub.settings()));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let heartbeat = tokio::spawn(Arc::clone(&hub).run_heartbeat(shutdown_rx));

    let app = app_router(&config.server, hub, load_handler);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("shutting down");
        })
        .await?;

    if shutdown_tx.send(true).is_err() {
        tracing::debug!("heartbeat loop already stopped");
    }
    heartbeat.await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
