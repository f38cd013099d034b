//! HTTP provider reading puzzles from theguardian.com crossword pages.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::domain::puzzle::{PuzzleDocument, PuzzleRef};
use crate::ports::{PuzzleFetchError, PuzzleProvider};

use super::extract::crossword_data;
use super::payload::parse_crossword_json;

/// Default crossword section root.
pub const DEFAULT_BASE_URL: &str = "https://www.theguardian.com/crosswords";

/// Configuration for the Guardian provider.
#[derive(Debug, Clone)]
pub struct GuardianConfig {
    /// Section root; puzzles live at `{base_url}/{kind}/{number}`.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for GuardianConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl GuardianConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Scrapes the puzzle payload embedded in a published crossword page.
///
/// Each fetch is a single GET; failures are not retried.
pub struct GuardianProvider {
    config: GuardianConfig,
    client: Client,
}

impl GuardianProvider {
    pub fn new(config: GuardianConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Page URL for `puzzle`.
    pub fn page_url(&self, puzzle: PuzzleRef) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            puzzle.kind.slug(),
            puzzle.number
        )
    }
}

#[async_trait]
impl PuzzleProvider for GuardianProvider {
    async fn fetch(&self, puzzle: PuzzleRef) -> Result<PuzzleDocument, PuzzleFetchError> {
        let url = self.page_url(puzzle);
        tracing::info!(%url, "fetching crossword page");

        let response = self.client.get(&url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("timed out after {:?}", self.config.timeout)
            } else if e.is_connect() {
                format!("connection failed: {}", e)
            } else {
                e.to_string()
            };
            PuzzleFetchError::Network { puzzle, message }
        })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(PuzzleFetchError::NotFound(puzzle)),
            status => {
                return Err(PuzzleFetchError::Status {
                    puzzle,
                    status: status.as_u16(),
                })
            }
        }

        let html = response
            .text()
            .await
            .map_err(|e| PuzzleFetchError::Network {
                puzzle,
                message: format!("failed to read body: {}", e),
            })?;

        let json = crossword_data(&html).ok_or(PuzzleFetchError::MissingData(puzzle))?;

        parse_crossword_json(&json).map_err(|e| PuzzleFetchError::Parse {
            puzzle,
            message: e.to_string(),
        })
    }
}
