use crate::adapters::{SanitizeError, Sanitizer};
use crate::lexicon::ChargedWords;
use crate::models::{ArticleResult, ProcessingStatus};
use crate::scoring::calculate_jaundice_rate;
use crate::text::Tokenizer;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Runs fetch, sanitize, tokenize and score for one URL.
///
/// Every failure ends the run with a status instead of an error; callers always
/// get exactly one [`ArticleResult`] back. Fetch and tokenize each get their
/// own `timeout` window.
#[derive(Clone)]
pub struct ArticleProcessor {
    client: Client,
    charged_words: Arc<ChargedWords>,
    tokenizer: Arc<dyn Tokenizer>,
    sanitizer: Arc<dyn Sanitizer>,
    timeout: Duration,
}

impl ArticleProcessor {
    pub fn new(
        client: Client,
        charged_words: Arc<ChargedWords>,
        tokenizer: Arc<dyn Tokenizer>,
        sanitizer: Arc<dyn Sanitizer>,
    ) -> Self {
        Self {
            client,
            charged_words,
            tokenizer,
            sanitizer,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn process(&self, url: &str) -> ArticleResult {
        log::debug!("Visiting: {}", url);

        let html = match self.fetch(url).await {
            Ok(html) => html,
            Err(status) => return ArticleResult::failed(url, status),
        };

        let text = match self.sanitizer.sanitize(&html) {
            Ok(text) => text,
            Err(SanitizeError::ArticleNotFound) => {
                log::warn!("No article container at {}", url);
                return ArticleResult::failed(url, ProcessingStatus::ParsingError);
            }
        };

        let words = match timeout(self.timeout, self.tokenizer.split_by_words(&text)).await {
            Ok(Ok(words)) => words,
            Ok(Err(e)) => {
                log::error!("Tokenizer failed for {}: {}", url, e);
                return ArticleResult::failed(url, ProcessingStatus::ParsingError);
            }
            Err(_) => {
                log::warn!("Tokenizing {} took longer than {:?}", url, self.timeout);
                return ArticleResult::failed(url, ProcessingStatus::Timeout);
            }
        };

        let rate = calculate_jaundice_rate(&words, &self.charged_words);
        log::debug!("Scored {}: {} words, rate {}", url, words.len(), rate);
        ArticleResult::ok(url, words.len(), rate)
    }

    async fn fetch(&self, url: &str) -> Result<String, ProcessingStatus> {
        let parsed = match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => parsed,
            Ok(parsed) => {
                log::warn!("Unsupported scheme '{}' in {}", parsed.scheme(), url);
                return Err(ProcessingStatus::FetchError);
            }
            Err(e) => {
                log::warn!("Invalid URL {:?}: {}", url, e);
                return Err(ProcessingStatus::FetchError);
            }
        };

        match timeout(self.timeout, self.download(parsed)).await {
            Ok(Ok(Ok(html))) => {
                log::debug!("Fetched {}: {} bytes", url, html.len());
                Ok(html)
            }
            Ok(Ok(Err(status))) => {
                log::warn!("HTTP error {} for {}", status, url);
                Err(ProcessingStatus::FetchError)
            }
            Ok(Err(e)) if e.is_timeout() => {
                log::warn!("Client timed out fetching {}: {}", url, e);
                Err(ProcessingStatus::Timeout)
            }
            Ok(Err(e)) => {
                log::warn!("Failed to fetch {}: {}", url, e);
                Err(ProcessingStatus::FetchError)
            }
            Err(_) => {
                log::warn!("Fetching {} took longer than {:?}", url, self.timeout);
                Err(ProcessingStatus::Timeout)
            }
        }
    }

    /// GET `url`; the inner `Err` carries a non-success status.
    async fn download(&self, url: Url) -> reqwest::Result<Result<String, StatusCode>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Ok(Err(status));
        }
        Ok(Ok(response.text().await?))
    }
}
