//! Text fetching for buffered fill.
//!
//! Each URL is fetched independently and failures are isolated per URL.
//! Requests may run concurrently, but the resulting text is always
//! concatenated in URL list order.

use crate::content::{ContentBuffer, ContentSource};
use crate::error::FillError;
use crate::warning::RunWarning;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Something that can turn a URL into text
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Fetch the body at `url` decoded as text.
    async fn fetch_text(&self, url: &str) -> Result<String, FillError>;
}

/// HTTP text source backed by reqwest with a per-request timeout
#[derive(Debug, Clone)]
pub struct HttpTextSource {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTextSource {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FillError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FillError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl TextSource for HttpTextSource {
    async fn fetch_text(&self, url: &str) -> Result<String, FillError> {
        let failure = |reason: String| FillError::FetchFailure {
            url: url.to_string(),
            reason,
        };
        let describe = |e: reqwest::Error| {
            if e.is_timeout() {
                format!("timed out after {}s", self.timeout.as_secs())
            } else {
                e.to_string()
            }
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| failure(describe(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failure(format!("HTTP {}", status)));
        }

        response.text().await.map_err(|e| failure(describe(e)))
    }
}

/// Outcome of fetching every configured URL
#[derive(Debug, Clone)]
pub struct FetchReport {
    /// Concatenated text, `None` when nothing usable was fetched
    pub buffer: Option<ContentBuffer>,
    pub attempted: usize,
    pub succeeded: usize,
    /// One warning per failed URL, in URL order
    pub failures: Vec<RunWarning>,
}

impl FetchReport {
    /// Content source for the run; `None` means the caller must fall back to zero fill.
    pub fn source(&self) -> Option<ContentSource> {
        self.buffer.clone().map(ContentSource::Buffer)
    }
}

/// Fetch every URL with at most `max_concurrent` requests in flight.
pub async fn fetch_all<S>(source: &S, urls: &[String], max_concurrent: usize) -> FetchReport
where
    S: TextSource + ?Sized,
{
    info!(urls = urls.len(), max_concurrent, "Fetching text sources");

    // `buffered` yields results in input order regardless of completion order.
    let results: Vec<(&String, Result<String, FillError>)> = stream::iter(urls.iter())
        .map(|url| async move { (url, source.fetch_text(url).await) })
        .buffered(max_concurrent.max(1))
        .collect()
        .await;

    let mut text = String::new();
    let mut succeeded = 0;
    let mut failures = Vec::new();

    for (url, result) in results {
        match result {
            Ok(body) => {
                debug!(%url, bytes = body.len(), "Fetched text source");
                succeeded += 1;
                text.push_str(&body);
            }
            Err(e) => {
                let reason = match e {
                    FillError::FetchFailure { reason, .. } => reason,
                    other => other.to_string(),
                };
                warn!(%url, %reason, "Skipping text source");
                failures.push(RunWarning::FetchFailure {
                    url: url.clone(),
                    reason,
                });
            }
        }
    }

    let buffer = ContentBuffer::new(text.into_bytes());
    info!(
        attempted = urls.len(),
        succeeded,
        buffer_bytes = buffer.as_ref().map(|b| b.len()).unwrap_or(0),
        "Text fetch complete"
    );

    FetchReport {
        buffer,
        attempted: urls.len(),
        succeeded,
        failures,
    }
}
