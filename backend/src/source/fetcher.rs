//! Network access behind a trait so the loader can run against fakes.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::error::{ErrorContext, SourceError, SourceResult};

/// Downloads a whole resource into memory.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> SourceResult<Vec<u8>>;
}

/// `reqwest`-backed fetcher with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> SourceResult<Vec<u8>> {
        let context = || ErrorContext::new("fetch").with_resource(url.to_string());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::transport(e.to_string(), context()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unexpected status"),
                context(),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::transport(format!("read body failed: {}", e), context()))?;
        debug!(url, bytes = body.len(), "Fetched source file");
        Ok(body.to_vec())
    }
}
