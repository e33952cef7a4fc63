use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::app::{FeedtermError, Result};
use crate::fetcher::{Fetcher, DEFAULT_TIMEOUT_SECS};

/// Bytes of an error response body kept for the error message.
const ERROR_BODY_LIMIT: usize = 1024;

pub struct HttpFetcher {
    client: Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concat!("feedterm/", env!("CARGO_PKG_VERSION")),
        )
    }

    pub fn with_timeout(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            timeout_secs: timeout.as_secs(),
        })
    }

    fn map_error(&self, e: reqwest::Error) -> FeedtermError {
        if e.is_timeout() {
            FeedtermError::Timeout(self.timeout_secs)
        } else {
            FeedtermError::Network(e)
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        if status >= 300 {
            let body = read_prefix(response, ERROR_BODY_LIMIT).await;
            return Err(FeedtermError::HttpStatus {
                status,
                body: String::from_utf8_lossy(&body).trim().to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.map_error(e))?;
        Ok(body.to_vec())
    }
}

/// Reads at most `limit` bytes of the body; read errors end the prefix early.
async fn read_prefix(mut response: Response, limit: usize) -> Vec<u8> {
    let mut body = Vec::new();
    while body.len() < limit {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let take = chunk.len().min(limit - body.len());
                body.extend_from_slice(&chunk[..take]);
            }
            _ => break,
        }
    }
    body
}
