use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app::{FeedtermError, Result};

/// A URL-shortening service.
#[async_trait]
pub trait Shortener {
    async fn shorten(&self, long_url: &str) -> Result<String>;
}

/// Supported shortening services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    TinyUrl,
    IsGd,
}

impl Provider {
    fn default_endpoint(self) -> &'static str {
        match self {
            Provider::TinyUrl => "https://tinyurl.com/api-create.php",
            Provider::IsGd => "https://is.gd/create.php",
        }
    }

    fn request_url(self, endpoint: &Url, long_url: &str) -> Result<Url> {
        let url = match self {
            Provider::TinyUrl => Url::parse_with_params(endpoint.as_str(), &[("url", long_url)])?,
            Provider::IsGd => Url::parse_with_params(
                endpoint.as_str(),
                &[("format", "simple"), ("url", long_url)],
            )?,
        };
        Ok(url)
    }
}

/// Shortener backed by a plain-text HTTP API (tinyurl, is.gd).
pub struct HttpShortener {
    client: Client,
    provider: Provider,
    endpoint: Url,
}

impl HttpShortener {
    pub fn new(provider: Provider, endpoint: Option<&str>, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint.unwrap_or(provider.default_endpoint()))?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("feedterm/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            provider,
            endpoint,
        })
    }
}

#[async_trait]
impl Shortener for HttpShortener {
    async fn shorten(&self, long_url: &str) -> Result<String> {
        let request_url = self.provider.request_url(&self.endpoint, long_url)?;
        let response = self.client.get(request_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedtermError::Shorten(format!(
                "{:?} answered HTTP {}",
                self.provider,
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        let short = body.trim();
        if !short.starts_with("http") {
            return Err(FeedtermError::Shorten(format!(
                "{:?} returned {:?}",
                self.provider, short
            )));
        }

        Ok(short.to_string())
    }
}
