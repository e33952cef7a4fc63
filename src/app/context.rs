use std::sync::Arc;
use std::time::Duration;

use crate::app::error::Result;
use crate::config::{load_feed_list, Config, KeybindingConfig};
use crate::domain::FeedCatalog;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::parallel::ParallelFetcher;
use crate::fetcher::{FeedReader, Fetcher};
use crate::format::{HttpShortener, Shortener};
use crate::normalizer::Normalizer;
use crate::session::PickerKind;

/// Everything sessions share. Built once at startup and never mutated.
pub struct AppContext {
    pub catalog: FeedCatalog,
    pub reader: FeedReader,
    pub shortener: Option<Arc<dyn Shortener + Send + Sync>>,
    pub keybindings: KeybindingConfig,
    pub default_picker: PickerKind,
}

impl AppContext {
    pub fn new(
        catalog: FeedCatalog,
        reader: FeedReader,
        shortener: Option<Arc<dyn Shortener + Send + Sync>>,
        keybindings: KeybindingConfig,
        default_picker: PickerKind,
    ) -> Self {
        Self {
            catalog,
            reader,
            shortener,
            keybindings,
            default_picker,
        }
    }

    /// Loads the feed list and resolves every channel title once.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let catalog = load_feed_list(&config.feeds.list_path)?;

        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::with_timeout(
            Duration::from_secs(config.fetch.timeout_secs),
            &config.fetch.user_agent,
        )?);
        let reader = FeedReader::new(fetcher, Normalizer::new(config.fetch.max_headlines));

        let titles = ParallelFetcher::with_workers(reader.clone(), config.fetch.workers)
            .fetch_titles(catalog.urls())
            .await;
        let resolved = titles.iter().filter(|t| t.is_some()).count();
        tracing::info!(feeds = catalog.len(), resolved, "Loaded feed catalog");
        let catalog = catalog.with_titles(titles);

        let shortener: Option<Arc<dyn Shortener + Send + Sync>> = if config.shortener.enabled {
            Some(Arc::new(HttpShortener::new(
                config.shortener.provider,
                config.shortener.endpoint.as_deref(),
                Duration::from_secs(config.shortener.timeout_secs),
            )?))
        } else {
            None
        };

        Ok(Self::new(
            catalog,
            reader,
            shortener,
            config.keybindings.clone(),
            config.session.default_picker,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FeedtermError;
    use wiremock::matchers::path;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>Mock Channel</title>
<item><title>One</title></item></channel></rss>"#;

    #[tokio::test]
    async fn test_from_config_resolves_titles() {
        let server = MockServer::start().await;
        Mock::given(path("/good"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RSS))
            .mount(&server)
            .await;
        Mock::given(path("/bad"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("rssfeed.url");
        std::fs::write(&list, format!("{0}/good\n{0}/bad\n", server.uri())).unwrap();

        let mut config = Config::default();
        config.feeds.list_path = list;
        let ctx = AppContext::from_config(&config).await.unwrap();

        let titles: Vec<&str> = ctx.catalog.entries().iter().map(|e| e.display_title()).collect();
        assert_eq!(titles, vec!["Mock Channel", "No Title found"]);
        assert!(ctx.shortener.is_none());
        assert_eq!(ctx.default_picker, PickerKind::Feeds);
    }

    #[tokio::test]
    async fn test_from_config_with_shortener() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("rssfeed.url");
        // Nothing listens on port 1, so title lookup fails quickly
        std::fs::write(&list, "http://127.0.0.1:1/feed\n").unwrap();

        let mut config = Config::default();
        config.feeds.list_path = list;
        config.shortener.enabled = true;
        let ctx = AppContext::from_config(&config).await.unwrap();

        assert!(ctx.shortener.is_some());
    }

    #[tokio::test]
    async fn test_from_config_without_feed_list_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.feeds.list_path = dir.path().join("missing.url");

        let result = AppContext::from_config(&config).await;
        assert!(matches!(result, Err(FeedtermError::Config(_))));
    }
}
