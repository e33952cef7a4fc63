use std::sync::Arc;

use crate::app::{FeedtermError, Result};
use crate::domain::ChannelSnapshot;
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;

/// Outcome of reading a feed for display.
///
/// `snapshot` is always renderable; when the read failed it is the
/// sentinel snapshot and `error` says why.
#[derive(Debug)]
pub struct ChannelRead {
    pub snapshot: ChannelSnapshot,
    pub error: Option<FeedtermError>,
}

/// Fetches and normalizes feeds. Every call hits the network once.
#[derive(Clone)]
pub struct FeedReader {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
}

impl FeedReader {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, normalizer: Normalizer) -> Self {
        Self {
            fetcher,
            normalizer,
        }
    }

    pub async fn try_read(&self, url: &str) -> Result<ChannelSnapshot> {
        let body = self.fetcher.fetch(url).await?;
        self.normalizer.normalize(&body)
    }

    pub async fn read(&self, url: &str) -> ChannelRead {
        match self.try_read(url).await {
            Ok(snapshot) => ChannelRead {
                snapshot,
                error: None,
            },
            Err(e) => {
                tracing::warn!(url, error = %e, "Feed read failed");
                ChannelRead {
                    snapshot: ChannelSnapshot::fallback(),
                    error: Some(e),
                }
            }
        }
    }
}
