pub mod http_fetcher;
pub mod parallel;
pub mod reader;

pub use reader::{ChannelRead, FeedReader};

use async_trait::async_trait;

use crate::app::Result;

/// Default time budget for a single feed request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[async_trait]
pub trait Fetcher {
    /// Fetches the raw feed document at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
