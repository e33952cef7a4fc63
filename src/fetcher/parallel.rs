use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::fetcher::FeedReader;

pub const DEFAULT_WORKERS: usize = 10;

/// Resolves channel titles for many feeds with bounded concurrency.
pub struct ParallelFetcher {
    reader: FeedReader,
    semaphore: Arc<Semaphore>,
}

impl ParallelFetcher {
    pub fn with_workers(reader: FeedReader, workers: usize) -> Self {
        Self {
            reader,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Fetches each URL once and returns its channel title, in input order.
    ///
    /// Feeds that fail to load yield `None`.
    pub async fn fetch_titles(&self, urls: Vec<String>) -> Vec<Option<String>> {
        let mut handles = Vec::new();

        for url in urls {
            let reader = self.reader.clone();
            let semaphore = self.semaphore.clone();

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                let read = reader.read(&url).await;
                if read.error.is_some() {
                    return None;
                }
                tracing::debug!(url = %url, title = %read.snapshot.title, "Resolved channel title");
                Some(read.snapshot.title)
            });

            handles.push(handle);
        }

        let mut titles = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(title) => titles.push(title),
                Err(e) => {
                    tracing::error!("Task join error: {}", e);
                    titles.push(None);
                }
            }
        }

        titles
    }
}
