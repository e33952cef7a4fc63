use crate::app::{FeedtermError, Result};
use crate::domain::channel::NO_TITLE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub url: String,
    pub title: Option<String>,
}

impl CatalogEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(NO_TITLE)
    }
}

/// The configured feeds, in file order.
///
/// Loaded once at startup and shared read-only between sessions. The first
/// entry is the process-wide default feed; lookups past the end fall back to
/// it.
#[derive(Debug, Clone)]
pub struct FeedCatalog {
    entries: Vec<CatalogEntry>,
}

impl FeedCatalog {
    pub fn new(urls: Vec<String>) -> Result<Self> {
        if urls.is_empty() {
            return Err(FeedtermError::Config("Feed list contains no URLs".into()));
        }
        Ok(Self {
            entries: urls.into_iter().map(CatalogEntry::new).collect(),
        })
    }

    /// Attaches resolved channel titles, matched to entries by position.
    pub fn with_titles(mut self, titles: Vec<Option<String>>) -> Self {
        for (entry, title) in self.entries.iter_mut().zip(titles) {
            entry.title = title;
        }
        self
    }

    pub fn default_url(&self) -> &str {
        &self.entries[0].url
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn urls(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.url.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> &CatalogEntry {
        self.entries.get(index).unwrap_or(&self.entries[0])
    }
}
