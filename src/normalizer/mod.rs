use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{FeedtermError, Result};
use crate::domain::{ChannelSnapshot, HeadlineEntry, MAX_HEADLINES};
use crate::format::normalize;

/// Converts RSS/Atom documents into display-ready [`ChannelSnapshot`]s.
#[derive(Debug, Clone)]
pub struct Normalizer {
    max_headlines: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(MAX_HEADLINES)
    }
}

impl Normalizer {
    pub fn new(max_headlines: usize) -> Self {
        Self { max_headlines }
    }

    pub fn normalize(&self, body: &[u8]) -> Result<ChannelSnapshot> {
        let feed = parser::parse(body).map_err(|e| FeedtermError::FeedParse(e.to_string()))?;

        let title = feed
            .title
            .map(|t| clean_text(&t.content))
            .unwrap_or_default();

        let headlines: Vec<HeadlineEntry> = feed
            .entries
            .into_iter()
            .filter_map(|entry| {
                let title = entry
                    .title
                    .map(|t| clean_text(&t.content))
                    .unwrap_or_default();
                if title.is_empty() {
                    return None;
                }
                let link = entry
                    .links
                    .first()
                    .map(|l| l.href.trim().to_string())
                    .filter(|l| !l.is_empty());
                Some(HeadlineEntry::new(title, link))
            })
            .take(self.max_headlines)
            .collect();

        Ok(ChannelSnapshot::new(title, headlines))
    }
}

fn clean_text(raw: &str) -> String {
    normalize(decode_html_entities(raw.trim()).trim())
}
