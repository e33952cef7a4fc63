/// Channel title shown when a feed has none or could not be read.
pub const NO_TITLE: &str = "No Title found";

/// Single headline shown when a feed yields nothing displayable.
pub const NO_HEADLINES: &str = "(No headlines found)";

/// Headlines that fit a 24x80 screen between header and footer.
pub const MAX_HEADLINES: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineEntry {
    pub title: String,
    pub link: Option<String>,
}

impl HeadlineEntry {
    pub fn new(title: impl Into<String>, link: Option<String>) -> Self {
        Self {
            title: title.into(),
            link,
        }
    }
}

/// One read of a feed, built fresh for every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSnapshot {
    pub title: String,
    pub headlines: Vec<HeadlineEntry>,
}

impl ChannelSnapshot {
    /// Builds a snapshot, substituting the sentinels for an empty title or
    /// an empty headline list.
    pub fn new(title: impl Into<String>, headlines: Vec<HeadlineEntry>) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            NO_TITLE.to_string()
        } else {
            title
        };
        let headlines = if headlines.is_empty() {
            vec![HeadlineEntry::new(NO_HEADLINES, None)]
        } else {
            headlines
        };
        Self { title, headlines }
    }

    /// Snapshot used when the feed could not be fetched or parsed.
    pub fn fallback() -> Self {
        Self::new(String::new(), Vec::new())
    }

    pub fn is_fallback(&self) -> bool {
        self.title == NO_TITLE
            && self.headlines.len() == 1
            && self.headlines[0].title == NO_HEADLINES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_uses_sentinels() {
        let snapshot = ChannelSnapshot::fallback();
        assert_eq!(snapshot.title, NO_TITLE);
        assert_eq!(snapshot.headlines, vec![HeadlineEntry::new(NO_HEADLINES, None)]);
        assert!(snapshot.is_fallback());
    }

    #[test]
    fn test_blank_title_becomes_sentinel() {
        let snapshot = ChannelSnapshot::new("   ", vec![HeadlineEntry::new("One", None)]);
        assert_eq!(snapshot.title, NO_TITLE);
        assert_eq!(snapshot.headlines.len(), 1);
        assert!(!snapshot.is_fallback());
    }

    #[test]
    fn test_keeps_real_content() {
        let snapshot = ChannelSnapshot::new(
            "News",
            vec![HeadlineEntry::new("A", Some("https://example.com/a".into()))],
        );
        assert_eq!(snapshot.title, "News");
        assert_eq!(
            snapshot.headlines[0].link.as_deref(),
            Some("https://example.com/a")
        );
    }
}
