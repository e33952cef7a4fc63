//! The feed list file: one feed URL per line.

use std::fs;
use std::path::Path;

use crate::app::{FeedtermError, Result};
use crate::domain::FeedCatalog;

/// Extracts feed URLs from the list file's content.
///
/// A line counts only when `http` appears in it exactly once, which skips
/// blank lines, comments and lines with several URLs run together.
pub fn parse_feed_list(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| line.matches("http").count() == 1)
        .map(|line| line.trim().to_string())
        .collect()
}

/// Reads the list file into a catalog. A missing file or a file without
/// usable lines is a configuration error.
pub fn load_feed_list(path: &Path) -> Result<FeedCatalog> {
    let content = fs::read_to_string(path).map_err(|e| {
        FeedtermError::Config(format!("Could not read feed list {}: {}", path.display(), e))
    })?;

    FeedCatalog::new(parse_feed_list(&content)).map_err(|_| {
        FeedtermError::Config(format!("Feed list {} contains no URLs", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_keeps_lines_with_one_http() {
        let content = "\
https://a.example/rss
  http://b.example/feed.xml  

# comment without a url
https://c.example/rss https://d.example/rss
not a feed
";
        assert_eq!(
            parse_feed_list(content),
            vec!["https://a.example/rss", "http://b.example/feed.xml"]
        );
    }

    #[test]
    fn test_load_uses_first_url_as_default() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "junk\nhttps://first.example/rss\nhttps://second.example/rss").unwrap();

        let catalog = load_feed_list(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.default_url(), "https://first.example/rss");
    }

    #[test]
    fn test_list_without_urls_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "nothing to see").unwrap();

        let err = load_feed_list(file.path()).unwrap_err();
        assert!(matches!(err, FeedtermError::Config(msg) if msg.contains("no URLs")));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_feed_list(&dir.path().join("absent.url")).unwrap_err();
        assert!(matches!(err, FeedtermError::Config(_)));
    }
}
