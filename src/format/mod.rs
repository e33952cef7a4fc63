//! Text formatting for fixed-width screens.
//!
//! ```text
//! feed text → normalize → (shorten link) → wrap / pad → screen lines
//! ```

pub mod charset;
pub mod shortener;
pub mod text;

pub use charset::normalize;
pub use shortener::{HttpShortener, Provider, Shortener};
pub use text::{first_line, pad, pad_center, pad_right, with_link, wrap, Align};

use futures::future::join_all;

use crate::domain::HeadlineEntry;

/// Turns headlines into display strings, one per entry.
///
/// Without a shortener each line is the headline title. With one, entries
/// that carry a link become `title(45) + " " + short link`; a failed
/// shortening falls back to the title alone.
pub async fn headline_lines(
    headlines: &[HeadlineEntry],
    shortener: Option<&(dyn Shortener + Send + Sync)>,
) -> Vec<String> {
    let Some(shortener) = shortener else {
        return headlines.iter().map(|h| h.title.clone()).collect();
    };

    let lines = headlines.iter().map(|headline| async move {
        let Some(link) = headline.link.as_deref() else {
            return headline.title.clone();
        };
        match shortener.shorten(link).await {
            Ok(short) => with_link(&headline.title, &short),
            Err(e) => {
                tracing::debug!(link, error = %e, "Link shortening failed");
                headline.title.clone()
            }
        }
    });

    join_all(lines).await
}
