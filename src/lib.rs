//! # feedterm
//!
//! RSS/Atom headlines for character-cell terminals.
//!
//! ## Architecture
//!
//! Each connection runs its own session over a shared, read-only context:
//!
//! ```text
//! Fetcher → Normalizer → Formatter → Screen → Terminal
//!                                       ↑          │
//!                                       └─ Session ┘
//! ```
//!
//! - [`fetcher`]: bounded-time HTTP GET of a feed document
//! - [`normalizer`]: RSS/Atom parsing into a [`ChannelSnapshot`](domain::ChannelSnapshot)
//! - [`format`]: charset folding, wrapping, padding and link shortening
//! - [`screen`]: 80x24 page layouts for each view
//! - [`session`]: the view state machine and the loop that drives it
//! - [`terminal`]: the terminal trait and the telnet line-mode adapter
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve telnet sessions on port 7300 using ./rssfeed.url
//! feedterm serve
//!
//! # Run one session in this terminal
//! feedterm console
//!
//! # Print the catalog with channel titles
//! feedterm list
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct holds everything sessions
/// share: catalog, feed reader, shortener, keybindings.
pub mod app;

/// Command-line interface using clap.
///
/// - `serve` - Accept telnet sessions (default)
/// - `console` - Run one session locally
/// - `list` - Print the feed catalog
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/feedterm/config.toml` and reads the feed list file.
pub mod config;

/// Core domain models.
///
/// - [`FeedCatalog`](domain::FeedCatalog): the configured feeds
/// - [`ChannelSnapshot`](domain::ChannelSnapshot): one fetch of a feed
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed fetching
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`FeedReader`](fetcher::FeedReader): fetch plus normalize, with fallback
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): Concurrent title lookup with semaphore
pub mod fetcher;

/// Text formatting for fixed-width screens.
pub mod format;

/// Feed parsing and normalization.
///
/// Converts RSS 0.9x/1.0/2.0, Atom 0.3/1.0 and JSON Feed 1.0 into
/// [`ChannelSnapshot`](domain::ChannelSnapshot)s.
pub mod normalizer;

/// Page builders for the headline and picker views.
pub mod screen;

/// TCP server accepting telnet sessions.
pub mod server;

/// Session navigation: views, transitions and the session loop.
pub mod session;

/// The terminal abstraction sessions talk to.
pub mod terminal;

/// Local console terminal built with ratatui.
pub mod tui;
