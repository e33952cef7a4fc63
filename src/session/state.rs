use std::fmt;

use serde::Deserialize;

use crate::domain::FeedCatalog;

/// The two ways of picking a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerKind {
    /// Lists feed URLs.
    #[default]
    Feeds,
    /// Lists channel titles.
    Channels,
}

impl PickerKind {
    pub fn other(self) -> Self {
        match self {
            PickerKind::Feeds => PickerKind::Channels,
            PickerKind::Channels => PickerKind::Feeds,
        }
    }
}

/// A screen of the navigation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Headlines,
    Picker(PickerKind),
    Exit,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Headlines => write!(f, "headlines"),
            View::Picker(PickerKind::Feeds) => write!(f, "feed picker"),
            View::Picker(PickerKind::Channels) => write!(f, "channel picker"),
            View::Exit => write!(f, "exit"),
        }
    }
}

/// Per-connection navigation data. Never shared between sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_url: String,
    /// A URL typed into a picker during this session. Pickers list it after
    /// the catalog so it can be chosen again by number.
    pub pending_new_url: Option<String>,
}

impl SessionState {
    pub fn new(current_url: impl Into<String>) -> Self {
        Self {
            current_url: current_url.into(),
            pending_new_url: None,
        }
    }

    /// URL for a numeric choice; anything out of range is the default feed.
    pub fn resolve_choice<'a>(&'a self, catalog: &'a FeedCatalog, index: usize) -> &'a str {
        if index < catalog.len() {
            return &catalog.get(index).url;
        }
        match &self.pending_new_url {
            Some(added) if index == catalog.len() => added.as_str(),
            _ => catalog.default_url(),
        }
    }
}

/// What a view handler decided: where to go next and the state to take along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewResult {
    pub next: View,
    pub state: SessionState,
}

impl ViewResult {
    pub fn new(next: View, state: SessionState) -> Self {
        Self { next, state }
    }
}
