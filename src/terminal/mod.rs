//! The narrow interface to the terminal side of a session.
//!
//! Everything protocol-specific (option negotiation, field encoding,
//! code pages) stays behind [`Terminal`]. The session runner only builds
//! [`Page`]s and reacts to [`Response`]s.

pub mod line;
pub mod page;

pub use line::LineTerminal;
pub use page::{Color, Field, Page};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::app::Result;

/// Rows of the model 2 screen every page is laid out for.
pub const SCREEN_ROWS: u16 = 24;
/// Columns of the model 2 screen every page is laid out for.
pub const SCREEN_COLS: u16 = 80;

/// An attention key: the key that ends input and submits the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Clear,
    /// Program function key, 1..=24.
    Pf(u8),
    /// Program attention key, 1..=3.
    Pa(u8),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Enter => write!(f, "Enter"),
            Key::Clear => write!(f, "Clear"),
            Key::Pf(n) => write!(f, "F{}", n),
            Key::Pa(n) => write!(f, "PA{}", n),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    /// Parses `Enter`, `Clear`, `PF1`..`PF24` (or `F1`..`F24`) and
    /// `PA1`..`PA3`, case-insensitively.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "enter" | "return" => return Ok(Key::Enter),
            "clear" => return Ok(Key::Clear),
            _ => {}
        }

        let numbered = |digits: &str, max: u8, make: fn(u8) -> Key| {
            digits
                .parse::<u8>()
                .ok()
                .filter(|n| (1..=max).contains(n))
                .map(make)
                .ok_or_else(|| format!("Unknown key: {}", s))
        };

        if let Some(digits) = lower.strip_prefix("pf") {
            numbered(digits, 24, Key::Pf)
        } else if let Some(digits) = lower.strip_prefix("pa") {
            numbered(digits, 3, Key::Pa)
        } else if let Some(digits) = lower.strip_prefix('f') {
            numbered(digits, 24, Key::Pf)
        } else {
            Err(format!("Unknown key: {}", s))
        }
    }
}

/// What the terminal reported about itself during negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub terminal_type: String,
    pub rows: u16,
    pub cols: u16,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            terminal_type: "unknown".to_string(),
            rows: SCREEN_ROWS,
            cols: SCREEN_COLS,
        }
    }
}

/// The user's answer to a page: the key pressed and the input field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub key: Key,
    pub values: HashMap<String, String>,
}

impl Response {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            values: HashMap::new(),
        }
    }

    pub fn with_value(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    /// The trimmed value of a field, or `None` when absent or blank.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// A connected terminal able to show pages and collect responses.
#[async_trait]
pub trait Terminal: Send {
    /// Performs the opening handshake with the device.
    async fn negotiate(&mut self) -> Result<DeviceInfo>;

    /// Shows `page` and waits until the user presses one of its accepted
    /// keys. Errors are fatal to the session.
    async fn submit(&mut self, page: &Page) -> Result<Response>;
}
