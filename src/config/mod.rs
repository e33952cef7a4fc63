//! Configuration management for feedterm.
//!
//! Configuration is read from `~/.config/feedterm/config.toml` unless a path
//! is given on the command line. If the default file doesn't exist, one with
//! comments is created.

pub mod feed_list;
pub mod keybindings;

pub use feed_list::{load_feed_list, parse_feed_list};
pub use keybindings::KeybindingConfig;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::MAX_HEADLINES;
use crate::fetcher::parallel::DEFAULT_WORKERS;
use crate::fetcher::DEFAULT_TIMEOUT_SECS;
use crate::format::Provider;
use crate::session::PickerKind;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub feeds: FeedsConfig,
    pub fetch: FetchConfig,
    pub shortener: ShortenerConfig,
    pub session: SessionConfig,
    pub keybindings: KeybindingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 7300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    /// One URL per line; the first is the default feed.
    pub list_path: PathBuf,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            list_path: PathBuf::from("rssfeed.url"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub max_headlines: usize,
    /// Concurrent title lookups at startup.
    pub workers: usize,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_headlines: MAX_HEADLINES,
            workers: DEFAULT_WORKERS,
            user_agent: concat!("feedterm/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShortenerConfig {
    pub enabled: bool,
    pub provider: Provider,
    /// Overrides the provider's public endpoint.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: Provider::default(),
            endpoint: None,
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Picker opened by the change-channel key.
    pub default_picker: PickerKind,
}

impl Config {
    /// Load configuration from `path`, or from the default path.
    ///
    /// A missing default file is created with comments and defaults are
    /// used. An explicit path must exist. Missing fields use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    return Ok(Self::default());
                }
                default_path
            }
        };

        Self::from_file(&config_path)
    }

    /// Get the default config file path: `~/.config/feedterm/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("feedterm").join("config.toml"))
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config
            .keybindings
            .validate()
            .map_err(ConfigError::Keybinding)?;

        Ok(config)
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> &'static str {
        r##"# feedterm configuration
#
# Keys can be specified as:
# - Enter, Clear
# - Function keys: PF1-PF24 (or F1-F24)
# - Program attention keys: PA1-PA3

[server]
bind = "0.0.0.0"
port = 7300

[feeds]
# One feed URL per line; the first one is shown when a session starts
list_path = "rssfeed.url"

[fetch]
timeout_secs = 10
max_headlines = 18
# Concurrent feed lookups when resolving channel titles at startup
workers = 10

[shortener]
# Show a shortened link next to each headline
enabled = false
# "tinyurl" or "isgd"
provider = "tinyurl"
timeout_secs = 5

[session]
# Picker opened by change_channel: "feeds" or "channels"
default_picker = "feeds"

[keybindings]
# Headline view
refresh = ["Enter"]
change_channel = ["PF4"]
quit = ["PF3"]

# Picker views
select = ["Enter"]
switch_picker = ["PF2"]
back = ["PF3"]
picker_quit = ["PF9"]
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid keybinding: {0}")]
    Keybinding(String),
}
