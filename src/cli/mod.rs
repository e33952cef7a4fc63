pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "feedterm")]
#[command(about = "RSS/Atom headlines for character-cell terminals", long_about = None)]
pub struct Cli {
    /// Port to listen on (overrides the config file)
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the feed list file (overrides the config file)
    #[arg(short, long, global = true)]
    pub feeds: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Accept telnet sessions (default)
    Serve,
    /// Run one session in this terminal
    Console,
    /// Print the feed catalog with resolved channel titles
    List,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(feeds) = &self.feeds {
            config.feeds.list_path = feeds.clone();
        }
    }

    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::parse_from(["feedterm"]);
        assert_eq!(cli.command(), Commands::Serve);
        assert_eq!(cli.port, None);
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let cli = Cli::parse_from(["feedterm", "--port", "2323", "console", "--feeds", "/tmp/list.url"]);
        assert_eq!(cli.command(), Commands::Console);

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.server.port, 2323);
        assert_eq!(config.feeds.list_path, PathBuf::from("/tmp/list.url"));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["feedterm", "--port", "99999"]).is_err());
    }
}
