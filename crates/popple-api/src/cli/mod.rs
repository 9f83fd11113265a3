//! CLI command definitions and dispatch for the `popple` binary.
//!
//! Uses clap derive macros for argument parsing. Every karma command is
//! scoped to one server via `--server`.

pub mod announce;
pub mod karma;
pub mod leaderboard;
pub mod status;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Track karma for the entities of your chat servers.
#[derive(Parser)]
#[command(name = "popple", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// SQLite database URL (overrides config.toml).
    #[arg(long, global = true, env = "POPPLE_DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Adjust or look up karma.
    Karma {
        #[command(subcommand)]
        action: karma::KarmaCommand,
    },

    /// Show the highest (or lowest) karma entities of a server.
    #[command(alias = "board")]
    Leaderboard {
        /// Server ID.
        #[arg(long)]
        server: String,

        /// Rank from the bottom instead of the top.
        #[arg(long)]
        bottom: bool,

        /// Number of entries (default from config.toml).
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Turn public karma announcements on or off for a server.
    Announce {
        /// Server ID.
        #[arg(long)]
        server: String,

        /// New announce setting.
        setting: Toggle,
    },

    /// Show a server's configuration.
    Config {
        /// Server ID.
        #[arg(long)]
        server: String,
    },

    /// Show data directory, database, and defaults in use.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// On/off switch argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        self == Toggle::On
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_leaderboard_flags() {
        let cli = Cli::try_parse_from([
            "popple", "leaderboard", "--server", "guild", "--bottom", "--limit", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Leaderboard {
                server,
                bottom,
                limit,
            } => {
                assert_eq!(server, "guild");
                assert!(bottom);
                assert_eq!(limit, Some(5));
            }
            _ => panic!("expected leaderboard command"),
        }
    }

    #[test]
    fn test_parse_announce_toggle() {
        let cli = Cli::try_parse_from(["popple", "announce", "--server", "guild", "off"]).unwrap();
        match cli.command {
            Commands::Announce { server, setting } => {
                assert_eq!(server, "guild");
                assert!(!setting.is_on());
            }
            _ => panic!("expected announce command"),
        }
    }

    #[test]
    fn test_parse_global_json_after_subcommand() {
        let cli = Cli::try_parse_from(["popple", "config", "--server", "g", "--json"]).unwrap();
        assert!(cli.json);
    }
}
