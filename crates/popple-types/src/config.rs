//! Configuration types for Popple.
//!
//! `ServerConfig` is the persisted per-server settings row. `AppConfig`
//! represents the top-level `config.toml` that controls the operator CLI.

use serde::{Deserialize, Serialize};

/// Per-server settings.
///
/// The announce flag is stored inverted: `no_announce == true` means karma
/// changes are not announced publicly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server_id: String,
    pub no_announce: bool,
}

impl ServerConfig {
    /// The configuration a server has before anyone changes it.
    pub fn default_for(server_id: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            no_announce: false,
        }
    }

    /// Whether karma changes should be announced.
    pub fn announces(&self) -> bool {
        !self.no_announce
    }
}

/// Top-level configuration for the Popple CLI.
///
/// Loaded from `~/.popple/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite URL. When unset, `{data_dir}/popple.db` is used.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Number of rows shown by `popple leaderboard` without `--limit`.
    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: u32,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub otel: bool,
}

fn default_leaderboard_limit() -> u32 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            leaderboard_limit: default_leaderboard_limit(),
            otel: false,
        }
    }
}
