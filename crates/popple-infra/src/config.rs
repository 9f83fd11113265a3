//! Application configuration loader for Popple.
//!
//! Reads `config.toml` from the data directory (`~/.popple/` in production)
//! and deserializes it into [`AppConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::Path;

use popple_types::config::AppConfig;

use crate::filesystem::default_database_url;

/// Load application configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Resolve the database URL.
///
/// Priority:
/// 1. Explicit override (`--database-url` / `POPPLE_DATABASE_URL`)
/// 2. `database_url` from `config.toml`
/// 3. `{data_dir}/popple.db`
pub fn resolve_database_url(
    config: &AppConfig,
    data_dir: &Path,
    override_url: Option<&str>,
) -> String {
    override_url
        .map(str::to_string)
        .or_else(|| config.database_url.clone())
        .unwrap_or_else(|| default_database_url(data_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_app_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.leaderboard_limit, 10);
        assert!(config.database_url.is_none());
    }

    #[tokio::test]
    async fn load_app_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            "leaderboard_limit = 3\notel = true\n",
        )
        .await
        .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.leaderboard_limit, 3);
        assert!(config.otel);
    }

    #[tokio::test]
    async fn load_app_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.leaderboard_limit, 10);
    }

    #[test]
    fn resolve_database_url_prefers_override() {
        let config = AppConfig {
            database_url: Some("sqlite://from-config.db".to_string()),
            ..Default::default()
        };
        let dir = Path::new("/tmp/popple");

        assert_eq!(
            resolve_database_url(&config, dir, Some("sqlite://override.db")),
            "sqlite://override.db"
        );
        assert_eq!(
            resolve_database_url(&config, dir, None),
            "sqlite://from-config.db"
        );
        assert_eq!(
            resolve_database_url(&AppConfig::default(), dir, None),
            "sqlite:///tmp/popple/popple.db?mode=rwc"
        );
    }
}
