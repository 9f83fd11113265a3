//! Per-server announce setting and config display.

use anyhow::{Context, Result};
use console::style;

use popple_types::config::ServerConfig;
use popple_types::error::KarmaError;

use crate::state::AppState;

/// Turn karma announcements on or off.
pub async fn set_announce(state: &AppState, server: &str, on: bool, json: bool) -> Result<()> {
    state
        .karma_service
        .set_announce(server, on)
        .await
        .with_context(|| format!("failed to update announce setting for '{server}'"))?;

    if json {
        let result = serde_json::json!({
            "server": server,
            "announce": on,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let word = if on {
            style("on").green()
        } else {
            style("off").yellow()
        };
        println!();
        println!(
            "  {} Announcements for '{}' are now {}",
            style("ok").green(),
            style(server).cyan(),
            word,
        );
        println!();
    }

    Ok(())
}

/// Show a server's configuration.
pub async fn show_config(state: &AppState, server: &str, json: bool) -> Result<()> {
    let (config, stored) = config_or_default(server, state.karma_service.get_config(server).await)
        .with_context(|| format!("failed to load config for '{server}'"))?;

    if json {
        let result = serde_json::json!({
            "server": config.server_id,
            "no_announce": config.no_announce,
            "stored": stored,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!("  Server:    {}", style(&config.server_id).cyan());
        println!(
            "  Announce:  {}{}",
            if config.announces() {
                style("on").green()
            } else {
                style("off").yellow()
            },
            if stored { "" } else { " (default)" },
        );
        println!();
    }

    Ok(())
}

/// A server without a stored config gets the default one.
///
/// Returns the config and whether it came from storage.
fn config_or_default(
    server: &str,
    result: Result<ServerConfig, KarmaError>,
) -> Result<(ServerConfig, bool), KarmaError> {
    match result {
        Ok(config) => Ok((config, true)),
        Err(e) if e.is_not_found() => Ok((ServerConfig::default_for(server), false)),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popple_types::error::RepositoryError;

    #[test]
    fn test_missing_config_defaults_to_announce() {
        let (config, stored) =
            config_or_default("guild", Err(RepositoryError::NotFound.into())).unwrap();
        assert!(config.announces());
        assert!(!stored);
    }

    #[test]
    fn test_stored_config_passes_through() {
        let stored_config = ServerConfig {
            server_id: "guild".to_string(),
            no_announce: true,
        };
        let (config, stored) = config_or_default("guild", Ok(stored_config.clone())).unwrap();
        assert_eq!(config, stored_config);
        assert!(stored);
    }

    #[test]
    fn test_other_errors_are_kept() {
        let err = config_or_default("guild", Err(RepositoryError::Connection.into())).unwrap_err();
        assert!(matches!(err, KarmaError::Storage(RepositoryError::Connection)));
    }
}
