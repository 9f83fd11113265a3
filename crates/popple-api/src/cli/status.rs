//! Status command: where Popple keeps its data and which defaults apply.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Display data directory, database URL, and configured defaults.
pub fn status(state: &AppState, json: bool) -> Result<()> {
    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "database_url": state.database_url,
            "leaderboard_limit": state.config.leaderboard_limit,
            "otel": state.config.otel,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!("  {} v{}", style("popple").bold(), env!("CARGO_PKG_VERSION"));
    println!();
    println!("  Data dir:           {}", state.data_dir.display());
    println!("  Database:           {}", state.database_url);
    println!("  Leaderboard limit:  {}", state.config.leaderboard_limit);
    println!(
        "  OpenTelemetry:      {}",
        if state.config.otel { "enabled" } else { "disabled" }
    );
    println!();

    Ok(())
}
