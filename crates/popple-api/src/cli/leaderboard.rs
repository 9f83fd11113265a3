//! Leaderboard command.

use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table, presets};
use console::style;

use popple_types::entity::LeaderboardEntry;

use crate::state::AppState;

/// Show the top (or bottom) entities of a server.
///
/// `limit` falls back to `leaderboard_limit` from config.toml.
pub async fn show_leaderboard(
    state: &AppState,
    server: &str,
    bottom: bool,
    limit: Option<u32>,
    json: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(state.config.leaderboard_limit);

    let entries = state
        .karma_service
        .get_leaderboard(server, !bottom, limit)
        .await
        .with_context(|| format!("failed to load leaderboard for server '{server}'"))?;

    if json {
        let result = serde_json::json!({
            "server": server,
            "order": if bottom { "bottom" } else { "top" },
            "entries": entries,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!();
        println!("  No karma recorded on '{}' yet.", style(server).cyan());
        println!();
        return Ok(());
    }

    println!();
    println!("{}", render_table(&entries));
    println!();

    Ok(())
}

/// Render entries as a ranked table, keeping the service's order.
fn render_table(entries: &[LeaderboardEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Karma").fg(Color::White),
    ]);

    for (rank, entry) in entries.iter().enumerate() {
        let karma_color = match entry.karma {
            k if k > 0 => Color::Green,
            k if k < 0 => Color::Red,
            _ => Color::DarkGrey,
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&entry.name),
            Cell::new(entry.karma)
                .fg(karma_color)
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table
}
