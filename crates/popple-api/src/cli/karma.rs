//! Karma CLI subcommands: apply bumps and look up levels.

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use console::style;

use popple_types::entity::Levels;

use crate::state::AppState;

/// Karma subcommands.
#[derive(Subcommand)]
pub enum KarmaCommand {
    /// Apply karma changes, e.g. `popple karma add --server 42 rust=+2 bugs=-1`.
    Add {
        /// Server ID.
        #[arg(long)]
        server: String,

        /// `name=delta` pairs; repeated names are summed.
        #[arg(required = true, value_parser = parse_bump)]
        bumps: Vec<(String, i64)>,
    },

    /// Show the karma of one or more names.
    Show {
        /// Server ID.
        #[arg(long)]
        server: String,

        /// Names to look up.
        #[arg(required = true)]
        names: Vec<String>,
    },
}

/// Handle a karma subcommand.
pub async fn handle_karma_command(cmd: KarmaCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        KarmaCommand::Add { server, bumps } => add_karma(state, &server, bumps, json).await,
        KarmaCommand::Show { server, names } => show_karma(state, &server, names, json).await,
    }
}

/// Parse a single `name=delta` argument. The delta may carry a leading `+`.
pub fn parse_bump(arg: &str) -> Result<(String, i64), String> {
    let (name, delta) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("expected name=delta, got '{arg}'"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{arg}'"));
    }

    let delta: i64 = delta
        .trim()
        .parse()
        .map_err(|e| format!("invalid delta in '{arg}': {e}"))?;

    Ok((name.to_string(), delta))
}

/// Fold parsed bumps into a levels map, summing repeated names.
pub fn collect_bumps(bumps: Vec<(String, i64)>) -> Result<Levels> {
    let mut levels = Levels::with_capacity(bumps.len());
    for (name, delta) in bumps {
        let entry = levels.entry(name).or_insert(0);
        *entry = match entry.checked_add(delta) {
            Some(total) => total,
            None => bail!("karma delta overflows a 64-bit integer"),
        };
    }
    Ok(levels)
}

/// Levels sorted by name for stable display.
fn sorted(levels: &Levels) -> Vec<(&String, &i64)> {
    let mut rows: Vec<_> = levels.iter().collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));
    rows
}

async fn add_karma(
    state: &AppState,
    server: &str,
    bumps: Vec<(String, i64)>,
    json: bool,
) -> Result<()> {
    let levels = collect_bumps(bumps)?;

    let updated = state
        .karma_service
        .add_karma_to_entities(server, levels)
        .await
        .with_context(|| format!("failed to update karma on server '{server}'"))?;

    if json {
        let result = serde_json::json!({
            "server": server,
            "levels": updated,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    if updated.is_empty() {
        println!("  {} Nothing to change (all deltas were zero)", style("-").dim());
    }
    for (name, karma) in sorted(&updated) {
        println!(
            "  {} {} now has {} karma",
            style("ok").green(),
            style(name).cyan(),
            style(karma).bold(),
        );
    }
    println!();

    Ok(())
}

async fn show_karma(state: &AppState, server: &str, names: Vec<String>, json: bool) -> Result<()> {
    let levels = state
        .karma_service
        .get_levels(server, names)
        .await
        .with_context(|| format!("failed to look up karma on server '{server}'"))?;

    if json {
        let result = serde_json::json!({
            "server": server,
            "levels": levels,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    for (name, karma) in sorted(&levels) {
        println!("  {} = {}", style(name).cyan().bold(), karma);
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bump_signed_deltas() {
        assert_eq!(parse_bump("rust=+2").unwrap(), ("rust".to_string(), 2));
        assert_eq!(parse_bump("bugs=-1").unwrap(), ("bugs".to_string(), -1));
        assert_eq!(parse_bump("zero=0").unwrap(), ("zero".to_string(), 0));
    }

    #[test]
    fn test_parse_bump_splits_on_last_equals() {
        assert_eq!(parse_bump("a=b=3").unwrap(), ("a=b".to_string(), 3));
    }

    #[test]
    fn test_parse_bump_rejects_malformed() {
        assert!(parse_bump("rust").is_err());
        assert!(parse_bump("=3").is_err());
        assert!(parse_bump("rust=lots").is_err());
    }

    #[test]
    fn test_collect_bumps_sums_repeats() {
        let levels = collect_bumps(vec![
            ("a".to_string(), 2),
            ("b".to_string(), 1),
            ("a".to_string(), -5),
        ])
        .unwrap();
        assert_eq!(levels.get("a"), Some(&-3));
        assert_eq!(levels.get("b"), Some(&1));
    }

    #[test]
    fn test_collect_bumps_rejects_overflow() {
        let result = collect_bumps(vec![("a".to_string(), i64::MAX), ("a".to_string(), 1)]);
        assert!(result.is_err());
    }
}
