//! Popple CLI entry point.
//!
//! Binary name: `popple`
//!
//! Parses CLI arguments, loads configuration, opens the database, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config, tracing, or the database
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "popple", &mut std::io::stdout());
        return Ok(());
    }

    let (data_dir, config) = AppState::load_config().await;

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,popple=debug",
        _ => "trace",
    };
    popple_observe::tracing_setup::init_tracing(filter, cli.otel || config.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli, data_dir, config).await;

    popple_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(
    cli: Cli,
    data_dir: std::path::PathBuf,
    config: popple_types::config::AppConfig,
) -> anyhow::Result<()> {
    let state = AppState::init(data_dir, config, cli.database_url.as_deref()).await?;

    match cli.command {
        Commands::Karma { action } => {
            cli::karma::handle_karma_command(action, &state, cli.json).await?;
        }

        Commands::Leaderboard {
            server,
            bottom,
            limit,
        } => {
            cli::leaderboard::show_leaderboard(&state, &server, bottom, limit, cli.json).await?;
        }

        Commands::Announce { server, setting } => {
            cli::announce::set_announce(&state, &server, setting.is_on(), cli.json).await?;
        }

        Commands::Config { server } => {
            cli::announce::show_config(&state, &server, cli.json).await?;
        }

        Commands::Status => {
            cli::status::status(&state, cli.json)?;
        }

        Commands::Completions { .. } => unreachable!("handled before state init"),
    }

    Ok(())
}
