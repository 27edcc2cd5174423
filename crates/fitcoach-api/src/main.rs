//! FitCoach CLI entry point.
//!
//! Binary name: `fitcoach`
//!
//! Parses CLI arguments, sets up tracing, loads configuration and the
//! country list, then dispatches to the command handler.

mod cli;
mod render;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity; RUST_LOG still wins.
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,fitcoach_core=debug,fitcoach_infra=debug",
        _ => "trace",
    };
    fitcoach_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;

    fitcoach_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "fitcoach", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Plan { answers, dry_run } => {
            cli::plan::run_plan(&state, answers.as_deref(), dry_run, cli.json, cli.quiet).await?;
        }

        Commands::Prompt { answers } => {
            cli::prompt::show_prompt(&state, answers.as_deref(), cli.json, cli.quiet).await?;
        }

        Commands::Countries => {
            cli::countries::list_countries(&state, cli.json, cli.quiet)?;
        }

        Commands::Config => {
            cli::config::show_config(&state, cli.json)?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
