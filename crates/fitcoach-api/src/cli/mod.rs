//! CLI command definitions for the `fitcoach` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod config;
pub mod countries;
pub mod form;
pub mod plan;
pub mod prompt;
pub mod review;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Personalized diet and exercise plans from a short questionnaire.
#[derive(Parser)]
#[command(name = "fitcoach", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors and results.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    ///
    /// Spans are printed to stdout, so this cannot be combined with `--json`.
    #[arg(long, global = true, conflicts_with = "json")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer the questionnaire and get a diet and exercise plan.
    Plan {
        /// Read answers from a TOML file instead of asking.
        #[arg(long, value_name = "FILE")]
        answers: Option<PathBuf>,

        /// Print the prompt instead of sending it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the prompt that would be sent for a set of answers.
    Prompt {
        /// Answers file (TOML). Defaults are used when omitted.
        #[arg(long, value_name = "FILE")]
        answers: Option<PathBuf>,
    },

    /// List the countries offered by the questionnaire.
    Countries,

    /// Show the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
