// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! replaynet CLI - run HTTP requests through the interceptor pipeline, and
//! record or replay them as fixtures.
//!
//! # Examples
//!
//! ```bash
//! # Fetch over the network
//! replaynet fetch https://api.example.com/api/categories
//!
//! # Record the response as a fixture
//! replaynet fetch https://api.example.com/api/categories --record
//!
//! # Replay it offline
//! replaynet fetch https://api.example.com/api/categories --replay
//!
//! # Replay a recorded 404
//! replaynet fetch https://api.example.com/api/items/9 --replay --status 404
//!
//! # Send the stored token as a bearer header
//! replaynet token set abc123
//! replaynet fetch https://api.example.com/me --auth
//!
//! # Inspect fixtures
//! replaynet fixtures list
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{config, fetch, fixtures, token};

// ============================================================================
// CLI Definition
// ============================================================================

/// replaynet CLI - HTTP pipeline with record and replay.
#[derive(Parser)]
#[command(name = "replaynet")]
#[command(about = "HTTP request pipeline with fixture record and replay")]
#[command(long_about = r"
replaynet runs HTTP requests through an interceptor pipeline with retry,
error classification, bearer token injection, and fixture-based record and
replay.

Examples:
  replaynet fetch <url>                 # Network request
  replaynet fetch <url> --record        # Network request, saved as fixture
  replaynet fetch <url> --replay        # Answer from fixture only
  replaynet fixtures list               # Recorded fixtures
  replaynet token set <token>           # Store bearer token
")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output and response bodies.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Config file (defaults to the user config directory).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fixture directory override.
    #[arg(long, global = true, value_name = "PATH")]
    pub fixtures_dir: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run a request through the pipeline.
    #[command(visible_alias = "f")]
    Fetch(fetch::FetchArgs),

    /// Manage recorded fixtures.
    Fixtures(fixtures::FixturesArgs),

    /// Manage the stored authentication token.
    Token(token::TokenArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// The request ended in a service error.
    RequestFailed = 2,
    /// The request was cancelled.
    Cancelled = 3,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("replaynet=debug,info")
    } else {
        EnvFilter::new("replaynet=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Fetch(args) => fetch::run(args, &cli).await,
        Commands::Fixtures(args) => fixtures::run(args, &cli).await.map(|()| ExitCode::Success),
        Commands::Token(args) => token::run(args, &cli).await.map(|()| ExitCode::Success),
        Commands::Config(args) => config::run(args, &cli).await.map(|()| ExitCode::Success),
    };

    match result {
        Ok(ExitCode::Success) => Ok(()),
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(ExitCode::Error as i32);
        }
    }
}
