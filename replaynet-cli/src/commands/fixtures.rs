//! Fixtures command - inspect and clear recorded fixtures.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use replaynet_http::FixtureDir;
use tracing::info;

use super::load_settings;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the fixtures command.
#[derive(Args)]
pub struct FixturesArgs {
    #[command(subcommand)]
    pub action: FixturesAction,
}

/// Fixtures subcommands.
#[derive(Subcommand)]
pub enum FixturesAction {
    /// List recorded fixtures.
    List,

    /// Delete all recorded fixtures.
    Clear,

    /// Show the fixture directory.
    Path,
}

/// Runs the fixtures command.
pub async fn run(args: &FixturesArgs, cli: &Cli) -> Result<()> {
    let settings = load_settings(cli).await;
    let fixtures = FixtureDir::new(settings.resolved_fixture_dir());

    match &args.action {
        FixturesAction::List => list(&fixtures, cli).await,
        FixturesAction::Clear => clear(&fixtures, cli).await,
        FixturesAction::Path => {
            match cli.format {
                OutputFormat::Text => println!("{}", fixtures.root().display()),
                OutputFormat::Json => {
                    let path = serde_json::json!({
                        "fixture_dir": fixtures.root().display().to_string(),
                    });
                    println!("{}", JsonFormatter::new(cli.pretty).format(&path)?);
                }
            }
            Ok(())
        }
    }
}

async fn list(fixtures: &FixtureDir, cli: &Cli) -> Result<()> {
    let entries = fixtures
        .list()
        .await
        .with_context(|| format!("Failed to list {}", fixtures.root().display()))?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_fixtures(fixtures.root(), &entries));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_fixtures(&entries)?);
        }
    }
    Ok(())
}

async fn clear(fixtures: &FixtureDir, cli: &Cli) -> Result<()> {
    let removed = fixtures
        .clear()
        .await
        .with_context(|| format!("Failed to clear {}", fixtures.root().display()))?;

    info!(removed, dir = %fixtures.root().display(), "Fixtures cleared");
    if !cli.quiet {
        println!("Removed {removed} fixture(s)");
    }
    Ok(())
}
