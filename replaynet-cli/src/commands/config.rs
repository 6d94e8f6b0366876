//! Config command - show configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use replaynet_store::{default_config_dir, default_store_path, save_json};
use tracing::info;

use super::{config_path, load_settings};
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show effective configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Write the effective configuration to the config file.
    Init,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Init => init_config(cli).await,
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli).await;

    match cli.format {
        OutputFormat::Text => {
            println!("replaynet Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Mode:          {}", settings.mode);
            println!("Max retries:   {}", settings.max_retries);
            println!("Retry delay:   {}ms", settings.retry_delay_ms);
            println!("Timeout:       {}s", settings.timeout_secs);
            println!("User agent:    {}", settings.user_agent);
            println!(
                "Fixture dir:   {}",
                settings.resolved_fixture_dir().display()
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let config_file = config_path(cli);
    let store_file = default_store_path();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:  {}", config_dir.display());
            println!("Config file: {}", config_file.display());
            println!("Store file:  {}", store_file.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "config_file": config_file.display().to_string(),
                "store_file": store_file.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn init_config(cli: &Cli) -> Result<()> {
    let path = config_path(cli);
    let settings = load_settings(cli).await;

    save_json(&path, &settings).await?;
    info!(path = %path.display(), "Configuration written");
    if !cli.quiet {
        println!("Wrote {}", path.display());
    }

    Ok(())
}
