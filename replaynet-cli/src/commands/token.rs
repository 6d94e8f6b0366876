//! Token command - manage the stored authentication token.

use anyhow::Result;
use clap::{Args, Subcommand};
use replaynet_core::{KeyValueStore, KeyValueStoreExt};
use replaynet_http::TOKEN_KEY;
use tracing::info;

use super::open_store;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the token command.
#[derive(Args)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub action: TokenAction,
}

/// Token subcommands.
#[derive(Subcommand)]
pub enum TokenAction {
    /// Store a token.
    Set {
        /// Token value.
        value: String,
    },

    /// Remove the stored token.
    Clear,

    /// Show the stored token (masked unless --reveal).
    Show {
        /// Print the full token.
        #[arg(long)]
        reveal: bool,
    },
}

/// Runs the token command.
pub async fn run(args: &TokenArgs, cli: &Cli) -> Result<()> {
    let store = open_store().await?;

    match &args.action {
        TokenAction::Set { value } => {
            store.set_as(TOKEN_KEY, value).await?;
            info!("Token stored");
            if !cli.quiet {
                println!("Token stored");
            }
        }
        TokenAction::Clear => {
            store.set(TOKEN_KEY, None).await?;
            info!("Token cleared");
            if !cli.quiet {
                println!("Token cleared");
            }
        }
        TokenAction::Show { reveal } => {
            let token: Option<String> = store.get_as(TOKEN_KEY);
            let shown = token.map(|t| if *reveal { t } else { mask(&t) });

            match cli.format {
                OutputFormat::Text => {
                    println!("{}", shown.as_deref().unwrap_or("(no token)"));
                }
                OutputFormat::Json => {
                    let output = serde_json::json!({ "token": shown });
                    println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
                }
            }
        }
    }

    Ok(())
}

/// Keeps the first four characters.
fn mask(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 4 {
        "*".repeat(token.chars().count())
    } else {
        format!("{visible}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask("abcdefgh"), "abcd…");
        assert_eq!(mask("abc"), "***");
        assert_eq!(mask(""), "");
    }
}
