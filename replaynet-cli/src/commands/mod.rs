//! CLI command implementations.

pub mod config;
pub mod fetch;
pub mod fixtures;
pub mod token;

use std::path::PathBuf;

use anyhow::{Context, Result};
use replaynet_http::PipelineSettings;
use replaynet_store::{default_config_path, load_json_or_default, JsonFileStore};
use tracing::debug;

use crate::Cli;

/// Config file path: `--config` or the default location.
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(default_config_path)
}

/// Loads pipeline settings, applying the `--fixtures-dir` override.
pub async fn load_settings(cli: &Cli) -> PipelineSettings {
    let path = config_path(cli);
    let mut settings: PipelineSettings = load_json_or_default(&path).await;
    debug!(path = %path.display(), "Loaded settings");

    if let Some(dir) = &cli.fixtures_dir {
        settings.fixture_dir = Some(dir.clone());
    }
    settings
}

/// Opens the default key-value store.
pub async fn open_store() -> Result<JsonFileStore> {
    JsonFileStore::open_default()
        .await
        .context("Failed to open key-value store")
}
