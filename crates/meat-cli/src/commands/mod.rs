//! Command handlers: wire adapters into the core services.

pub mod completions;
pub mod config;
pub mod create;
pub mod init;
pub mod mount;

use meat_adapters::{DialoguerPrompter, FileSettingsStore, HttpProjectApi};
use meat_core::domain::LocalSettings;

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Store for `~/.meat`.
fn settings_store() -> CliResult<FileSettingsStore> {
    FileSettingsStore::default_path()
        .map(FileSettingsStore::new)
        .ok_or_else(|| CliError::ConfigError {
            message: "could not determine the home directory for the settings file".into(),
            source: None,
        })
}

/// API client authenticated with the configured token, or the one saved by
/// `meat init`.
fn project_api(config: &AppConfig, settings: &LocalSettings) -> CliResult<HttpProjectApi> {
    let token = config
        .api
        .token
        .clone()
        .or_else(|| settings.api_token.clone());
    Ok(HttpProjectApi::new(config.api.base_url.clone(), token)?)
}

fn prompter(output: &OutputManager) -> DialoguerPrompter {
    DialoguerPrompter::new(output.supports_color())
}
