//! Per-project configuration loaded with the `config` crate.
//!
//! The document is `meat.toml` (or `.json`, `.yaml`, ...) at the project
//! root. `MEAT_PROJECT__<SECTION>__<KEY>` environment variables override it,
//! e.g. `MEAT_PROJECT__ASSETS__DRIVER=gulp`.

use std::collections::HashMap;
use std::path::Path;

use config::{Config, Environment, File};
use meat_core::{
    application::{ApplicationError, ports::ProjectConfigSource},
    domain::ProjectConfig,
    error::MeatResult,
};
use tracing::debug;

/// File stem of the project configuration document.
pub const PROJECT_CONFIG_NAME: &str = "meat";
pub const PROJECT_ENV_PREFIX: &str = "MEAT_PROJECT";

#[derive(Debug, Clone, Default)]
pub struct ConfigFileSource {
    /// Replaces the process environment; used by tests.
    env: Option<HashMap<String, String>>,
}

impl ConfigFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env(env: HashMap<String, String>) -> Self {
        Self { env: Some(env) }
    }
}

impl ProjectConfigSource for ConfigFileSource {
    fn load(&self, root: &Path) -> MeatResult<ProjectConfig> {
        let base = root.join(PROJECT_CONFIG_NAME);
        let config_error = |e: config::ConfigError| ApplicationError::ProjectConfig {
            path: base.clone(),
            reason: e.to_string(),
        };

        let config = Config::builder()
            .add_source(File::with_name(&base.to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix(PROJECT_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(self.env.clone()),
            )
            .build()
            .map_err(config_error)?;

        let project_config: ProjectConfig = config.try_deserialize().map_err(config_error)?;
        debug!(root = %root.display(), ?project_config, "project configuration loaded");
        Ok(project_config)
    }
}
