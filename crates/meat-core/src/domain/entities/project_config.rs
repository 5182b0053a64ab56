//! Typed per-project configuration.
//!
//! Loaded from the project's `meat.*` document by a
//! [`ProjectConfigSource`](crate::application::ports::ProjectConfigSource).
//! Every key is optional; an absent key disables its stage.

use serde::{Deserialize, Serialize};

use crate::domain::{BuildMode, Toggle};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub scripts: ScriptsConfig,
    pub dotenv: Toggle,
    pub composer: bool,
    pub npm: bool,
    pub assets: AssetsConfig,
    pub envoy: Toggle,
    pub migrate: Toggle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptsConfig {
    #[serde(rename = "pre-install", alias = "pre_install")]
    pub pre_install: Option<String>,
    #[serde(rename = "post-install", alias = "post_install")]
    pub post_install: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub driver: Option<String>,
}

impl AssetsConfig {
    /// Driver used when none is configured.
    pub const DEFAULT_DRIVER: &'static str = "mix";

    /// Build command for the configured driver (or the default one).
    pub fn build_script(&self, mode: BuildMode) -> String {
        let driver = self
            .driver
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(Self::DEFAULT_DRIVER);

        match (driver, mode) {
            ("mix", mode) => format!("npm run {mode}"),
            ("gulp", BuildMode::Dev) => "gulp".into(),
            ("gulp", BuildMode::Production) => "gulp --production".into(),
            ("webpack", BuildMode::Dev) => "npx webpack --mode development".into(),
            ("webpack", BuildMode::Production) => "npx webpack --mode production".into(),
            (other, mode) => format!("npm run {other}:{mode}"),
        }
    }
}

impl ScriptsConfig {
    pub fn pre_install(&self) -> Option<&str> {
        non_blank(&self.pre_install)
    }

    pub fn post_install(&self) -> Option<&str> {
        non_blank(&self.post_install)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
