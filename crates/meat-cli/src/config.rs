//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`Conventions`]
//! derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables (`MEAT_GIT__HOST`, `MEAT_API__TOKEN`, ...)
//! 2. Config file (`--config`, or the platform config dir)
//! 3. Built-in defaults (always present)

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use meat_core::domain::Conventions;

const ENV_PREFIX: &str = "MEAT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub git: GitConfig,
    pub local: LocalConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Takes precedence over the token stored by `meat init`.
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.digitalmeat.cat/v1".into(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub host: String,
    pub organization: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        let conventions = Conventions::default();
        Self {
            host: conventions.git_host,
            organization: conventions.git_organization,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub domain_suffix: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            domain_suffix: Conventions::default().domain_suffix,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from the file and the process environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_with_env(config_file, None)
    }

    /// Same as [`load`](Self::load) with `env` standing in for the process
    /// environment when given.
    pub fn load_with_env(
        config_file: Option<&PathBuf>,
        env: Option<HashMap<String, String>>,
    ) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        Config::builder()
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()
            .with_context(|| format!("reading {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.meat.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("cat", "digitalmeat", "meat")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".meat.toml"))
    }

    pub fn conventions(&self) -> Conventions {
        Conventions {
            git_host: self.git.host.clone(),
            git_organization: self.git.organization.clone(),
            domain_suffix: self.local.domain_suffix.clone(),
        }
    }

    /// Look up a dotted key, for `meat config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "api.base_url" => self.api.base_url.clone(),
            "api.token" => self.api.token.as_deref().map(mask).unwrap_or_default(),
            "git.host" => self.git.host.clone(),
            "git.organization" => self.git.organization.clone(),
            "local.domain_suffix" => self.local.domain_suffix.clone(),
            "output.no_color" => self.output.no_color.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Copy safe to print: the token is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.api.token = copy.api.token.as_deref().map(mask);
        copy
    }
}

fn mask(token: &str) -> String {
    let tail: String = token
        .chars()
        .skip(token.chars().count().saturating_sub(4))
        .collect();
    format!("****{tail}")
}
