//! `~/.meat`: `KEY=VALUE` lines read with dotenvy.

use std::io::Write;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use meat_core::{
    application::{ApplicationError, ports::SettingsStore},
    domain::LocalSettings,
    error::{MeatError, MeatResult},
};
use tracing::{debug, info};

pub const SETTINGS_FILE_NAME: &str = ".meat";

#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.meat`, or `None` when no home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.home_dir().join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn settings_error(path: &Path, reason: impl std::fmt::Display) -> MeatError {
    ApplicationError::Settings {
        reason: format!("{}: {}", path.display(), reason),
    }
    .into()
}

/// Single quotes keep values literal; values containing one fall back to
/// double quotes with `\`, `"` and `$` escaped.
fn quote(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$");
    format!("\"{escaped}\"")
}

impl SettingsStore for FileSettingsStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn load(&self) -> MeatResult<LocalSettings> {
        let mut settings = LocalSettings::default();
        if !self.exists() {
            debug!(path = %self.path.display(), "no settings file");
            return Ok(settings);
        }

        let entries =
            dotenvy::from_path_iter(&self.path).map_err(|e| settings_error(&self.path, e))?;
        for entry in entries {
            let (key, value) = entry.map_err(|e| settings_error(&self.path, e))?;
            settings.set(&key, value);
        }
        Ok(settings)
    }

    fn save(&self, settings: &LocalSettings) -> MeatResult<()> {
        let content: String = settings
            .to_pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={}\n", quote(value)))
            .collect();

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&self.path)
            .map_err(|e| settings_error(&self.path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| settings_error(&self.path, e))?;

        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
