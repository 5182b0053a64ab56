//! First-run setup of the per-user settings file.

use tracing::{info, instrument};

use crate::application::ports::{Console, Prompter, SettingsStore};
use crate::domain::LocalSettings;
use crate::error::MeatResult;

const BANNER: &str = "==========================================";

pub struct InitService {
    prompter: Box<dyn Prompter>,
    settings: Box<dyn SettingsStore>,
    console: Box<dyn Console>,
}

impl InitService {
    pub fn new(
        prompter: Box<dyn Prompter>,
        settings: Box<dyn SettingsStore>,
        console: Box<dyn Console>,
    ) -> Self {
        Self {
            prompter,
            settings,
            console,
        }
    }

    /// Ask for local database credentials and the API token, then save them.
    ///
    /// Returns `None` when the user keeps existing settings untouched.
    #[instrument(skip_all)]
    pub fn run(&self) -> MeatResult<Option<LocalSettings>> {
        self.console.line(BANNER)?;
        self.console.line("meat installation")?;
        self.console.line(BANNER)?;

        let current = if self.settings.exists() {
            let update = self.prompter.confirm(
                "meat is already installed. Do you want to update your settings?",
                true,
            )?;
            if !update {
                info!("settings left untouched");
                return Ok(None);
            }
            self.settings.load()?
        } else {
            LocalSettings::default()
        };

        self.console.line("")?;
        self.console
            .info("Please enter your local database credentials")?;

        let db_user = self.prompter.ask(
            "Database User",
            Some(
                current
                    .db_user
                    .clone()
                    .unwrap_or_else(|| LocalSettings::DEFAULT_DB_USER.into()),
            ),
            &[],
        )?;
        let db_pass = keep_if_empty(
            self.prompter.secret("Database Password")?,
            current.db_pass.clone(),
        );
        let db_host = self.prompter.ask(
            "Database Host",
            Some(
                current
                    .db_host
                    .clone()
                    .unwrap_or_else(|| LocalSettings::DEFAULT_DB_HOST.into()),
            ),
            &[],
        )?;

        self.console.line("")?;
        let api_token = match keep_if_empty(
            self.prompter.secret("API Token (leave empty to keep the current one)")?,
            current.api_token.clone(),
        ) {
            Some(token) if token.is_empty() => None,
            other => other,
        };

        let settings = LocalSettings {
            db_user: Some(db_user.trim().to_string()),
            db_pass,
            db_host: Some(db_host.trim().to_string()),
            api_token,
        };
        self.settings.save(&settings)?;

        self.console.line("")?;
        self.console.line(BANNER)?;
        self.console.success("Installation complete!")?;
        self.console.line(BANNER)?;

        Ok(Some(settings))
    }
}

/// An empty secret keeps the stored value when there is one.
fn keep_if_empty(answer: String, current: Option<String>) -> Option<String> {
    match current {
        Some(current) if answer.is_empty() => Some(current),
        _ => Some(answer),
    }
}
