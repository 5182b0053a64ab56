//! Interactive creation of a project's `.env` from its `.env.example`.

use tracing::debug;

use crate::application::ports::{Console, Prompter};
use crate::domain::{EnvironmentVariableSet, LocalSettings};
use crate::error::MeatResult;

const BANNER: &str = "=============================";

/// Values known about the project being mounted, offered as defaults.
#[derive(Debug, Clone, Copy)]
pub struct EnvHints<'a> {
    pub project_code: &'a str,
    pub local_url: &'a str,
    pub settings: &'a LocalSettings,
}

/// Ordered, de-duplicated candidate values for `key`.
///
/// Known keys get a project-specific value first; the example value is
/// always the last candidate.
pub fn suggestions(key: &str, example: &str, hints: &EnvHints<'_>) -> Vec<String> {
    let preferred = match key {
        "DB_NAME" | "DB_DATABASE" | "DATABASE_NAME" => Some(hints.project_code.to_string()),
        "DB_USER" | "DB_USERNAME" => hints.settings.db_user.clone(),
        "DB_PASSWORD" => hints.settings.db_pass.clone(),
        "DB_HOST" => hints.settings.db_host.clone(),
        "WP_HOME" | "APP_URL" => Some(hints.local_url.to_string()),
        "WP_SITEURL" => Some("${WP_HOME}/cms".to_string()),
        _ => None,
    };

    let mut out: Vec<String> = Vec::with_capacity(2);
    for candidate in preferred.into_iter().chain(std::iter::once(example.to_string())) {
        if !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

/// Walk every entry of `example`, asking the user to confirm or replace
/// the best suggestion. Entry order is preserved.
pub fn configure(
    prompter: &dyn Prompter,
    console: &dyn Console,
    example: &EnvironmentVariableSet,
    hints: &EnvHints<'_>,
) -> MeatResult<EnvironmentVariableSet> {
    console.line("")?;
    console.line(BANNER)?;
    console.line("Creating .env interactively")?;
    console.line(BANNER)?;
    console.line("")?;

    let mut env = EnvironmentVariableSet::new();
    for (key, example_value) in example.iter() {
        let options = suggestions(key, example_value, hints);
        let top = options.first().cloned().unwrap_or_default();

        let value = if prompter.confirm(&format!("{key} ({top}) (Y/n):"), true)? {
            top
        } else {
            prompter.ask(&format!("{key} ({top}):"), Some(top.clone()), &options)?
        };
        debug!(key, "environment value chosen");
        env.insert(key, value);
    }

    Ok(env)
}
