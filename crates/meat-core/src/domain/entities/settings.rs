use serde::{Deserialize, Serialize};

/// Per-user defaults written by `meat init`.
///
/// Every field is optional: a missing settings file is just an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSettings {
    pub db_user: Option<String>,
    pub db_host: Option<String>,
    pub db_pass: Option<String>,
    pub api_token: Option<String>,
}

impl LocalSettings {
    pub const DEFAULT_DB_USER: &'static str = "root";
    pub const DEFAULT_DB_HOST: &'static str = "localhost";

    /// Key/value pairs in file order, skipping unset fields.
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("db_user", self.db_user.as_deref()),
            ("db_pass", self.db_pass.as_deref()),
            ("db_host", self.db_host.as_deref()),
            ("api_token", self.api_token.as_deref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
    }

    /// Apply a single persisted key. Unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = Some(value.into());
        match key {
            "db_user" => self.db_user = value,
            "db_pass" => self.db_pass = value,
            "db_host" => self.db_host = value,
            "api_token" => self.api_token = value,
            _ => {}
        }
    }
}
