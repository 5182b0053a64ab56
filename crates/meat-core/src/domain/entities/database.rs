use crate::domain::EnvironmentVariableSet;

/// Database engine assumed when the environment does not name one.
pub const DEFAULT_DATABASE_TYPE: &str = "mysql";

/// Connection details derived from an environment file.
///
/// Recomputed on every run; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub kind: String,
    pub name: String,
    pub host: String,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            kind: DEFAULT_DATABASE_TYPE.into(),
            name: String::new(),
            host: String::new(),
            user: String::new(),
            password: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Derive the configuration from variable names.
    ///
    /// Only keys mentioning `DB` or `DATABASE` are considered. The first
    /// matching fragment wins, checked as `PASS`, `USER`, `HOST`, `TYPE`,
    /// then `NAME`, so `DB_USERNAME` maps to the user and not the name.
    /// Laravel's `DB_DATABASE` is the database name.
    pub fn from_env(env: &EnvironmentVariableSet) -> Self {
        let mut config = Self::default();

        for (key, value) in env.iter() {
            let key = key.to_ascii_uppercase();
            if !key.contains("DB") && !key.contains("DATABASE") {
                continue;
            }

            let slot = if key.contains("PASS") {
                &mut config.password
            } else if key.contains("USER") {
                &mut config.user
            } else if key.contains("HOST") {
                &mut config.host
            } else if key.contains("TYPE") {
                &mut config.kind
            } else if key.contains("NAME") || key == "DB_DATABASE" {
                &mut config.name
            } else {
                continue;
            };
            *slot = value.to_string();
        }

        config
    }

    pub fn is_mysql(&self) -> bool {
        self.kind.eq_ignore_ascii_case("mysql")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvironmentVariableSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn derives_connection_from_db_keys() {
        let config = DatabaseConfig::from_env(&env(&[
            ("DB_HOST", "127.0.0.1"),
            ("DB_USER", "root"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "acme"),
            ("DB_CONNECTION", "pgsql"),
        ]));

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.user, "root");
        assert_eq!(config.password, "secret");
        assert_eq!(config.name, "acme");
        // DB_CONNECTION matches no fragment.
        assert_eq!(config.kind, "mysql");
    }

    #[test]
    fn ignores_keys_without_db_prefix() {
        let config = DatabaseConfig::from_env(&env(&[("APP_NAME", "acme"), ("MAIL_HOST", "smtp")]));
        assert_eq!(config, DatabaseConfig::default());
    }

    #[test]
    fn username_is_not_mistaken_for_name() {
        let config = DatabaseConfig::from_env(&env(&[
            ("DB_DATABASE", "acme"),
            ("DB_USERNAME", "homestead"),
        ]));
        assert_eq!(config.name, "acme");
        assert_eq!(config.user, "homestead");
    }

    #[test]
    fn explicit_type_overrides_default() {
        let config = DatabaseConfig::from_env(&env(&[("DATABASE_TYPE", "sqlite")]));
        assert_eq!(config.kind, "sqlite");
        assert!(!config.is_mysql());
    }
}
