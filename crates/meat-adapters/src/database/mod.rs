//! Database administration through the `mysql` command-line client.

use meat_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, DatabaseAdmin, ShellCommand, ShellRunner},
    },
    domain::{DatabaseConfig, shell_quote},
    error::MeatResult,
};
use tracing::debug;

/// Talks to MySQL by shelling out to `mysql`.
///
/// The password travels in `MYSQL_PWD` so it never shows up in the
/// process list.
pub struct MysqlCli<S> {
    shell: S,
}

impl<S: ShellRunner> MysqlCli<S> {
    pub fn new(shell: S) -> Self {
        Self { shell }
    }

    fn command(config: &DatabaseConfig, sql: &str) -> ShellCommand {
        let mut line = String::from("mysql --batch --skip-column-names");
        if !config.host.is_empty() {
            line.push_str(&format!(" -h {}", shell_quote(&config.host)));
        }
        if !config.user.is_empty() {
            line.push_str(&format!(" -u {}", shell_quote(&config.user)));
        }
        line.push_str(&format!(" -e {}", shell_quote(sql)));

        ShellCommand::new(line).env("MYSQL_PWD", config.password.as_str())
    }

    fn query(&self, config: &DatabaseConfig, sql: &str) -> MeatResult<CommandOutput> {
        debug!(sql, host = %config.host, "mysql");
        let output = self.shell.run(&Self::command(config, sql))?;
        if output.is_success() {
            Ok(output)
        } else {
            Err(ApplicationError::Database {
                reason: output.stderr.trim().to_string(),
            }
            .into())
        }
    }
}

/// `name` as a quoted SQL string literal.
fn sql_string(name: &str) -> String {
    format!("'{}'", name.replace('\\', "\\\\").replace('\'', "''"))
}

/// `name` as a quoted SQL identifier.
fn sql_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

impl<S: ShellRunner> DatabaseAdmin for MysqlCli<S> {
    fn check_connection(&self, config: &DatabaseConfig) -> MeatResult<()> {
        self.query(config, "SELECT 1").map(|_| ())
    }

    fn database_exists(&self, config: &DatabaseConfig) -> MeatResult<bool> {
        let sql = format!(
            "SELECT SCHEMA_NAME FROM INFORMATION_SCHEMA.SCHEMATA WHERE SCHEMA_NAME = {}",
            sql_string(&config.name)
        );
        let output = self.query(config, &sql)?;
        Ok(!output.stdout.trim().is_empty())
    }

    fn create_database(&self, config: &DatabaseConfig) -> MeatResult<()> {
        let sql = format!("CREATE DATABASE {}", sql_identifier(&config.name));
        self.query(config, &sql).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::RecordingShell;

    fn config() -> DatabaseConfig {
        DatabaseConfig {
            name: "acme".into(),
            host: "127.0.0.1".into(),
            user: "root".into(),
            password: "secret".into(),
            ..Default::default()
        }
    }

    #[test]
    fn password_goes_through_environment() {
        let shell = RecordingShell::new();
        MysqlCli::new(shell.clone())
            .check_connection(&config())
            .unwrap();

        let command = &shell.commands()[0];
        assert_eq!(
            command.line,
            "mysql --batch --skip-column-names -h '127.0.0.1' -u 'root' -e 'SELECT 1'"
        );
        assert!(!command.line.contains("secret"));
        assert_eq!(command.env, vec![("MYSQL_PWD".to_string(), "secret".to_string())]);
    }

    #[test]
    fn existing_database_is_listed() {
        let shell = RecordingShell::new()
            .respond("mysql", CommandOutput::success().with_stdout("acme\n"));
        assert!(MysqlCli::new(shell).database_exists(&config()).unwrap());
    }

    #[test]
    fn missing_database_returns_no_rows() {
        let shell = RecordingShell::new();
        assert!(!MysqlCli::new(shell).database_exists(&config()).unwrap());
    }

    #[test]
    fn create_escapes_identifier() {
        let shell = RecordingShell::new();
        let mut config = config();
        config.name = "odd`name".into();

        MysqlCli::new(shell.clone()).create_database(&config).unwrap();
        assert!(shell.lines()[0].ends_with("-e 'CREATE DATABASE `odd``name`'"));
    }

    #[test]
    fn client_failure_is_a_database_error() {
        let mut failure = CommandOutput::failure(1);
        failure.stderr = "ERROR 1045 (28000): Access denied".into();
        let shell = RecordingShell::new().respond("mysql", failure);

        let err = MysqlCli::new(shell).check_connection(&config()).unwrap_err();
        assert!(err.to_string().contains("Access denied"));
    }
}
