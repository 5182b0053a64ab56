//! Runs command lines through the platform shell.

use std::process::{Command, Stdio};

use meat_core::application::{
    ShellError,
    ports::{CommandOutput, ShellCommand, ShellRunner},
};
use tracing::debug;

/// Production runner: `sh -c` on unix, `cmd /C` on Windows.
///
/// Streamed commands inherit the terminal so interactive tools (git
/// credential prompts, composer) keep working.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalShell;

impl LocalShell {
    pub fn new() -> Self {
        Self
    }

    fn command(line: &str) -> Command {
        if cfg!(windows) {
            let mut command = Command::new("cmd");
            command.arg("/C").arg(line);
            command
        } else {
            let mut command = Command::new("sh");
            command.arg("-c").arg(line);
            command
        }
    }
}

impl ShellRunner for LocalShell {
    fn run(&self, shell_command: &ShellCommand) -> Result<CommandOutput, ShellError> {
        debug!(
            command = %shell_command.line,
            cwd = ?shell_command.cwd,
            stream = shell_command.stream,
            "Running command"
        );

        let mut command = Self::command(&shell_command.line);
        if let Some(dir) = &shell_command.cwd {
            command.current_dir(dir);
        }
        command.envs(shell_command.env.iter().map(|(k, v)| (k, v)));

        let spawn_error = |e: std::io::Error| ShellError::Spawn {
            command: shell_command.line.clone(),
            reason: e.to_string(),
        };

        if shell_command.stream {
            let status = command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(spawn_error)?;
            return Ok(CommandOutput {
                status: status.code(),
                ..Default::default()
            });
        }

        let output = command
            .stdin(Stdio::null())
            .output()
            .map_err(spawn_error)?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !stdout.is_empty() {
            debug!("Command output: {}", stdout.trim());
        }

        Ok(CommandOutput {
            status: output.status.code(),
            stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
