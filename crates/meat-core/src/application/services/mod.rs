//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level commands: mount a project, create a project and set up the
//! local settings.

pub mod create_service;
pub mod dotenv;
pub mod init_service;
pub mod mount_service;
pub mod repository;

pub use create_service::{CreatePorts, CreateRequest, CreateService};
pub use init_service::InitService;
pub use mount_service::{
    MountContext, MountOptions, MountPorts, MountRequest, MountService, MountStage,
};
pub use repository::RepositoryManager;

use tracing::warn;

use crate::application::ApplicationError;
use crate::application::ports::{CommandOutput, Console, ShellCommand, ShellRunner};
use crate::error::MeatResult;

/// Run `command`, turning a non-zero exit into `CommandFailed`.
pub(crate) fn run_checked(
    shell: &dyn ShellRunner,
    command: &ShellCommand,
) -> MeatResult<CommandOutput> {
    let output = shell.run(command)?;
    if output.is_success() {
        Ok(output)
    } else {
        Err(ApplicationError::CommandFailed {
            command: command.line.clone(),
            status: output.status,
            stderr: output.stderr,
        }
        .into())
    }
}

/// Run `command`, reporting a non-zero exit as a warning.
///
/// Returns whether the command succeeded.
pub(crate) fn run_reported(
    shell: &dyn ShellRunner,
    console: &dyn Console,
    command: &ShellCommand,
) -> MeatResult<bool> {
    let output = shell.run(command)?;
    if output.is_success() {
        return Ok(true);
    }

    warn!(command = %command.line, status = ?output.status, "command failed");
    let status = output
        .status
        .map_or_else(|| "a signal".to_string(), |code| format!("code {code}"));
    console.warning(&format!("`{}` exited with {}", command.line, status))?;
    Ok(false)
}
