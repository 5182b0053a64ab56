//! Application layer errors.
//!
//! These errors represent failures in orchestration or in the outside world
//! reached through ports. Pure logic errors are `DomainError`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while orchestrating a command.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The mount target exists but is not a clone.
    #[error("Folder {path} already exists and could not find a project in it")]
    FolderNotARepository { path: PathBuf },

    /// `origin` does not point at an organisation repository.
    #[error("Could not derive a project code from remote '{url}'")]
    UnrecognizedRemote { url: String },

    /// An external command exited unsuccessfully where success is required.
    #[error("Command `{command}` failed{}", exit_suffix(.status))]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Reading an answer from the terminal failed.
    #[error("Prompt failed: {reason}")]
    Prompt { reason: String },

    /// Writing to the terminal failed.
    #[error("Output failed: {reason}")]
    Output { reason: String },

    /// Reading or writing the per-user settings file failed.
    #[error("Settings error: {reason}")]
    Settings { reason: String },

    /// The project configuration document could not be loaded.
    #[error("Invalid project configuration in {path}: {reason}")]
    ProjectConfig { path: PathBuf, reason: String },

    /// Invalid input that is not covered by a domain rule.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The database client reported a failure.
    #[error("Database error: {reason}")]
    Database { reason: String },
}

fn exit_suffix(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!(" with exit code {code}"),
        None => " (terminated by signal)".into(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FolderNotARepository { path } => vec![
                format!("'{}' exists but has no .git directory", path.display()),
                "Pass a different folder: meat mount <project-code> <folder>".into(),
                "Or remove the folder and mount again".into(),
            ],
            Self::UnrecognizedRemote { url } => vec![
                format!("origin points at {url}"),
                "Pass the project code explicitly: meat mount <project-code>".into(),
            ],
            Self::CommandFailed { command, stderr, .. } => {
                let mut out = vec![
                    format!("Command: {command}"),
                    "Ensure the command is installed and in your PATH".into(),
                ];
                if !stderr.trim().is_empty() {
                    out.push(format!("stderr: {}", stderr.trim()));
                }
                out
            }
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::Settings { .. } => vec![
                "Run 'meat init' to recreate your settings file".into(),
            ],
            Self::ProjectConfig { path, .. } => vec![
                format!("Check {}", path.display()),
                "Toggles accept true, false or \"auto\"".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FolderNotARepository { .. }
            | Self::UnrecognizedRemote { .. }
            | Self::InvalidInput(_) => ErrorCategory::Validation,
            Self::ProjectConfig { .. } | Self::Settings { .. } => ErrorCategory::Configuration,
            Self::CommandFailed { .. }
            | Self::FilesystemError { .. }
            | Self::Prompt { .. }
            | Self::Output { .. }
            | Self::Database { .. } => ErrorCategory::Internal,
        }
    }
}

/// Failures of the remote project-management API.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// The server refused the request; `message` is its `msg` field.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response.
    #[error("Could not reach the project API: {reason}")]
    Transport { reason: String },

    /// The response body was not what we expected.
    #[error("Unexpected response from the project API: {reason}")]
    Decode { reason: String },

    /// No credentials were configured.
    #[error("No API token configured")]
    MissingToken,
}

impl ApiError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Rejected { status: 401 | 403, .. } | Self::MissingToken => vec![
                "Run 'meat init' to store your API token".into(),
                "Or export MEAT_API__TOKEN".into(),
            ],
            Self::Transport { .. } => vec![
                "Check your network connection".into(),
                "Check api.base_url in your configuration".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }
}

/// Failures to start an external process.
///
/// A process that starts and exits non-zero is *not* a `ShellError`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShellError {
    #[error("Failed to spawn `{command}`: {reason}")]
    Spawn { command: String, reason: String },
}
