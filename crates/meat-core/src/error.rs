//! Unified error handling for meat core.
//!
//! This module provides a unified error type that wraps domain, application,
//! API and shell errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::{ApiError, ApplicationError, ShellError};
use crate::domain::DomainError;

/// Root error type for meat core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeatError {
    /// Errors from the domain layer (invalid data).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Errors returned by the remote project API.
    #[error("Remote API error: {0}")]
    Api(#[from] ApiError),

    /// External processes that could not be started.
    #[error(transparent)]
    Shell(#[from] ShellError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl MeatError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Api(e) => e.suggestions(),
            Self::Shell(ShellError::Spawn { .. }) => vec![
                "Ensure a POSIX shell (or cmd.exe on Windows) is available".into(),
            ],
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in meat".into(),
                "Please report this issue at: https://github.com/digitalmeat/meat-cli/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
            Self::Api(ApiError::MissingToken) => ErrorCategory::Configuration,
            Self::Api(_) | Self::Shell(_) => ErrorCategory::Internal,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Server message of a remote rejection the caller may answer by re-prompting.
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            Self::Api(ApiError::Rejected { message, .. }) => Some(message),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type MeatResult<T> = Result<T, MeatError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_git_folder_is_a_validation_error() {
        let err: MeatError = ApplicationError::FolderNotARepository {
            path: PathBuf::from("acme"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("could not find a project"));
    }

    #[test]
    fn rejection_message_only_for_rejections() {
        let rejected: MeatError = ApiError::Rejected {
            status: 422,
            message: "The code has already been taken".into(),
        }
        .into();
        let offline: MeatError = ApiError::Transport {
            reason: "timeout".into(),
        }
        .into();

        assert_eq!(rejected.rejection_message(), Some("The code has already been taken"));
        assert_eq!(offline.rejection_message(), None);
    }

    #[test]
    fn command_failure_reports_exit_code() {
        let err = ApplicationError::CommandFailed {
            command: "git clone x".into(),
            status: Some(128),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "Command `git clone x` failed with exit code 128");
    }
}
