// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so services can surface them more than once)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid environment file line {line}: '{content}'")]
    InvalidEnvLine { line: usize, content: String },

    #[error("Unknown project type '{0}'")]
    UnknownProjectType(String),

    #[error("Invalid toggle value '{0}' (expected true, false or auto)")]
    InvalidToggle(String),

    #[error("The project name cannot be empty")]
    EmptyProjectName,

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Project '{code}' has no source-hosting repository")]
    MissingRepository { code: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidEnvLine { line, .. } => vec![
                format!("Fix line {line} of the environment file"),
                "Every non-comment line must look like KEY=VALUE".into(),
            ],
            Self::UnknownProjectType(_) => vec![
                "Supported project types:".into(),
                "  • themosis".into(),
                "  • laravel".into(),
                "  • blank".into(),
            ],
            Self::InvalidToggle(_) => vec![
                "Use true, false or \"auto\" in the project configuration".into(),
            ],
            Self::MissingRepository { code } => vec![
                format!("The remote API did not return a repository for '{code}'"),
                "Check the source-hosting integration in the project dashboard".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidEnvLine { .. }
            | Self::UnknownProjectType(_)
            | Self::InvalidToggle(_)
            | Self::EmptyProjectName => ErrorCategory::Validation,
            Self::MissingRepository { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
