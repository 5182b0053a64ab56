//! Application layer for meat.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (MountService, CreateService, InitService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Services sequence prompts and external commands. Parsing and naming
//! rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod prompt;
pub mod services;

pub use services::{
    CreatePorts, CreateRequest, CreateService, InitService, MountContext, MountOptions,
    MountPorts, MountRequest, MountService, MountStage, RepositoryManager,
};

pub use ports::{
    Browser, CommandOutput, Console, DatabaseAdmin, Filesystem, ProjectApi, ProjectConfigSource,
    Prompter, SettingsStore, ShellCommand, ShellRunner,
};

pub use error::{ApiError, ApplicationError, ShellError};
pub use prompt::AssumeYes;
