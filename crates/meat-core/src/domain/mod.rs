//! Core domain layer for meat.
//!
//! This module contains pure logic with no I/O: projects, environment files,
//! database settings derived from them, per-project configuration and the
//! naming conventions used to clone and scaffold projects.
//!
//! - **No I/O**: No filesystem, process, network or terminal access
//! - **No async**: Everything is synchronous
//! - **Value semantics**: All domain objects are Clone + PartialEq

pub mod conventions;
pub mod entities;
pub mod error;
pub mod value_objects;

pub use conventions::{Conventions, scaffold_command, shell_quote, slugify};
pub use entities::{
    AssetsConfig, DatabaseConfig, EnvironmentVariableSet, LocalSettings, Project, ProjectConfig,
    ScriptsConfig, environment::LINE_ENDING,
};
pub use error::{DomainError, ErrorCategory};
pub use value_objects::{BuildMode, ProjectType, Toggle};
