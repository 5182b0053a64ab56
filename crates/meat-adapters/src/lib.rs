//! Infrastructure adapters for meat.
//!
//! This crate implements the ports defined in `meat_core::application::ports`.
//! It contains all external dependencies and I/O operations, plus in-memory
//! doubles used by end-to-end tests.

pub mod api;
pub mod browser;
pub mod console;
pub mod database;
pub mod filesystem;
pub mod project_config;
pub mod prompt;
pub mod settings;
pub mod shell;

// Re-export commonly used adapters
pub use api::{ApiCall, HttpProjectApi, InMemoryProjectApi};
pub use browser::SystemBrowser;
pub use console::BufferConsole;
pub use database::MysqlCli;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use project_config::ConfigFileSource;
pub use prompt::{DialoguerPrompter, ScriptedPrompter};
pub use settings::FileSettingsStore;
pub use shell::{LocalShell, RecordingShell};
