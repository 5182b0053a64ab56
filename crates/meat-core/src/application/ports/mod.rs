//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `meat-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ShellRunner`: External commands (git, composer, yarn, envoy, ...)
//!   - `Filesystem`: File probes and writes
//!   - `Prompter` / `Console`: The terminal
//!   - `ProjectApi`: The remote project-management API
//!   - `SettingsStore` / `ProjectConfigSource`: Local configuration
//!   - `DatabaseAdmin` / `Browser`: Local services
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    Browser, CommandOutput, Console, DatabaseAdmin, Filesystem, ProjectApi, ProjectConfigSource,
    Prompter, SettingsStore, ShellCommand, ShellRunner,
};

#[cfg(test)]
pub use output::{
    MockBrowser, MockConsole, MockDatabaseAdmin, MockFilesystem, MockProjectApi,
    MockProjectConfigSource, MockPrompter, MockSettingsStore, MockShellRunner,
};
