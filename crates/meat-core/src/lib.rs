//! Meat Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the meat
//! project workflow tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             meat-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (MountService, CreateService, Init...)  │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Shell, Prompter, ProjectApi)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      meat-adapters (Infrastructure)     │
//! │  (LocalShell, HttpProjectApi, etc)      │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Project, EnvironmentVariableSet, ...)  │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meat_core::application::{MountOptions, MountRequest, MountService};
//! use meat_core::domain::Conventions;
//!
//! // `ports` bundles the adapters (shell, prompter, api, ...)
//! let service = MountService::new(ports, Conventions::default());
//! service.mount(MountRequest {
//!     invocation_dir: std::env::current_dir().unwrap(),
//!     project_code: Some("acme".into()),
//!     folder: None,
//!     options: MountOptions::default(),
//! }).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApiError, ApplicationError, AssumeYes, CreatePorts, CreateRequest, CreateService,
        InitService, MountOptions, MountPorts, MountRequest, MountService,
        ports::{
            Browser, CommandOutput, Console, DatabaseAdmin, Filesystem, ProjectApi,
            ProjectConfigSource, Prompter, SettingsStore, ShellCommand, ShellRunner,
        },
    };
    pub use crate::domain::{
        Conventions, DatabaseConfig, EnvironmentVariableSet, LocalSettings, Project,
        ProjectConfig, ProjectType, Toggle,
    };
    pub use crate::error::{MeatError, MeatResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
