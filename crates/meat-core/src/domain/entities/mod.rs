pub mod database;
pub mod environment;
pub mod project;
pub mod project_config;
pub mod settings;

pub use database::DatabaseConfig;
pub use environment::EnvironmentVariableSet;
pub use project::Project;
pub use project_config::{AssetsConfig, ProjectConfig, ScriptsConfig};
pub use settings::LocalSettings;
