//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `meat-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::application::ShellError;
use crate::domain::{DatabaseConfig, LocalSettings, Project, ProjectConfig, ProjectType};
use crate::error::MeatResult;

#[cfg(test)]
use mockall::automock;

// ── Shell ────────────────────────────────────────────────────────────────────

/// A command line to hand to the platform shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub line: String,
    /// Working directory; `None` inherits the process directory.
    pub cwd: Option<PathBuf>,
    /// Forward output to the terminal instead of capturing it.
    pub stream: bool,
    pub env: Vec<(String, String)>,
}

impl ShellCommand {
    /// A captured command running in the inherited directory.
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            cwd: None,
            stream: false,
            env: Vec::new(),
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn streamed(mut self) -> Self {
        self.stream = true;
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Exit status and captured output. Streamed commands leave both buffers empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self {
            status: Some(0),
            ..Default::default()
        }
    }

    pub fn failure(code: i32) -> Self {
        Self {
            status: Some(code),
            ..Default::default()
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Port for running external commands.
///
/// A non-zero exit is returned as data; only failing to start the process
/// is an error.
#[cfg_attr(test, automock)]
pub trait ShellRunner {
    fn run(&self, command: &ShellCommand) -> Result<CommandOutput, ShellError>;
}

// ── Filesystem ───────────────────────────────────────────────────────────────

/// Port for filesystem operations.
///
/// Implemented by:
/// - `meat_adapters::filesystem::LocalFilesystem` (production)
/// - `meat_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, automock)]
pub trait Filesystem {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> MeatResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> MeatResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> MeatResult<()>;
}

// ── Terminal ─────────────────────────────────────────────────────────────────

/// Port for interactive questions.
///
/// The prompt layer never validates answers; callers loop when needed.
#[cfg_attr(test, automock)]
pub trait Prompter {
    fn confirm(&self, question: &str, default: bool) -> MeatResult<bool>;

    /// Free-text answer. `completions` feeds tab completion, best first.
    fn ask(&self, question: &str, default: Option<String>, completions: &[String])
    -> MeatResult<String>;

    /// Pick one of `options`; returns the chosen option.
    fn choice(&self, question: &str, options: &[String], default: &str) -> MeatResult<String>;

    /// Hidden input; empty answers are allowed.
    fn secret(&self, question: &str) -> MeatResult<String>;
}

/// Port for user-facing status lines.
#[cfg_attr(test, automock)]
pub trait Console {
    fn line(&self, msg: &str) -> MeatResult<()>;
    fn info(&self, msg: &str) -> MeatResult<()>;
    fn success(&self, msg: &str) -> MeatResult<()>;
    fn warning(&self, msg: &str) -> MeatResult<()>;
    fn error(&self, msg: &str) -> MeatResult<()>;
}

// ── Remote API ───────────────────────────────────────────────────────────────

/// Port for the remote project-management API.
///
/// Duplicate or invalid codes surface as `ApiError::Rejected`.
#[cfg_attr(test, automock)]
pub trait ProjectApi {
    fn create_project(&self, code: &str, name: &str, project_type: ProjectType)
    -> MeatResult<Project>;

    fn setup_source_hosting(&self, project_id: u64) -> MeatResult<Project>;

    fn setup_hosting_platform(&self, project_id: u64, build_script: &str) -> MeatResult<Project>;

    fn setup_task_board(&self, project_id: u64) -> MeatResult<Project>;

    fn setup_chat_channel(&self, project_id: u64) -> MeatResult<Project>;

    fn notify_installation(&self, project_code: &str) -> MeatResult<()>;
}

// ── Local state ──────────────────────────────────────────────────────────────

/// Port for the per-user settings file.
#[cfg_attr(test, automock)]
pub trait SettingsStore {
    fn exists(&self) -> bool;

    /// Missing settings load as `LocalSettings::default()`.
    fn load(&self) -> MeatResult<LocalSettings>;

    fn save(&self, settings: &LocalSettings) -> MeatResult<()>;
}

/// Port for the per-project configuration document.
#[cfg_attr(test, automock)]
pub trait ProjectConfigSource {
    /// Load the configuration of the project rooted at `root`.
    fn load(&self, root: &Path) -> MeatResult<ProjectConfig>;
}

// ── Local services ───────────────────────────────────────────────────────────

/// Port for the local database server.
#[cfg_attr(test, automock)]
pub trait DatabaseAdmin {
    /// Fails when the server cannot be reached with these credentials.
    fn check_connection(&self, config: &DatabaseConfig) -> MeatResult<()>;

    fn database_exists(&self, config: &DatabaseConfig) -> MeatResult<bool>;

    fn create_database(&self, config: &DatabaseConfig) -> MeatResult<()>;
}

/// Port for the desktop browser.
#[cfg_attr(test, automock)]
pub trait Browser {
    fn open(&self, url: &str) -> MeatResult<()>;
}
