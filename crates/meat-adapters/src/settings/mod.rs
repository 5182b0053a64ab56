//! Per-user settings file.

mod file;

pub use file::FileSettingsStore;
