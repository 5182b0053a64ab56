//! Prompter adapters.

mod scripted;
mod terminal;

pub use scripted::ScriptedPrompter;
pub use terminal::DialoguerPrompter;
