//! Console double capturing user-facing lines.

use std::sync::{Arc, Mutex, MutexGuard};

use meat_core::{application::ports::Console, error::MeatResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Line,
    Info,
    Success,
    Warning,
    Error,
}

/// Keeps every message in memory. Clones share the buffer.
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    messages: Arc<Mutex<Vec<(Level, String)>>>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.lock().clone()
    }

    /// Messages at `level`, in order.
    pub fn at(&self, level: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lock().iter().any(|(_, m)| m.contains(needle))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(Level, String)>> {
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, level: Level, msg: &str) -> MeatResult<()> {
        self.lock().push((level, msg.to_string()));
        Ok(())
    }
}

impl Console for BufferConsole {
    fn line(&self, msg: &str) -> MeatResult<()> {
        self.push(Level::Line, msg)
    }

    fn info(&self, msg: &str) -> MeatResult<()> {
        self.push(Level::Info, msg)
    }

    fn success(&self, msg: &str) -> MeatResult<()> {
        self.push(Level::Success, msg)
    }

    fn warning(&self, msg: &str) -> MeatResult<()> {
        self.push(Level::Warning, msg)
    }

    fn error(&self, msg: &str) -> MeatResult<()> {
        self.push(Level::Error, msg)
    }
}
