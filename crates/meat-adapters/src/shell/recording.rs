//! Scriptable shell double for end-to-end tests.

use std::sync::{Arc, Mutex, MutexGuard};

use meat_core::application::{
    ShellError,
    ports::{CommandOutput, ShellCommand, ShellRunner},
};

/// Records every command and answers from a list of scripted outputs.
///
/// The first response whose prefix matches the command line wins;
/// unmatched commands succeed with empty output. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RecordingShell {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    commands: Vec<ShellCommand>,
    responses: Vec<(String, CommandOutput)>,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands starting with `prefix` with `output`.
    pub fn respond(self, prefix: impl Into<String>, output: CommandOutput) -> Self {
        self.lock().responses.push((prefix.into(), output));
        self
    }

    /// Every command run so far.
    pub fn commands(&self) -> Vec<ShellCommand> {
        self.lock().commands.clone()
    }

    /// Command lines run so far.
    pub fn lines(&self) -> Vec<String> {
        self.lock().commands.iter().map(|c| c.line.clone()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ShellRunner for RecordingShell {
    fn run(&self, command: &ShellCommand) -> Result<CommandOutput, ShellError> {
        let mut inner = self.lock();
        inner.commands.push(command.clone());

        let output = inner
            .responses
            .iter()
            .find(|(prefix, _)| command.line.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(CommandOutput::success);
        Ok(output)
    }
}
