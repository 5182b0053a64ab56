//! Opens URLs in the desktop browser.

use meat_core::{
    application::ports::{Browser, ShellCommand, ShellRunner},
    domain::shell_quote,
    error::MeatResult,
};
use tracing::warn;

/// Uses `open` on macOS, `xdg-open` on other unixes and `start` on Windows.
pub struct SystemBrowser<S> {
    shell: S,
}

impl<S: ShellRunner> SystemBrowser<S> {
    pub fn new(shell: S) -> Self {
        Self { shell }
    }

    fn command_line(url: &str) -> String {
        if cfg!(windows) {
            format!("start \"\" \"{url}\"")
        } else if cfg!(target_os = "macos") {
            format!("open {}", shell_quote(url))
        } else {
            format!("xdg-open {}", shell_quote(url))
        }
    }
}

impl<S: ShellRunner> Browser for SystemBrowser<S> {
    fn open(&self, url: &str) -> MeatResult<()> {
        let output = self.shell.run(&ShellCommand::new(Self::command_line(url)))?;
        if !output.is_success() {
            warn!(url, status = ?output.status, stderr = %output.stderr.trim(), "browser opener failed");
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::shell::RecordingShell;

    #[test]
    fn url_is_quoted() {
        let shell = RecordingShell::new();
        SystemBrowser::new(shell.clone())
            .open("http://acme.dev/")
            .unwrap();
        assert!(shell.lines()[0].ends_with(" 'http://acme.dev/'"));
    }
}
