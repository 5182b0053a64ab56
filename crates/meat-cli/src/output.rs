//! Terminal output for user-facing status lines.

use std::io;

use console::Term;
use owo_colors::OwoColorize;

use meat_core::{application::ApplicationError, application::ports::Console, error::MeatResult};

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// Writes `ℹ`/`✓`/`⚠`/`✗` lines to stdout.
///
/// Errors always print; everything else is dropped in quiet mode.
#[derive(Clone)]
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || !console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.decorate(Symbol::Success, msg))
    }

    /// Not suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(&self.decorate(Symbol::Error, msg))
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.decorate(Symbol::Warning, msg))
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.decorate(Symbol::Info, msg))
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    fn decorate(&self, symbol: Symbol, msg: &str) -> String {
        let glyph = symbol.glyph();
        if self.no_color {
            return format!("{glyph} {msg}");
        }
        match symbol {
            Symbol::Info => format!("{} {}", glyph.blue().bold(), msg.blue()),
            Symbol::Success => format!("{} {}", glyph.green().bold(), msg.green()),
            Symbol::Warning => format!("{} {}", glyph.yellow().bold(), msg.yellow()),
            Symbol::Error => format!("{} {}", glyph.red().bold(), msg.red()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Symbol {
    Info,
    Success,
    Warning,
    Error,
}

impl Symbol {
    const fn glyph(self) -> &'static str {
        match self {
            Self::Info => "\u{2139}",    // ℹ
            Self::Success => "\u{2713}", // ✓
            Self::Warning => "\u{26a0}", // ⚠
            Self::Error => "\u{2717}",   // ✗
        }
    }
}

fn output_error(e: io::Error) -> ApplicationError {
    ApplicationError::Output {
        reason: e.to_string(),
    }
}

/// Lets the core services print through the same terminal.
impl Console for OutputManager {
    fn line(&self, msg: &str) -> MeatResult<()> {
        Ok(self.print(msg).map_err(output_error)?)
    }

    fn info(&self, msg: &str) -> MeatResult<()> {
        Ok(OutputManager::info(self, msg).map_err(output_error)?)
    }

    fn success(&self, msg: &str) -> MeatResult<()> {
        Ok(OutputManager::success(self, msg).map_err(output_error)?)
    }

    fn warning(&self, msg: &str) -> MeatResult<()> {
        Ok(OutputManager::warning(self, msg).map_err(output_error)?)
    }

    fn error(&self, msg: &str) -> MeatResult<()> {
        Ok(OutputManager::error(self, msg).map_err(output_error)?)
    }
}
