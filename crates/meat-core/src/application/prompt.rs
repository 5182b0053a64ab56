//! Prompter decorators.

use crate::application::ports::Prompter;
use crate::error::MeatResult;

/// Answers every confirmation with "yes" and forwards everything else.
///
/// Used by `meat create --yes`.
pub struct AssumeYes<P> {
    inner: P,
}

impl<P: Prompter> AssumeYes<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Prompter> Prompter for AssumeYes<P> {
    fn confirm(&self, question: &str, _default: bool) -> MeatResult<bool> {
        tracing::debug!(question, "auto-confirmed");
        Ok(true)
    }

    fn ask(
        &self,
        question: &str,
        default: Option<String>,
        completions: &[String],
    ) -> MeatResult<String> {
        self.inner.ask(question, default, completions)
    }

    fn choice(&self, question: &str, options: &[String], default: &str) -> MeatResult<String> {
        self.inner.choice(question, options, default)
    }

    fn secret(&self, question: &str) -> MeatResult<String> {
        self.inner.secret(question)
    }
}

impl<P: Prompter + ?Sized> Prompter for Box<P> {
    fn confirm(&self, question: &str, default: bool) -> MeatResult<bool> {
        (**self).confirm(question, default)
    }

    fn ask(
        &self,
        question: &str,
        default: Option<String>,
        completions: &[String],
    ) -> MeatResult<String> {
        (**self).ask(question, default, completions)
    }

    fn choice(&self, question: &str, options: &[String], default: &str) -> MeatResult<String> {
        (**self).choice(question, options, default)
    }

    fn secret(&self, question: &str) -> MeatResult<String> {
        (**self).secret(question)
    }
}
