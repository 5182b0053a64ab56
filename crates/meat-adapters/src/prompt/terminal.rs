//! Interactive prompts on the terminal, backed by dialoguer.

use dialoguer::{
    Completion, Confirm, FuzzySelect, Input, Password,
    theme::{ColorfulTheme, SimpleTheme, Theme},
};
use meat_core::{
    application::{ApplicationError, ports::Prompter},
    error::{MeatError, MeatResult},
};

pub struct DialoguerPrompter {
    theme: Box<dyn Theme>,
}

impl DialoguerPrompter {
    /// `colored = false` falls back to a plain theme (`--no-color`).
    pub fn new(colored: bool) -> Self {
        let theme: Box<dyn Theme> = if colored {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        };
        Self { theme }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Drop the textual hints our questions carry; dialoguer renders its own.
fn prompt_text(question: &str) -> &str {
    let question = question.trim_end();
    let question = question
        .strip_suffix("(Y/n):")
        .unwrap_or(question)
        .trim_end();
    question.strip_suffix(':').unwrap_or(question).trim_end()
}

fn prompt_error(e: dialoguer::Error) -> MeatError {
    ApplicationError::Prompt {
        reason: e.to_string(),
    }
    .into()
}

/// Tab-completes to the first option starting with the typed text.
struct PrefixCompletion<'a> {
    options: &'a [String],
}

impl Completion for PrefixCompletion<'_> {
    fn get(&self, input: &str) -> Option<String> {
        self.options
            .iter()
            .find(|option| option.starts_with(input) && option.as_str() != input)
            .cloned()
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, question: &str, default: bool) -> MeatResult<bool> {
        Confirm::with_theme(self.theme.as_ref())
            .with_prompt(prompt_text(question))
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn ask(
        &self,
        question: &str,
        default: Option<String>,
        completions: &[String],
    ) -> MeatResult<String> {
        let completion = PrefixCompletion {
            options: completions,
        };
        let mut input = Input::<String>::with_theme(self.theme.as_ref())
            .with_prompt(prompt_text(question))
            .allow_empty(true)
            .completion_with(&completion);
        if let Some(default) = default {
            input = input.default(default);
        }
        input.interact_text().map_err(prompt_error)
    }

    fn choice(&self, question: &str, options: &[String], default: &str) -> MeatResult<String> {
        let default_index = options.iter().position(|o| o == default).unwrap_or(0);
        let index = FuzzySelect::with_theme(self.theme.as_ref())
            .with_prompt(prompt_text(question))
            .items(options)
            .default(default_index)
            .interact()
            .map_err(prompt_error)?;

        options.get(index).cloned().ok_or_else(|| {
            MeatError::Internal {
                message: format!("selection {index} out of range"),
            }
        })
    }

    fn secret(&self, question: &str) -> MeatResult<String> {
        Password::with_theme(self.theme.as_ref())
            .with_prompt(prompt_text(question))
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_error)
    }
}
