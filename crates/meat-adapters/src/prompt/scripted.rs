//! Prompter double answering from a fixed script.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use meat_core::{
    application::{ApplicationError, ports::Prompter},
    error::MeatResult,
};

/// Answers questions in order from a list of strings.
///
/// An empty answer picks the default. Confirmations accept `y`/`yes`
/// and `n`/`no`. Running out of answers is an error, which keeps a test
/// from hanging on an unexpected question.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                answers: answers.into_iter().map(Into::into).collect(),
                asked: Vec::new(),
            })),
        }
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.lock().asked.clone()
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.lock().answers.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn next(&self, question: &str) -> MeatResult<String> {
        let mut inner = self.lock();
        inner.asked.push(question.to_string());
        inner.answers.pop_front().ok_or_else(|| {
            ApplicationError::Prompt {
                reason: format!("no scripted answer for '{question}'"),
            }
            .into()
        })
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str, default: bool) -> MeatResult<bool> {
        let answer = self.next(question)?;
        match answer.trim().to_ascii_lowercase().as_str() {
            "" => Ok(default),
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            other => Err(ApplicationError::InvalidInput(format!(
                "'{other}' is not a yes/no answer"
            ))
            .into()),
        }
    }

    fn ask(
        &self,
        question: &str,
        default: Option<String>,
        _completions: &[String],
    ) -> MeatResult<String> {
        let answer = self.next(question)?;
        Ok(match default {
            Some(default) if answer.is_empty() => default,
            _ => answer,
        })
    }

    fn choice(&self, question: &str, options: &[String], default: &str) -> MeatResult<String> {
        let answer = self.next(question)?;
        if answer.is_empty() {
            return Ok(default.to_string());
        }
        if options.contains(&answer) {
            Ok(answer)
        } else {
            Err(ApplicationError::InvalidInput(format!("'{answer}' is not one of {options:?}")).into())
        }
    }

    fn secret(&self, question: &str) -> MeatResult<String> {
        self.next(question)
    }
}
