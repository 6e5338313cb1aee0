//! Pre-recorded answers, for tests and non-interactive runs.

use std::collections::VecDeque;

use stencil_core::{application::Prompt, error::StencilResult};

/// Answers questions from a fixed script and records what was asked.
/// Once the script is exhausted every answer is blank.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    questions: Vec<String>,
    shown: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Questions asked so far, in order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Menus and other text shown so far.
    pub fn shown(&self) -> &[String] {
        &self.shown
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> StencilResult<String> {
        self.questions.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }

    fn show(&mut self, text: &str) -> StencilResult<()> {
        self.shown.push(text.to_string());
        Ok(())
    }
}
