//! Line-oriented prompt over any reader/writer pair.

use std::io::{self, BufRead, StdinLock, Stderr, Write};

use stencil_core::{
    application::{ApplicationError, Prompt},
    error::StencilResult,
};

/// Prompt that writes questions to `W` and reads one line per answer from `R`.
///
/// End of input reads as an empty answer, so a piped script that runs out
/// falls through to defaults rather than blocking.
#[derive(Debug)]
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

/// Questions on stderr, answers from stdin. Keeps stdout free for reports.
pub type StdinPrompt = LinePrompt<StdinLock<'static>, Stderr>;

impl StdinPrompt {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, question: &str) -> StencilResult<String> {
        let failed = |e: io::Error| ApplicationError::PromptFailed {
            question: question.trim_end_matches([':', ' ']).to_string(),
            reason: e.to_string(),
        };

        write!(self.writer, "{question}").map_err(failed)?;
        self.writer.flush().map_err(failed)?;

        let mut line = String::new();
        self.reader.read_line(&mut line).map_err(failed)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn show(&mut self, text: &str) -> StencilResult<()> {
        writeln!(self.writer, "{text}").map_err(|e| {
            ApplicationError::PromptFailed {
                question: "menu".into(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}
