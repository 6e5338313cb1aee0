//! Prompt adapters.

mod line;
mod scripted;

pub use line::{LinePrompt, StdinPrompt};
pub use scripted::ScriptedPrompt;
