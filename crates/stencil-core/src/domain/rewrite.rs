//! Ordered search-and-replace over a file's text.
//!
//! A [`RewriteSpec`] is applied rule by rule; each rule sees the output of
//! the previous one, so a broad rename can run before a narrower rule that
//! matches part of the new name.

use regex::Regex;

use crate::domain::error::DomainError;

/// A single substitution.
#[derive(Debug, Clone)]
enum RewriteRule {
    /// Replace every occurrence of `search`.
    Literal { search: String, replace: String },
    /// Replace every match of `pattern`; `$1`-style references are expanded.
    Pattern { pattern: Regex, replace: String },
}

impl RewriteRule {
    fn apply(&self, text: &str) -> Option<String> {
        match self {
            Self::Literal { search, replace } => {
                if search.is_empty() || search == replace || !text.contains(search.as_str()) {
                    return None;
                }
                Some(text.replace(search.as_str(), replace))
            }
            Self::Pattern { pattern, replace } => {
                let out = pattern.replace_all(text, replace.as_str());
                (out != text).then(|| out.into_owned())
            }
        }
    }
}

/// Result of applying a `RewriteSpec` to some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub text: String,
    pub changed: bool,
}

/// Ordered list of rules for one file.
#[derive(Debug, Clone, Default)]
pub struct RewriteSpec {
    rules: Vec<RewriteRule>,
}

impl RewriteSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a literal rule. Rules whose search equals the replacement are
    /// kept but never report a change.
    pub fn literal(mut self, search: impl Into<String>, replace: impl Into<String>) -> Self {
        self.rules.push(RewriteRule::Literal {
            search: search.into(),
            replace: replace.into(),
        });
        self
    }

    /// Append a regex rule.
    pub fn pattern(
        mut self,
        pattern: &str,
        replace: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let compiled = Regex::new(pattern).map_err(|e| DomainError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        self.rules.push(RewriteRule::Pattern {
            pattern: compiled,
            replace: replace.into(),
        });
        Ok(self)
    }

    /// Append a rule matching `word` only at identifier boundaries.
    pub fn word(mut self, word: &str, replace: impl Into<String>) -> Self {
        if word.is_empty() {
            return self;
        }
        // An escaped literal between word boundaries always compiles.
        if let Ok(pattern) = Regex::new(&format!(r"\b{}\b", regex::escape(word))) {
            self.rules.push(RewriteRule::Pattern {
                pattern,
                replace: replace.into().replace('$', "$$"),
            });
        }
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order.
    pub fn apply(&self, text: &str) -> Rewritten {
        let mut current = text.to_string();
        let mut changed = false;

        for rule in &self.rules {
            if let Some(next) = rule.apply(&current) {
                current = next;
                changed = true;
            }
        }

        Rewritten {
            text: current,
            changed,
        }
    }
}
