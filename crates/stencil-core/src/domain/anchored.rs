//! Anchored insertion into brace-delimited blocks.
//!
//! Generated sources keep their extension points in a handful of object
//! literals and class bodies. A [`BlockDocument`] is the view of one such
//! block: everything up to and including the opening brace (head), the
//! entries (body), and the closing brace onwards (tail). New content is
//! always spliced in just before the closing brace.
//!
//! The closing brace is found with a depth scan that ignores braces inside
//! string literals and comments, so entries like `"{": 1` or a commented-out
//! `}` do not confuse it.

use regex::Regex;

use crate::domain::error::DomainError;

/// Regex that locates a block. The match must end at the opening brace.
#[derive(Debug, Clone)]
pub struct BlockAnchor {
    label: String,
    pattern: Regex,
}

impl BlockAnchor {
    pub fn new(label: impl Into<String>, pattern: &str) -> Result<Self, DomainError> {
        let pattern = Regex::new(pattern).map_err(|e| DomainError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            label: label.into(),
            pattern,
        })
    }

    /// `export const <name> = {`, with an optional type annotation.
    pub fn exported_object(name: &str) -> Result<Self, DomainError> {
        Self::new(
            format!("export const {name}"),
            &format!(
                r"export\s+const\s+{}\s*(?::[^=]*)?=\s*\{{",
                regex::escape(name)
            ),
        )
    }

    /// `export class <name> ... {`
    pub fn exported_class(name: &str) -> Result<Self, DomainError> {
        Self::new(
            format!("export class {name}"),
            &format!(
                r"export\s+(?:default\s+)?class\s+{}\b[^{{]*\{{",
                regex::escape(name)
            ),
        )
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// How an object entry is terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryStyle {
    /// Give the new entry its own trailing comma.
    pub trailing_comma: bool,
}

/// One located block inside a larger text.
#[derive(Debug, Clone, Copy)]
pub struct BlockDocument<'a> {
    text: &'a str,
    open: usize,
    close: usize,
}

impl<'a> BlockDocument<'a> {
    /// Find the first block matching `anchor`. `None` when the anchor is
    /// absent or its block is never closed.
    pub fn locate(text: &'a str, anchor: &BlockAnchor) -> Option<Self> {
        let m = anchor.pattern.find(text)?;
        let open = m.end().checked_sub(1)?;
        if text.as_bytes().get(open) != Some(&b'{') {
            return None;
        }
        let close = matching_close(text, open)?;
        Some(Self { text, open, close })
    }

    /// Up to and including the opening brace.
    pub fn head(&self) -> &'a str {
        &self.text[..=self.open]
    }

    /// Between the braces.
    pub fn body(&self) -> &'a str {
        &self.text[self.open + 1..self.close]
    }

    /// From the closing brace to the end of the text.
    pub fn tail(&self) -> &'a str {
        &self.text[self.close..]
    }

    /// Whether the body declares `key` as a top-level property (bare or
    /// quoted), on its own line or after `{` / `,`.
    pub fn has_key(&self, key: &str) -> bool {
        let key = regex::escape(key);
        let Ok(re) = Regex::new(&format!(
            r#"(?m)(?:^|[{{,])\s*("{key}"|'{key}'|{key})\s*:"#
        )) else {
            return false;
        };

        let body = self.body();
        let lex = classify(body);
        re.captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .any(|m| {
                !matches!(lex[m.start()], Lex::LineComment | Lex::BlockComment)
                    && nesting_depth(body, &lex, m.start()) == 0
            })
    }

    /// Whether the body declares a method called `name`.
    pub fn has_method(&self, name: &str) -> bool {
        Regex::new(&format!(
            r"(?m)^\s*(?:(?:public|private|protected|static|async)\s+)*{}\s*[(<]",
            regex::escape(name)
        ))
        .is_ok_and(|re| re.is_match(self.body()))
    }

    /// Append an object entry, adding a comma after the previous entry when
    /// it lacks one.
    pub fn insert_entry(&self, entry: &str, style: EntryStyle) -> String {
        let mut entry = entry.trim_end().trim_end_matches(',').to_string();
        if style.trailing_comma {
            entry.push(',');
        }
        self.splice(&entry, Separator::Comma)
    }

    /// Append a class member after a blank line.
    pub fn insert_member(&self, member: &str) -> String {
        self.splice(member.trim_end(), Separator::BlankLine)
    }

    fn splice(&self, addition: &str, separator: Separator) -> String {
        let body = self.body();
        let last = last_code_byte(body);
        let closing_indent = line_indent(self.text, self.close);

        let (kept, rest) = match last {
            Some(i) => body.split_at(i + 1),
            None => ("", body),
        };
        // A comment sharing the line with the last entry stays with it.
        let (trailer, rest) = match (last, rest.find('\n')) {
            (Some(_), Some(n)) => (rest[..n].trim_end(), &rest[n..]),
            _ => ("", rest),
        };

        let indent = match last {
            Some(i) if !body[..i].contains('\n') => format!("{closing_indent}  "),
            Some(i) => line_indent(body, i).to_string(),
            None => format!("{closing_indent}  "),
        };

        let mut out = String::with_capacity(self.text.len() + addition.len() + 8);
        out.push_str(self.head());
        out.push_str(kept);

        if let Some(i) = last {
            match separator {
                Separator::Comma => {
                    if !matches!(body.as_bytes()[i], b',' | b'{') {
                        out.push(',');
                    }
                    out.push_str(trailer);
                    out.push('\n');
                }
                Separator::BlankLine => {
                    out.push_str(trailer);
                    out.push_str("\n\n");
                }
            }
        } else {
            out.push('\n');
        }

        out.push_str(&indent_lines(addition, &indent));

        if rest.contains('\n') {
            out.push_str(rest);
        } else {
            out.push('\n');
            out.push_str(closing_indent);
            out.push_str(rest.trim());
        }

        out.push_str(self.tail());
        out
    }
}

#[derive(Debug, Clone, Copy)]
enum Separator {
    Comma,
    BlankLine,
}

/// Locate `anchor` in `text` and append an object entry.
pub fn insert_entry(
    text: &str,
    anchor: &BlockAnchor,
    entry: &str,
    style: EntryStyle,
) -> Option<String> {
    BlockDocument::locate(text, anchor).map(|doc| doc.insert_entry(entry, style))
}

/// Locate `anchor` in `text` and append a class member.
pub fn insert_member(text: &str, anchor: &BlockAnchor, member: &str) -> Option<String> {
    BlockDocument::locate(text, anchor).map(|doc| doc.insert_member(member))
}

/// Add `line` after the last import statement, or at the top when there is
/// none. `None` when an identical line is already present.
pub fn ensure_import(text: &str, line: &str) -> Option<String> {
    let line = line.trim();
    if text.lines().any(|l| l.trim() == line) {
        return None;
    }

    let last_import_end = Regex::new(r"(?m)^import\b[^;]*;")
        .ok()
        .and_then(|re| re.find_iter(text).last().map(|m| m.end()));

    Some(match last_import_end {
        Some(end) => {
            let mut out = String::with_capacity(text.len() + line.len() + 1);
            out.push_str(&text[..end]);
            out.push('\n');
            out.push_str(line);
            out.push_str(&text[end..]);
            out
        }
        None => format!("{line}\n{text}"),
    })
}

// ============================================================================
// Scanning
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lex {
    Code,
    Str(u8),
    LineComment,
    BlockComment,
}

/// Classify every byte of `text`, starting outside any string or comment.
fn classify(text: &str) -> Vec<Lex> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut state = Lex::Code;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();

        match state {
            Lex::Code => match (b, next) {
                (b'/', Some(b'/')) => {
                    state = Lex::LineComment;
                    out.extend([state, state]);
                    i += 2;
                    continue;
                }
                (b'/', Some(b'*')) => {
                    state = Lex::BlockComment;
                    out.extend([state, state]);
                    i += 2;
                    continue;
                }
                (b'"' | b'\'' | b'`', _) => {
                    out.push(Lex::Str(b));
                    state = Lex::Str(b);
                }
                _ => out.push(Lex::Code),
            },
            Lex::Str(quote) => {
                out.push(state);
                if b == b'\\' && next.is_some() {
                    out.push(state);
                    i += 2;
                    continue;
                }
                if b == quote {
                    state = Lex::Code;
                }
            }
            Lex::LineComment => {
                if b == b'\n' {
                    state = Lex::Code;
                    out.push(Lex::Code);
                } else {
                    out.push(state);
                }
            }
            Lex::BlockComment => {
                out.push(state);
                if b == b'*' && next == Some(b'/') {
                    out.push(state);
                    state = Lex::Code;
                    i += 2;
                    continue;
                }
            }
        }
        i += 1;
    }

    out
}

/// Index of the brace closing the one at `open`.
fn matching_close(text: &str, open: usize) -> Option<usize> {
    let lex = classify(text);
    let bytes = text.as_bytes();
    let mut depth = 0usize;

    for i in open..bytes.len() {
        if lex[i] != Lex::Code {
            continue;
        }
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Bracket depth of `at` within `text`, counting only code bytes.
fn nesting_depth(text: &str, lex: &[Lex], at: usize) -> usize {
    text.as_bytes()[..at]
        .iter()
        .zip(lex)
        .filter(|&(_, l)| *l == Lex::Code)
        .fold(0usize, |depth, (b, _)| match b {
            b'{' | b'[' | b'(' => depth + 1,
            b'}' | b']' | b')' => depth.saturating_sub(1),
            _ => depth,
        })
}

/// Last non-whitespace byte that is not part of a comment.
fn last_code_byte(body: &str) -> Option<usize> {
    let lex = classify(body);
    body.as_bytes()
        .iter()
        .enumerate()
        .rev()
        .find(|&(i, b)| {
            !b.is_ascii_whitespace() && !matches!(lex[i], Lex::LineComment | Lex::BlockComment)
        })
        .map(|(i, _)| i)
}

/// Leading whitespace of the line containing byte `at`.
fn line_indent(text: &str, at: usize) -> &str {
    let start = text[..at].rfind('\n').map_or(0, |i| i + 1);
    let line = &text[start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

fn indent_lines(text: &str, indent: &str) -> String {
    text.lines()
        .map(|l| {
            if l.trim().is_empty() {
                String::new()
            } else {
                format!("{indent}{l}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
