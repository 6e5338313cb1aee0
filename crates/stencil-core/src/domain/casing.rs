//! Case conversion for identifiers derived from free text.
//!
//! Every function here is pure and total: empty or whitespace-only input
//! yields an empty string, and converting an already-converted value to the
//! same form returns it unchanged.

use std::fmt;

/// The naming conventions used by generated TypeScript sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseForm {
    /// `weather-data` (directories, file names, tool keys)
    Kebab,
    /// `weatherData` (methods, instances, DTO file names)
    Camel,
    /// `WeatherData` (classes, DTO types)
    Pascal,
    /// `weather_data`
    Snake,
    /// `WEATHER_DATA` (environment variables)
    UpperSnake,
}

impl CaseForm {
    pub const ALL: [CaseForm; 5] = [
        CaseForm::Kebab,
        CaseForm::Camel,
        CaseForm::Pascal,
        CaseForm::Snake,
        CaseForm::UpperSnake,
    ];
}

impl fmt::Display for CaseForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Kebab => "kebab-case",
            Self::Camel => "camelCase",
            Self::Pascal => "PascalCase",
            Self::Snake => "snake_case",
            Self::UpperSnake => "UPPER_SNAKE_CASE",
        };
        f.write_str(name)
    }
}

/// Convert `raw` to the given case form.
pub fn convert(raw: &str, form: CaseForm) -> String {
    match form {
        CaseForm::Kebab => to_kebab_case(raw),
        CaseForm::Camel => to_camel_case(raw),
        CaseForm::Pascal => to_pascal_case(raw),
        CaseForm::Snake => to_snake_case(raw),
        CaseForm::UpperSnake => to_upper_snake_case(raw),
    }
}

/// `"Weather Data"` → `"weather-data"`.
pub fn to_kebab_case(raw: &str) -> String {
    lowercase_words(raw).join("-")
}

/// `"Weather Data"` → `"weather_data"`.
pub fn to_snake_case(raw: &str) -> String {
    lowercase_words(raw).join("_")
}

/// `"get_forecast"` → `"GET_FORECAST"`.
pub fn to_upper_snake_case(raw: &str) -> String {
    to_snake_case(raw).to_uppercase()
}

/// `"Weather Data"` → `"weatherData"`.
pub fn to_camel_case(raw: &str) -> String {
    let mut out = String::new();
    for (i, word) in humped_words(raw).iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// `"weather-data"` → `"WeatherData"`.
///
/// A single token that already mixes upper and lower case keeps its
/// internal casing and only gets its first character upper-cased, so
/// `"getForecast"` becomes `"GetForecast"` and `"XMLParser"` stays as is.
pub fn to_pascal_case(raw: &str) -> String {
    let tokens = separator_tokens(raw);
    if let [token] = tokens.as_slice() {
        if is_mixed_case(token) {
            let humped = upper_first(token);
            if split_words(&humped).len() == split_words(token).len() {
                return humped;
            }
        }
    }

    humped_words(raw).iter().map(|w| capitalize(w)).collect()
}

/// Upper-case the first character, leave the rest untouched.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(s.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            // to_uppercase handles Unicode correctly (e.g., "ß" -> "SS")
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

fn is_mixed_case(token: &str) -> bool {
    token.chars().any(char::is_uppercase) && token.chars().any(char::is_lowercase)
}

fn is_separator(c: char) -> bool {
    c == '-' || c == '_' || c == '.' || c.is_whitespace()
}

/// Tokens between runs of `[-_.\s]`, case boundaries ignored.
fn separator_tokens(input: &str) -> Vec<&str> {
    input
        .trim()
        .split(is_separator)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Words for the humped forms. Adjacent single-character words are joined,
/// since `"a b"` as `"AB"` would read back as one acronym.
fn humped_words(input: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut prev_single = false;
    for word in split_words(input) {
        let single = word.chars().count() == 1;
        match words.last_mut() {
            Some(last) if single && prev_single => last.push_str(&word),
            _ => words.push(word),
        }
        prev_single = single;
    }
    words
}

fn lowercase_words(input: &str) -> Vec<String> {
    split_words(input)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect()
}

/// Split a string into words based on separators and casing.
///
/// ## Word Boundary Detection
///
/// 1. **Explicit separators:** `_`, `-`, `.`, whitespace → always split
/// 2. **Case transition:** `aB` or `2B` → split before `B`
/// 3. **Acronym boundary:** `HTTPRequest` → split between `P` and `R`
///    (detected by `Upper Upper Lower` pattern)
///
/// Words keep their original casing; callers normalise.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.trim().chars().peekable();

    while let Some(c) = chars.next() {
        if is_separator(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(c);

        if let Some(&next) = chars.peek() {
            // "myApp" → "my" + "App", "v2Api" → "v2" + "Api"
            if (c.is_lowercase() || c.is_ascii_digit()) && next.is_uppercase() {
                words.push(std::mem::take(&mut current));
                continue;
            }

            // "HTTPServer" → "HTTP" + "Server"
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(char::is_lowercase)
            {
                words.push(std::mem::take(&mut current));
            }
        }
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}
