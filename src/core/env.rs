//! Line-oriented .env transform.
//!
//! Parses a file into ordered [`Line`]s, hands the assignments to a caller as
//! a [`ConfigMap`], and writes the result back without disturbing anything
//! else: comments, blank lines, malformed lines and line order are preserved,
//! and only the value half of assignment lines may change.
//!
//! No quoting or escaping is interpreted here. `KEY="a b"` has the value
//! `"a b"` including the quotes.

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::core::types::{ConfigMap, EnvKey, EnvValue};
use crate::error::{Result, TransformError};

/// `key=value`, key is everything before the first `=`.
///
/// The value may not contain a line terminator (`\r`, `\n`, U+2028 or
/// U+2029), so a line that still carries one is not an assignment and is
/// passed through untouched.
fn assignment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([^=]+)=([^\r\n\x{2028}\x{2029}]*)$").expect("assignment pattern is valid")
    })
}

/// One line of a .env file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Comment, blank or unparseable line, emitted verbatim.
    Raw(String),
    /// A `key=value` line. The key keeps any surrounding whitespace.
    Assignment { key: EnvKey, value: EnvValue },
}

impl Line {
    /// Classify a single line (without its line feed).
    pub fn parse(text: &str) -> Self {
        if text.starts_with('#') {
            return Self::Raw(text.to_string());
        }

        match assignment_pattern().captures(text) {
            Some(caps) => Self::Assignment {
                key: caps[1].to_string(),
                value: caps[2].to_string(),
            },
            None => Self::Raw(text.to_string()),
        }
    }

    /// The key, for assignment lines.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Assignment { key, .. } => Some(key),
            Self::Raw(_) => None,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(text) => f.write_str(text),
            Self::Assignment { key, value } => write!(f, "{}={}", key, value),
        }
    }
}

/// Replace the first `\r\n` with `\n`.
///
/// Only the first occurrence is replaced. Later CRLF lines keep their `\r`
/// and are therefore classified as raw lines.
pub fn normalize_line_endings(content: &str) -> Cow<'_, str> {
    if content.contains("\r\n") {
        Cow::Owned(content.replacen("\r\n", "\n", 1))
    } else {
        Cow::Borrowed(content)
    }
}

/// A parsed .env file as an ordered list of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    /// Parse file content.
    ///
    /// Splitting on `\n` and joining on `\n` are symmetric, so a trailing line
    /// feed shows up as a final empty raw line and survives a round trip.
    pub fn parse(content: &str) -> Self {
        let content = normalize_line_endings(content);
        let lines = content.split('\n').map(Line::parse).collect();
        Self { lines }
    }

    /// All lines in file order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Key → value mapping of all assignment lines.
    ///
    /// For duplicate keys the last line wins.
    pub fn to_map(&self) -> ConfigMap {
        let mut map = ConfigMap::new();
        for line in &self.lines {
            if let Line::Assignment { key, value } = line {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }

    /// Value of the last assignment to `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().rev().find_map(|line| match line {
            Line::Assignment { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Write values from `map` back into every assignment line.
    ///
    /// Every assignment line takes `map[key]`, so duplicate lines of one key
    /// end up with the same value. Keys in `map` with no line are ignored.
    ///
    /// Returns the number of lines whose value changed.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::MissingKey` if `map` lacks a key that has a
    /// line. The document is left unchanged in that case.
    pub fn apply(&mut self, map: &ConfigMap) -> Result<usize> {
        if let Some(missing) = self
            .lines
            .iter()
            .filter_map(Line::key)
            .find(|key| !map.contains_key(*key))
        {
            return Err(TransformError::MissingKey(missing.to_string()).into());
        }

        let mut changed = 0;
        for line in &mut self.lines {
            if let Line::Assignment { key, value } = line {
                if let Some(new_value) = map.get(key.as_str()) {
                    if new_value != value {
                        *value = new_value.clone();
                        changed += 1;
                    }
                }
            }
        }

        Ok(changed)
    }

    /// Serialize back to text, lines joined with `\n`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Apply a whole-map transform to file content.
///
/// The callback receives the assignments as a [`ConfigMap`] and must return
/// a map holding at least the same keys.
///
/// # Errors
///
/// Returns any error from the callback, or `TransformError::MissingKey` if
/// the returned map dropped a key.
pub fn transform<F>(content: &str, f: F) -> Result<String>
where
    F: FnOnce(ConfigMap) -> Result<ConfigMap>,
{
    let mut document = Document::parse(content);
    let transformed = f(document.to_map())?;
    let changed = document.apply(&transformed)?;

    debug!(lines = document.len(), changed, "transformed");
    Ok(document.render())
}

/// Apply a per-value transform to file content.
///
/// `f` is called once per distinct key with `(key, value)` and returns the
/// new value.
///
/// # Errors
///
/// Returns the first error from `f`.
pub fn transform_values<F>(content: &str, mut f: F) -> Result<String>
where
    F: FnMut(&str, &str) -> Result<String>,
{
    transform(content, |map| {
        map.into_iter()
            .map(|(key, value)| {
                let new_value = f(&key, &value)?;
                Ok((key, new_value))
            })
            .collect()
    })
}
