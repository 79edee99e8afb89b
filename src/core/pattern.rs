//! Key selection.
//!
//! Decides which keys an operation applies to, e.g. "encrypt only keys
//! ending in `_SECRET`". A pattern is either an exact key or a regular
//! expression; a selector matches if any of its patterns does.
//!
//! Text form: `/regex/` is a regular expression, anything else is an exact key.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::core::constants::DEFAULT_ENCRYPT_PATTERN;
use crate::error::{ConfigError, Error, Result};

/// A single key pattern.
#[derive(Debug, Clone)]
pub enum KeyPattern {
    /// Matches one key by equality.
    Exact(String),
    /// Matches keys the expression finds a match in (search, not full match).
    Regex(Regex),
}

impl KeyPattern {
    /// Exact-match pattern.
    pub fn exact(key: impl Into<String>) -> Self {
        Self::Exact(key.into())
    }

    /// Regular-expression pattern.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` if the expression does not compile.
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern).map(Self::Regex).map_err(|e| {
            ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Whether `key` matches this pattern.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Exact(exact) => key == exact,
            Self::Regex(regex) => regex.is_match(key),
        }
    }
}

impl FromStr for KeyPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
        {
            Some(expr) if !expr.is_empty() => Self::regex(expr),
            _ => Ok(Self::exact(s)),
        }
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(key) => f.write_str(key),
            Self::Regex(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

/// Whether `key` matches any of `patterns`.
pub fn key_matches(key: &str, patterns: &[KeyPattern]) -> bool {
    patterns.iter().any(|p| p.matches(key))
}

/// A list of patterns; matches if any element matches.
#[derive(Debug, Clone)]
pub struct KeySelector {
    patterns: Vec<KeyPattern>,
}

impl KeySelector {
    pub fn new(patterns: Vec<KeyPattern>) -> Self {
        Self { patterns }
    }

    /// Parse patterns from their text form.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` for the first bad expression.
    pub fn parse<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().parse())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(patterns))
    }

    pub fn matches(&self, key: &str) -> bool {
        key_matches(key, &self.patterns)
    }

    pub fn patterns(&self) -> &[KeyPattern] {
        &self.patterns
    }
}

/// Keys ending in `_SECRET`.
impl Default for KeySelector {
    fn default() -> Self {
        Self::parse([DEFAULT_ENCRYPT_PATTERN]).expect("default pattern is valid")
    }
}

impl fmt::Display for KeySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.patterns.iter().map(ToString::to_string).collect();
        f.write_str(&joined.join(", "))
    }
}
