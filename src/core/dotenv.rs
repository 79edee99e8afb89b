//! dotenv syntax.
//!
//! Interprets a file the way common dotenv loaders do: optional `export`
//! prefix, `KEY=value` or `KEY: value`, single/double/backtick quotes,
//! multi-line quoted values and trailing `#` comments. There is no `$VAR`
//! substitution; values come out exactly as written, minus quotes.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::types::ConfigMap;

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"(?m)^\s*(?:export\s+)?([A-Za-z0-9_.-]+)(?:\s*=\s*?|:\s+?)(\s*'(?:\\'|[^'])*'|\s*"(?:\\"|[^"])*"|\s*`(?:\\`|[^`])*`|[^#\r\n]+)?\s*(?:#.*)?$"#,
        )
        .expect("dotenv line pattern is valid")
    })
}

/// Strip one pair of matching quotes; expand `\n` and `\r` in double quotes.
fn unquote(raw: &str) -> String {
    let value = raw.trim();
    let mut chars = value.chars();
    let quote = match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && matches!(first, '\'' | '"' | '`') => first,
        _ => return value.to_string(),
    };

    let inner = &value[1..value.len() - 1];
    if quote == '"' {
        inner.replace("\\n", "\n").replace("\\r", "\r")
    } else {
        inner.to_string()
    }
}

/// Parse dotenv text into a map. Later assignments override earlier ones.
///
/// Lines that are not assignments are ignored; parsing never fails.
pub fn parse(content: &str) -> ConfigMap {
    let content = content.replace("\r\n", "\n").replace('\r', "\n");

    line_pattern()
        .captures_iter(&content)
        .map(|caps| {
            let value = caps.get(2).map_or("", |m| m.as_str());
            (caps[1].to_string(), unquote(value))
        })
        .collect()
}
