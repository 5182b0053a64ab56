//! `.env`-style files as an ordered list of variables.
//!
//! Order matters: later values may reference earlier keys through `${KEY}`.
//! References are never resolved here, they are written back verbatim.
//! Values that would not survive a bare `KEY=VALUE` line are re-quoted on
//! render.

use std::fmt;

use crate::domain::DomainError;

/// Platform line separator used when writing environment files.
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Ordered mapping of variable name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentVariableSet {
    entries: Vec<(String, String)>,
}

impl EnvironmentVariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the contents of an environment file.
    ///
    /// Blank lines and `#` comments are skipped, an `export ` prefix is
    /// dropped, and matching surrounding quotes are removed from values.
    /// Inside double quotes `\"` and `\\` are unescaped.
    pub fn parse(source: &str) -> Result<Self, DomainError> {
        let mut set = Self::new();

        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);

            let (key, value) = line
                .split_once('=')
                .filter(|(key, _)| !key.trim().is_empty())
                .ok_or_else(|| DomainError::InvalidEnvLine {
                    line: index + 1,
                    content: raw.to_string(),
                })?;

            set.insert(key.trim(), parse_value(value.trim()));
        }

        Ok(set)
    }

    /// Insert or replace a variable. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as `KEY=VALUE` lines joined by [`LINE_ENDING`].
    pub fn render(&self) -> String {
        self.render_with(LINE_ENDING)
    }

    pub fn render_with(&self, separator: &str) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{k}={}", render_value(v)))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl fmt::Display for EnvironmentVariableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentVariableSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

fn parse_value(value: &str) -> String {
    if let Some(inner) = quoted(value, '"') {
        return unescape(inner);
    }
    if let Some(inner) = quoted(value, '\'') {
        return inner.to_string();
    }
    // Unquoted values may carry a trailing comment.
    match value.find(" #") {
        Some(pos) => value[..pos].trim_end().to_string(),
        None => value.to_string(),
    }
}

fn quoted(value: &str, quote: char) -> Option<&str> {
    value
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
}

fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match (c, chars.clone().next()) {
            ('\\', Some(next @ ('"' | '\\'))) => {
                out.push(next);
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

fn needs_quotes(value: &str) -> bool {
    value.chars().any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\''))
}

/// Quote `value` so that [`parse_value`] reads it back unchanged.
///
/// Double quotes keep `${KEY}` references expandable. Single quotes are
/// only used for values holding a double quote and no single quote.
fn render_value(value: &str) -> String {
    if !needs_quotes(value) {
        return value.to_string();
    }
    if value.contains('"') && !value.contains('\'') {
        return format!("'{value}'");
    }
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preserves_file_order() {
        let set = EnvironmentVariableSet::parse("B=2\nA=1\nC=3").unwrap();
        let keys: Vec<_> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["B", "A", "C"]);
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let set = EnvironmentVariableSet::parse("# header\n\nAPP_ENV=local\n  # indented\n").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("APP_ENV"), Some("local"));
    }

    #[test]
    fn parse_strips_quotes_export_and_inline_comments() {
        let src = "export APP_NAME=\"My App\"\nSECRET='a#b'\nDEBUG=true # dev only";
        let set = EnvironmentVariableSet::parse(src).unwrap();
        assert_eq!(set.get("APP_NAME"), Some("My App"));
        assert_eq!(set.get("SECRET"), Some("a#b"));
        assert_eq!(set.get("DEBUG"), Some("true"));
    }

    #[test]
    fn parse_keeps_references_verbatim() {
        let set = EnvironmentVariableSet::parse("WP_HOME=http://x.dev\nWP_SITEURL=${WP_HOME}/cms").unwrap();
        assert_eq!(set.get("WP_SITEURL"), Some("${WP_HOME}/cms"));
    }

    #[test]
    fn parse_allows_empty_values() {
        let set = EnvironmentVariableSet::parse("DB_PASSWORD=").unwrap();
        assert_eq!(set.get("DB_PASSWORD"), Some(""));
    }

    #[test]
    fn parse_rejects_lines_without_equals() {
        let err = EnvironmentVariableSet::parse("A=1\nnonsense").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidEnvLine {
                line: 2,
                content: "nonsense".into()
            }
        );
    }

    #[test]
    fn duplicate_keys_keep_first_position() {
        let set = EnvironmentVariableSet::parse("A=1\nB=2\nA=3").unwrap();
        assert_eq!(set.render_with("\n"), "A=3\nB=2");
    }

    #[test]
    fn render_joins_without_trailing_separator() {
        let set: EnvironmentVariableSet = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(set.render_with("\n"), "A=1\nB=2");
        assert_eq!(set.render(), format!("A=1{LINE_ENDING}B=2"));
    }

    #[test]
    fn render_requotes_values_that_need_it() {
        let src = "APP_NAME=\"My App\"\nMAIL_FROM=\"ops #1\"\nGREETING='say \"hi\"'\nMIXED=\"it's \\\"x\\\"\"\nWP_SITEURL=${WP_HOME}/cms";
        let set = EnvironmentVariableSet::parse(src).unwrap();
        assert_eq!(set.get("MIXED"), Some("it's \"x\""));

        let written = set.render_with("\n");
        assert_eq!(
            written,
            "APP_NAME=\"My App\"\nMAIL_FROM=\"ops #1\"\nGREETING='say \"hi\"'\nMIXED=\"it's \\\"x\\\"\"\nWP_SITEURL=${WP_HOME}/cms"
        );

        let reread = EnvironmentVariableSet::parse(&written).unwrap();
        assert_eq!(reread, set);
    }

    #[test]
    fn render_keeps_plain_values_bare() {
        let set: EnvironmentVariableSet = [("DB_PASSWORD", ""), ("APP_URL", "http://acme.dev")]
            .into_iter()
            .collect();
        assert_eq!(set.render_with("\n"), "DB_PASSWORD=\nAPP_URL=http://acme.dev");
    }
}
