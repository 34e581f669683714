use crate::error::{IsoListError, Result};
use regex::Regex;

/// Shell-style file name pattern: `*` matches any run of characters (including
/// none), `?` exactly one. Everything else matches literally and case-sensitively.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    pattern: String,
    regex: Regex,
    wildcards: usize,
}

impl WildcardPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let mut source = String::from("(?s)^");
        let mut literal = String::new();
        let mut wildcards = 0;

        for ch in pattern.chars() {
            match ch {
                '*' | '?' => {
                    source.push_str(&regex::escape(&literal));
                    literal.clear();
                    source.push_str(if ch == '*' { "(.*)" } else { "(.)" });
                    wildcards += 1;
                }
                _ => literal.push(ch),
            }
        }
        source.push_str(&regex::escape(&literal));
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| IsoListError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            wildcards,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// A pattern without wildcards names exactly one file.
    pub fn is_literal(&self) -> bool {
        self.wildcards == 0
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The text the wildcards matched in `name`, joined by `/`, or `None` when
    /// `name` does not match.
    pub fn captured(&self, name: &str) -> Option<String> {
        let caps = self.regex.captures(name)?;
        let parts: Vec<&str> = caps
            .iter()
            .skip(1)
            .map(|m| m.map_or("", |m| m.as_str()))
            .collect();
        Some(parts.join("/"))
    }
}

impl std::fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pattern)
    }
}
