//! Naming patterns.
//! A pattern is the pair of strings surrounding the running index in every
//! file name of a set: `prefix<index>suffix[.type]`. The `*` placeholder
//! stands for the index in user input and display output.

use regex::Regex;
use std::fmt;

use crate::errors::{FileSetError, Result};

/// Placeholder character standing for the running index.
pub const INDEX_INDICATOR: char = '*';

/// Prefix/suffix pair with the compiled matcher for fitting file names.
#[derive(Debug, Clone)]
pub struct Pattern {
    prefix: String,
    suffix: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let suffix = suffix.into();
        let regex = Regex::new(&format!(
            r"^{}(\d+){}(?:\.(.+))?$",
            regex::escape(&prefix),
            regex::escape(&suffix)
        ))
        .expect("escaped pattern text is a valid regex");

        Self {
            prefix,
            suffix,
            regex,
        }
    }

    /// Parse a user-supplied pattern string such as `page (*)`.
    ///
    /// Exactly one un-escaped `*` must be present; `\*` is a literal asterisk
    /// and `\\` a literal backslash.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || FileSetError::InvalidPattern {
            pattern: raw.to_string(),
        };

        let mut sides: Vec<String> = vec![String::new()];
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(esc @ ('\\' | INDEX_INDICATOR)) => {
                        sides.last_mut().expect("never empty").push(esc)
                    }
                    Some(other) => {
                        // A lone backslash before anything else is kept as-is.
                        let side = sides.last_mut().expect("never empty");
                        side.push('\\');
                        side.push(other);
                    }
                    None => sides.last_mut().expect("never empty").push('\\'),
                },
                INDEX_INDICATOR => sides.push(String::new()),
                other => sides.last_mut().expect("never empty").push(other),
            }
        }

        match <[String; 2]>::try_from(sides) {
            Ok([prefix, suffix]) => Ok(Self::new(prefix, suffix)),
            Err(_) => Err(invalid()),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Physical file name for an (index, type) pair of this pattern.
    pub fn name(&self, index: i64, file_type: &str) -> String {
        if file_type.is_empty() {
            format!("{}{}{}", self.prefix, index, self.suffix)
        } else {
            format!("{}{}{}.{}", self.prefix, index, self.suffix, file_type)
        }
    }

    /// Match a file name against this pattern, yielding its index and type.
    pub fn match_name(&self, file_name: &str) -> Option<(i64, String)> {
        let caps = self.regex.captures(file_name)?;
        let index: i64 = caps.get(1)?.as_str().parse().ok()?;
        let file_type = caps.get(2).map(|m| m.as_str()).unwrap_or("").to_string();
        Some((index, file_type))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix && self.suffix == other.suffix
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, INDEX_INDICATOR, self.suffix)
    }
}

/// Extension of a file name: everything after the first dot that is not the
/// leading character (so hidden files without a further dot have no type).
pub fn file_type_of(file_name: &str) -> &str {
    match file_name
        .char_indices()
        .find(|&(i, c)| c == '.' && i > 0)
    {
        Some((i, _)) => &file_name[i + 1..],
        None => "",
    }
}
