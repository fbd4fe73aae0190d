//! Regex masks
//!
//! A mask is a compiled pattern tested against the start of a string.
//! Matching is prefix-anchored: the pattern must match beginning at the first
//! character, but trailing characters after the match are allowed.

use indexmap::IndexMap;
use log::debug;
use regex::Regex;

use crate::error::{Error, Result};

/// Match outcome per unique input string, in first-occurrence order
pub type MaskResults = IndexMap<String, bool>;

/// A validated, prefix-anchored regex pattern
#[derive(Debug, Clone)]
pub struct Mask {
    regex: Regex,
}

impl Mask {
    /// Compile a mask, failing if `pattern` is not a valid regular expression
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self { regex })
    }

    /// Check whether the mask matches at the start of `string`
    #[inline]
    pub fn matches(&self, string: &str) -> bool {
        // Leftmost-first search returns a match at offset 0 whenever one exists
        self.regex.find(string).is_some_and(|m| m.start() == 0)
    }

    /// Apply the mask to every string; duplicates collapse onto one key
    pub fn matches_all<S: AsRef<str>>(&self, strings: &[S]) -> MaskResults {
        let mut results = MaskResults::with_capacity(strings.len());

        for string in strings {
            let string = string.as_ref();
            results.insert(string.to_string(), self.matches(string));
        }

        debug!(
            "Mask '{}' applied to {} strings ({} unique)",
            self.regex.as_str(),
            strings.len(),
            results.len()
        );

        results
    }

    /// Keep only the strings the mask matches, preserving order
    pub fn filter<S: AsRef<str>>(&self, strings: &[S]) -> Vec<String> {
        strings
            .iter()
            .map(|s| s.as_ref())
            .filter(|s: &&str| self.matches(s))
            .map(str::to_string)
            .collect()
    }

    /// The pattern as given by the caller
    pub fn pattern_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Compile `pattern` and test it against the start of `string`
pub fn matches(pattern: &str, string: &str) -> Result<bool> {
    Ok(Mask::new(pattern)?.matches(string))
}

/// Compile `pattern` and test it against each string
pub fn matches_all<S: AsRef<str>>(pattern: &str, strings: &[S]) -> Result<MaskResults> {
    Ok(Mask::new(pattern)?.matches_all(strings))
}
