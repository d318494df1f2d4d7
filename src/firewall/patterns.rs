//! Path pattern matching for deny rules
//!
//! Wraps compiled regexes together with their source text, so a redirect can be
//! attributed to the pattern that caused it.

use crate::error::ConfigError;
use regex::Regex;

/// Ordered set of compiled path patterns
#[derive(Debug, Clone, Default)]
pub struct PatternMatcher {
    patterns: Vec<Regex>,
}

impl PatternMatcher {
    /// Compile a list of regex sources, failing on the first invalid one
    pub fn new(patterns: &[String]) -> Result<Self, ConfigError> {
        let mut compiled = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
            compiled.push(regex);
        }

        Ok(Self { patterns: compiled })
    }

    /// Create an empty matcher (matches nothing)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append already compiled patterns, keeping evaluation order
    pub fn extend(&mut self, patterns: impl IntoIterator<Item = Regex>) {
        self.patterns.extend(patterns);
    }

    /// Check if a path matches any pattern
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(path))
    }

    /// Return the source of the first pattern matching `path`
    pub fn find_match(&self, path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.is_match(path))
            .map(Regex::as_str)
    }

    /// Pattern sources in evaluation order
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

impl FromIterator<Regex> for PatternMatcher {
    fn from_iter<I: IntoIterator<Item = Regex>>(iter: I) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PatternMatcher {
    type Item = Regex;
    type IntoIter = std::vec::IntoIter<Regex>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.into_iter()
    }
}
