//! Exclusion filter
//!
//! Paths matching an exclusion pattern never enter the gate: static
//! assets, the auth endpoints themselves, public error pages, and the
//! public validation and password-recovery API endpoints. The router
//! integration applies this filter before invoking the gate.
//!
//! Getting the list wrong cuts both ways: under-exclusion makes
//! unauthenticated infrastructure requests block on a session check they
//! can never satisfy, over-exclusion bypasses the gate for a path that
//! should be protected. Patterns are validated at startup.

use crate::error::ConfigError;
use regex::Regex;

/// Compiled exclusion filter
#[derive(Debug)]
pub struct ExclusionFilter {
    patterns: Vec<CompiledPattern>,
}

#[derive(Debug)]
struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl ExclusionFilter {
    /// Compile a list of regex patterns into a filter
    pub fn new(patterns: &[String]) -> Result<Self, ConfigError> {
        let mut compiled = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;

            compiled.push(CompiledPattern {
                source: pattern.clone(),
                regex,
            });
        }

        Ok(Self { patterns: compiled })
    }

    /// Create an empty filter (excludes nothing, every path enters the gate)
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Check if a request path is excluded from the gate
    pub fn is_excluded(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.regex.is_match(path))
    }

    /// Check if a path is excluded, returning the matching pattern
    pub fn find_match(&self, path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(path))
            .map(|p| p.source.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::empty()
    }
}
