//! Glob pattern matching for package paths.
//!
//! Paths are slash-separated and relative to the module root, with no
//! leading slash. `*` matches within one segment, `**` crosses segments.
//! Callers supply already-normalized paths; no `.`/`..` handling here.

use std::fmt;

/// Match options: `*` must not cross `/`, matching is case-sensitive.
const OPTIONS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A validated glob pattern for package path matching.
///
/// The glob is compiled once at construction and reused for all match calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    compiled: glob::Pattern,
}

impl PathPattern {
    /// Creates a new path pattern.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is empty or has invalid glob syntax.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        let compiled = glob::Pattern::new(pattern).map_err(|e| PatternError::Invalid {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: pattern.to_string(),
            compiled,
        })
    }

    /// Tests whether a package path matches this pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        if self.compiled.matches_with(path, OPTIONS) {
            return true;
        }
        // `dir/**` must cover everything below `dir`. The glob crate gets
        // the common cases right; check the prefix + boundary as well so a
        // trailing globstar never misses a descendant.
        if let Some(prefix) = self.raw.strip_suffix("/**") {
            let normalized = prefix.trim_end_matches('/');
            if path.starts_with(normalized)
                && path
                    .as_bytes()
                    .get(normalized.len())
                    .is_some_and(|&b| b == b'/')
            {
                return true;
            }
        }
        false
    }

    /// Returns the pattern as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Errors in pattern construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PatternError {
    /// Pattern is empty.
    #[error("path pattern must not be empty")]
    Empty,

    /// Pattern has invalid glob syntax.
    #[error("invalid path pattern `{pattern}`: {reason}")]
    Invalid {
        /// The invalid pattern.
        pattern: String,
        /// Why it's invalid.
        reason: String,
    },
}
