//! Directory exclusion patterns.
//!
//! A directory is excluded when its vault-relative path contains a pattern
//! anywhere, or when its base name is exactly the pattern. The substring
//! rule means `arch` also excludes `research/archive` and `march`; this is
//! the established behavior and the tests pin it.

use crate::path::DirectoryPath;

/// Ordered set of user-supplied exclusion patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    patterns: Vec<String>,
}

impl ExclusionSet {
    /// Builds a set from the given patterns, dropping duplicates while
    /// keeping first-seen order.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for pattern in patterns {
            let pattern = pattern.into();
            if !set.patterns.contains(&pattern) {
                set.patterns.push(pattern);
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns the first pattern that excludes `dir`, if any.
    ///
    /// The root is never excluded.
    pub fn matching_pattern(&self, dir: &DirectoryPath) -> Option<&str> {
        let base = dir.base_name()?;
        self.patterns
            .iter()
            .find(|pattern| dir.as_str().contains(pattern.as_str()) || base == pattern.as_str())
            .map(String::as_str)
    }

    pub fn excludes(&self, dir: &DirectoryPath) -> bool {
        self.matching_pattern(dir).is_some()
    }
}
