//! Include/exclude path filtering for assembled difference lists.
//!
//! Patterns are plain substrings, not globs: `*`, `[]` and `$` are accepted
//! for familiarity but stripped before matching. Filtering runs as a
//! post-pass over the orchestrator's difference list, never inside the
//! comparison recursion. When both lists are non-empty the include list wins.
//!
//! # Examples
//!
//! ```
//! use jdiff_rs::filter::PathFilter;
//!
//! let filter = PathFilter::new(&["user.*".to_string()], &[]);
//! assert!(filter.should_include("1.user.name"));
//! assert!(!filter.should_include("1.settings.theme"));
//! ```

use crate::compare::Difference;

/// Compiled include/exclude substring lists.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl PathFilter {
    pub fn new(include_paths: &[String], exclude_paths: &[String]) -> Self {
        Self {
            include: include_paths.iter().map(|p| strip_tokens(p)).collect(),
            exclude: exclude_paths.iter().map(|p| strip_tokens(p)).collect(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.include.is_empty() || !self.exclude.is_empty()
    }

    /// Whether a difference at this path survives filtering. Include wins
    /// over exclude when both lists are set.
    pub fn should_include(&self, path: &str) -> bool {
        if !self.include.is_empty() {
            return self.include.iter().any(|p| path.contains(p.as_str()));
        }
        if !self.exclude.is_empty() {
            return !self.exclude.iter().any(|p| path.contains(p.as_str()));
        }
        true
    }
}

/// Filters a difference list, keeping records whose path satisfies the
/// active rule.
pub fn filter_differences(differences: Vec<Difference>, filter: &PathFilter) -> Vec<Difference> {
    if !filter.is_active() {
        return differences;
    }
    differences
        .into_iter()
        .filter(|difference| filter.should_include(difference.path()))
        .collect()
}

/// Strips the tolerated wildcard tokens (`*`, `[`, `]`, `$`) and surrounding
/// whitespace, leaving the plain substring to match.
fn strip_tokens(pattern: &str) -> String {
    pattern
        .chars()
        .filter(|c| !matches!(c, '*' | '[' | ']' | '$'))
        .collect::<String>()
        .trim()
        .to_string()
}
