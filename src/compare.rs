//! Recursive value comparison.
//!
//! This module implements the heart of the engine: comparing two document
//! values under the active options and producing difference records. The
//! comparison walks an ordered decision tree; the first step that applies
//! decides the outcome for the pair of values at hand:
//!
//! 1. both null → equal
//! 2. exactly one side null → modified
//! 3. timestamp suppression (`ignore_timestamps`) by final path segment
//! 4. numeric tolerance (`numeric_tolerance`)
//! 5. `type` mode: type names only, values are never inspected
//! 6. both arrays → delegated to the array reconciler
//! 7. both objects → key-union recursion
//! 8. primitive fallback with case and string-normalization rules
//!
//! Difference records always carry the raw operands, even when a normalized
//! form decided the equality.
//!
//! # Examples
//!
//! ```
//! use jdiff_rs::{compare_values, CompareOptions, Node};
//!
//! let old = Node::Number(42.0);
//! let new = Node::Number(43.0);
//! let diffs = compare_values(&old, &new, "answer", &CompareOptions::default());
//!
//! assert_eq!(diffs.len(), 1);
//! assert_eq!(diffs[0].path(), "answer");
//! ```

use crate::reconcile::reconcile_arrays;
use crate::tree::Node;
use std::collections::HashMap;

/// Overall comparison semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareMode {
    /// Values must match exactly (subject to normalization options)
    #[default]
    Exact,
    /// Only value types are compared, never their contents
    Type,
    /// Array element order is ignored
    IgnoreOrder,
}

/// How arrays are reconciled. Every strategy reports at most one difference
/// per array, carrying the whole arrays as old/new; there is no element-level
/// array diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayMatching {
    /// Compare canonical serializations positionally (default)
    #[default]
    Index,
    /// Match elements by an `id`/`_id`/`key` field when order is ignored
    Id,
    /// Compare order-independent canonical hashes
    Hash,
    /// Length check, then degrade to `Index`
    BestMatch,
}

/// Immutable configuration consumed by the comparator and reconciler.
///
/// Constructed once per comparison (typically from CLI flags) and threaded by
/// reference through every engine call.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Overall comparison semantics
    pub mode: CompareMode,
    /// Array reconciliation strategy
    pub array_matching: ArrayMatching,
    /// Trim and lowercase both operands before string equality
    pub normalize_strings: bool,
    /// Suppress differences at paths whose last segment looks timestamp-like
    pub ignore_timestamps: bool,
    /// Informational only: object keys are always compared as sets
    pub ignore_key_order: bool,
    /// Two numbers are equal if their absolute difference is within this
    pub numeric_tolerance: f64,
    /// Allow-list of path substrings (wins over exclude_paths when both set)
    pub include_paths: Vec<String>,
    /// Deny-list of path substrings
    pub exclude_paths: Vec<String>,
    /// String equality case sensitivity for primitives
    pub case_sensitive: bool,
    /// Keys present only in the first document are not reported as deletions
    pub ignore_extra_keys: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            mode: CompareMode::Exact,
            array_matching: ArrayMatching::Index,
            normalize_strings: false,
            ignore_timestamps: false,
            ignore_key_order: true,
            numeric_tolerance: 0.0,
            include_paths: Vec::new(),
            exclude_paths: Vec::new(),
            case_sensitive: true,
            ignore_extra_keys: false,
        }
    }
}

/// One reported discrepancy between the two documents at a given path.
///
/// Equality is never materialized: the absence of a record at a path means
/// the values there are equal.
#[derive(Debug, Clone, PartialEq)]
pub enum Difference {
    /// Present only in the second document
    Added { path: String, value: Node },
    /// Present only in the first document
    Deleted { path: String, value: Node },
    /// Present in both with different values
    Modified {
        path: String,
        old_value: Node,
        new_value: Node,
    },
}

impl Difference {
    /// Dotted path locating the difference, stable for filtering and search.
    pub fn path(&self) -> &str {
        match self {
            Difference::Added { path, .. }
            | Difference::Deleted { path, .. }
            | Difference::Modified { path, .. } => path,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Difference::Added { .. } => "added",
            Difference::Deleted { .. } => "deleted",
            Difference::Modified { .. } => "modified",
        }
    }
}

/// Compares two values and returns the differences between them.
///
/// An empty result means the values are equal under the active options. The
/// initial path seeds every reported difference path; pass the entity id when
/// comparing matched entity payloads, or an empty string for bare documents.
///
/// # Examples
///
/// ```
/// use jdiff_rs::{compare_values, CompareOptions, parser::parse_json};
///
/// let old = parse_json(r#"{"x": 1}"#).unwrap();
/// let new = parse_json(r#"{"x": 2}"#).unwrap();
/// let diffs = compare_values(&old, &new, "", &CompareOptions::default());
///
/// assert_eq!(diffs.len(), 1);
/// assert_eq!(diffs[0].path(), "x");
/// ```
pub fn compare_values(
    a: &Node,
    b: &Node,
    path: &str,
    options: &CompareOptions,
) -> Vec<Difference> {
    let mut differences = Vec::new();
    diff_values(a, b, path, &mut differences, options);
    differences
}

/// Core recursive comparison. Each step short-circuits; see the module docs
/// for the full ordering.
fn diff_values(
    a: &Node,
    b: &Node,
    path: &str,
    differences: &mut Vec<Difference>,
    options: &CompareOptions,
) {
    // Null handling comes first: a single-sided null is always a
    // modification, even at suppressed timestamp paths.
    match (a, b) {
        (Node::Null, Node::Null) => return,
        (Node::Null, _) | (_, Node::Null) => {
            differences.push(Difference::Modified {
                path: path.to_string(),
                old_value: a.clone(),
                new_value: b.clone(),
            });
            return;
        }
        _ => {}
    }

    if options.ignore_timestamps && is_timestamp_segment(last_segment(path)) {
        return;
    }

    if options.numeric_tolerance > 0.0 {
        if let (Node::Number(x), Node::Number(y)) = (a, b) {
            if (x - y).abs() <= options.numeric_tolerance {
                return;
            }
        }
    }

    // Type mode compares type names and stops: matching types are equal
    // regardless of value, mismatches render as "<type>: <value>" strings.
    if options.mode == CompareMode::Type {
        if a.type_name() != b.type_name() {
            differences.push(Difference::Modified {
                path: path.to_string(),
                old_value: Node::String(format!("{}: {}", a.type_name(), a.canonical())),
                new_value: Node::String(format!("{}: {}", b.type_name(), b.canonical())),
            });
        }
        return;
    }

    if let (Node::Array(x), Node::Array(y)) = (a, b) {
        if let Some(difference) = reconcile_arrays(x, y, path, options) {
            differences.push(difference);
        }
        return;
    }

    if let (Node::Object(x), Node::Object(y)) = (a, b) {
        diff_objects(x, y, path, differences, options);
        return;
    }

    // Primitive fallback. Mixed shapes (array vs scalar, object vs array)
    // land here too and produce a whole-value modification.
    if !primitives_equal(a, b, options) {
        differences.push(Difference::Modified {
            path: path.to_string(),
            old_value: a.clone(),
            new_value: b.clone(),
        });
    }
}

/// Compares two objects over the union of their key sets. Keys are walked in
/// sorted order so repeated runs produce identical results.
fn diff_objects(
    a: &HashMap<String, Node>,
    b: &HashMap<String, Node>,
    path: &str,
    differences: &mut Vec<Difference>,
    options: &CompareOptions,
) {
    let mut keys: Vec<&String> = a.keys().chain(b.keys()).collect();
    keys.sort();
    keys.dedup();

    for key in keys {
        let child_path = join_path(path, key);
        match (a.get(key), b.get(key)) {
            (Some(value), None) => {
                if !options.ignore_extra_keys {
                    differences.push(Difference::Deleted {
                        path: child_path,
                        value: value.clone(),
                    });
                }
            }
            (None, Some(value)) => {
                differences.push(Difference::Added {
                    path: child_path,
                    value: value.clone(),
                });
            }
            (Some(old), Some(new)) => {
                diff_values(old, new, &child_path, differences, options);
            }
            (None, None) => unreachable!("key came from the union of both maps"),
        }
    }
}

fn primitives_equal(a: &Node, b: &Node, options: &CompareOptions) -> bool {
    if options.normalize_strings {
        if let (Node::String(x), Node::String(y)) = (a, b) {
            return x.trim().to_lowercase() == y.trim().to_lowercase();
        }
    }

    if options.case_sensitive {
        a == b
    } else {
        a.coerced_string().to_lowercase() == b.coerced_string().to_lowercase()
    }
}

/// Appends a key to a dotted path.
pub(crate) fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Whether a path segment names a timestamp-like field: `timestamp`, `date`,
/// `time`, or a `created`/`updated`/`modified` prefix ending in `at`
/// (`createdAt`, `updated_at`, ...). Case-insensitive.
fn is_timestamp_segment(segment: &str) -> bool {
    let segment = segment.to_lowercase();
    if segment == "timestamp" || segment == "date" || segment == "time" {
        return true;
    }
    ["created", "updated", "modified"]
        .iter()
        .any(|prefix| match segment.strip_prefix(prefix) {
            Some(rest) => rest.ends_with("at"),
            None => false,
        })
}
