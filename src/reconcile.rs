//! Array reconciliation strategies.
//!
//! Arrays are compared wholesale: a strategy decides whether two arrays are
//! equal, and an unequal pair is reported as a single modification carrying
//! both arrays. No strategy produces element-level differences.
//!
//! Strategies:
//!
//! - `index` — canonical serializations, positionally; under `ignore-order`
//!   mode the arrays are compared as sets of element serializations instead
//!   (duplicate counts do not matter)
//! - `id` — under `ignore-order` mode, elements are keyed by their
//!   `id`/`_id`/`key` field (falling back to their serialization) and the key
//!   sets are compared; anything else falls back to the order-sensitive
//!   `index` comparison
//! - `hash` — order-independent hash: element serializations, sorted, joined
//! - `best_match` — a length mismatch is an immediate modification; equal
//!   lengths degrade to the `index` strategy

use crate::compare::{ArrayMatching, CompareMode, CompareOptions, Difference};
use crate::tree::Node;
use std::collections::HashSet;

/// Reconciles two arrays under the configured strategy, reporting at most
/// one whole-array difference.
pub fn reconcile_arrays(
    a: &[Node],
    b: &[Node],
    path: &str,
    options: &CompareOptions,
) -> Option<Difference> {
    match options.array_matching {
        ArrayMatching::Index => reconcile_by_index(a, b, path, options),
        ArrayMatching::Id => reconcile_by_id(a, b, path, options),
        ArrayMatching::Hash => reconcile_by_hash(a, b, path),
        ArrayMatching::BestMatch => reconcile_best_match(a, b, path, options),
    }
}

fn reconcile_by_index(
    a: &[Node],
    b: &[Node],
    path: &str,
    options: &CompareOptions,
) -> Option<Difference> {
    if options.mode == CompareMode::IgnoreOrder {
        let set_a: HashSet<String> = a.iter().map(Node::canonical).collect();
        let set_b: HashSet<String> = b.iter().map(Node::canonical).collect();
        if set_a == set_b {
            return None;
        }
    } else if canonical_elements(a) == canonical_elements(b) {
        return None;
    }
    whole_array_modified(a, b, path)
}

fn reconcile_by_id(
    a: &[Node],
    b: &[Node],
    path: &str,
    options: &CompareOptions,
) -> Option<Difference> {
    if options.mode == CompareMode::IgnoreOrder {
        let ids_a: HashSet<String> = a.iter().map(element_identity).collect();
        let ids_b: HashSet<String> = b.iter().map(element_identity).collect();
        if ids_a == ids_b {
            return None;
        }
    }

    // Order-sensitive fallback, same as the index strategy
    if canonical_elements(a) == canonical_elements(b) {
        return None;
    }
    whole_array_modified(a, b, path)
}

fn reconcile_by_hash(a: &[Node], b: &[Node], path: &str) -> Option<Difference> {
    if order_independent_hash(a) == order_independent_hash(b) {
        return None;
    }
    whole_array_modified(a, b, path)
}

/// Stub strategy: no pairing is attempted. A length mismatch short-circuits;
/// equal lengths degrade to the index strategy.
fn reconcile_best_match(
    a: &[Node],
    b: &[Node],
    path: &str,
    options: &CompareOptions,
) -> Option<Difference> {
    if a.len() != b.len() {
        return whole_array_modified(a, b, path);
    }
    reconcile_by_index(a, b, path, options)
}

/// Identity key for id-based matching: the element's `id`, `_id` or `key`
/// field (first non-null hit), or its full serialization.
fn element_identity(item: &Node) -> String {
    if let Node::Object(map) = item {
        for field in ["id", "_id", "key"] {
            if let Some(value) = map.get(field) {
                if !matches!(value, Node::Null) {
                    return value.canonical();
                }
            }
        }
    }
    item.canonical()
}

/// Order-independent hash of an array: serialize each element, sort, rejoin.
/// Unlike set comparison this keeps duplicate counts significant.
fn order_independent_hash(items: &[Node]) -> String {
    let mut parts: Vec<String> = items.iter().map(Node::canonical).collect();
    parts.sort();
    format!("[{}]", parts.join(","))
}

fn canonical_elements(items: &[Node]) -> String {
    let parts: Vec<String> = items.iter().map(Node::canonical).collect();
    format!("[{}]", parts.join(","))
}

fn whole_array_modified(a: &[Node], b: &[Node], path: &str) -> Option<Difference> {
    Some(Difference::Modified {
        path: path.to_string(),
        old_value: Node::Array(a.to_vec()),
        new_value: Node::Array(b.to_vec()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Vec<Node> {
        values.iter().map(|n| Node::Number(*n)).collect()
    }

    fn options(matching: ArrayMatching, mode: CompareMode) -> CompareOptions {
        CompareOptions {
            array_matching: matching,
            mode,
            ..Default::default()
        }
    }

    #[test]
    fn test_index_equal_arrays() {
        let opts = options(ArrayMatching::Index, CompareMode::Exact);
        let a = numbers(&[1.0, 2.0, 3.0]);
        assert!(reconcile_arrays(&a, &a.clone(), "items", &opts).is_none());
    }

    #[test]
    fn test_index_order_sensitive() {
        let opts = options(ArrayMatching::Index, CompareMode::Exact);
        let a = numbers(&[1.0, 2.0, 3.0]);
        let b = numbers(&[3.0, 2.0, 1.0]);
        let diff = reconcile_arrays(&a, &b, "items", &opts).unwrap();
        assert_eq!(diff.path(), "items");
        assert!(matches!(diff, Difference::Modified { .. }));
    }

    #[test]
    fn test_index_ignore_order_set_equality() {
        let opts = options(ArrayMatching::Index, CompareMode::IgnoreOrder);
        let a = numbers(&[1.0, 2.0, 3.0]);
        let b = numbers(&[3.0, 2.0, 1.0]);
        assert!(reconcile_arrays(&a, &b, "items", &opts).is_none());
    }

    #[test]
    fn test_index_ignore_order_is_multiplicity_insensitive() {
        let opts = options(ArrayMatching::Index, CompareMode::IgnoreOrder);
        let a = numbers(&[1.0, 1.0, 2.0]);
        let b = numbers(&[1.0, 2.0, 2.0]);
        // Same distinct elements, different counts: still equal as sets
        assert!(reconcile_arrays(&a, &b, "items", &opts).is_none());
    }

    #[test]
    fn test_index_reports_whole_arrays() {
        let opts = options(ArrayMatching::Index, CompareMode::Exact);
        let a = numbers(&[1.0]);
        let b = numbers(&[2.0]);
        match reconcile_arrays(&a, &b, "items", &opts).unwrap() {
            Difference::Modified {
                old_value,
                new_value,
                ..
            } => {
                assert_eq!(old_value, Node::Array(a));
                assert_eq!(new_value, Node::Array(b));
            }
            other => panic!("Expected Modified, got {:?}", other),
        }
    }

    #[test]
    fn test_id_strategy_matches_by_id_field() {
        let opts = options(ArrayMatching::Id, CompareMode::IgnoreOrder);
        let mut x = std::collections::HashMap::new();
        x.insert("id".to_string(), Node::Number(1.0));
        x.insert("name".to_string(), Node::String("a".to_string()));
        let mut y = std::collections::HashMap::new();
        y.insert("id".to_string(), Node::Number(1.0));
        y.insert("name".to_string(), Node::String("b".to_string()));

        // Same id set: equal, payload contents are not inspected
        let a = vec![Node::Object(x)];
        let b = vec![Node::Object(y)];
        assert!(reconcile_arrays(&a, &b, "items", &opts).is_none());
    }

    #[test]
    fn test_id_strategy_underscore_id_and_key_fallbacks() {
        let opts = options(ArrayMatching::Id, CompareMode::IgnoreOrder);
        let mut x = std::collections::HashMap::new();
        x.insert("_id".to_string(), Node::String("m".to_string()));
        let mut y = std::collections::HashMap::new();
        y.insert("key".to_string(), Node::String("m".to_string()));

        // "m" via _id on one side and via key on the other: same identity
        let a = vec![Node::Object(x)];
        let b = vec![Node::Object(y)];
        assert!(reconcile_arrays(&a, &b, "items", &opts).is_none());
    }

    #[test]
    fn test_id_strategy_different_ids() {
        let opts = options(ArrayMatching::Id, CompareMode::IgnoreOrder);
        let mut x = std::collections::HashMap::new();
        x.insert("id".to_string(), Node::Number(1.0));
        let mut y = std::collections::HashMap::new();
        y.insert("id".to_string(), Node::Number(2.0));

        let a = vec![Node::Object(x)];
        let b = vec![Node::Object(y)];
        assert!(reconcile_arrays(&a, &b, "items", &opts).is_some());
    }

    #[test]
    fn test_id_strategy_order_sensitive_outside_ignore_order() {
        let opts = options(ArrayMatching::Id, CompareMode::Exact);
        let a = numbers(&[1.0, 2.0]);
        let b = numbers(&[2.0, 1.0]);
        assert!(reconcile_arrays(&a, &b, "items", &opts).is_some());
        assert!(reconcile_arrays(&a, &a.clone(), "items", &opts).is_none());
    }

    #[test]
    fn test_hash_strategy_order_independent() {
        let opts = options(ArrayMatching::Hash, CompareMode::Exact);
        let a = numbers(&[1.0, 2.0, 3.0]);
        let b = numbers(&[3.0, 1.0, 2.0]);
        assert!(reconcile_arrays(&a, &b, "items", &opts).is_none());
    }

    #[test]
    fn test_hash_strategy_keeps_duplicate_counts() {
        let opts = options(ArrayMatching::Hash, CompareMode::Exact);
        let a = numbers(&[1.0, 1.0, 2.0]);
        let b = numbers(&[1.0, 2.0, 2.0]);
        assert!(reconcile_arrays(&a, &b, "items", &opts).is_some());
    }

    #[test]
    fn test_best_match_length_mismatch_short_circuits() {
        let opts = options(ArrayMatching::BestMatch, CompareMode::IgnoreOrder);
        let a = numbers(&[1.0, 2.0]);
        let b = numbers(&[1.0, 2.0, 3.0]);
        assert!(reconcile_arrays(&a, &b, "items", &opts).is_some());
    }

    #[test]
    fn test_best_match_equal_lengths_degrade_to_index() {
        let opts = options(ArrayMatching::BestMatch, CompareMode::IgnoreOrder);
        let a = numbers(&[1.0, 2.0, 3.0]);
        let b = numbers(&[3.0, 2.0, 1.0]);
        assert!(reconcile_arrays(&a, &b, "items", &opts).is_none());

        let opts = options(ArrayMatching::BestMatch, CompareMode::Exact);
        assert!(reconcile_arrays(&a, &b, "items", &opts).is_some());
    }

    #[test]
    fn test_element_identity_serialization_fallback() {
        assert_eq!(element_identity(&Node::Number(1.0)), "1");
        let mut map = std::collections::HashMap::new();
        map.insert("name".to_string(), Node::String("x".to_string()));
        let identity = element_identity(&Node::Object(map));
        assert!(identity.contains("name"));
    }

    #[test]
    fn test_element_identity_skips_null_id() {
        let mut map = std::collections::HashMap::new();
        map.insert("id".to_string(), Node::Null);
        map.insert("key".to_string(), Node::String("k".to_string()));
        assert_eq!(element_identity(&Node::Object(map)), "\"k\"");
    }
}
