//! Comparison orchestration.
//!
//! Matches two entity lists by string-coerced id, runs the value comparator
//! over each matched pair, accumulates unmatched entities as additions or
//! deletions, applies path filtering, and computes the summary. The whole
//! run is a pure synchronous function of its inputs; no state survives the
//! call.

use crate::compare::{compare_values, CompareOptions, Difference};
use crate::extract::Entity;
use crate::filter::{filter_differences, PathFilter};
use crate::tree::Node;
use std::collections::HashMap;

/// A pair of entity payloads matched by id.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedPair {
    pub id: String,
    pub first: Node,
    pub second: Node,
}

/// Difference counts over the final (filtered) difference list. `equal` is
/// the number of matched entity pairs whose comparison produced no
/// differences, counted before filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    pub added: usize,
    pub deleted: usize,
    pub modified: usize,
    pub equal: usize,
    pub total_differences: usize,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.total_differences == 0
    }
}

/// The complete result of one comparison run. Every id present in either
/// entity list lands in exactly one of `matched`, `only_in_first`,
/// `only_in_second`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub matched: Vec<MatchedPair>,
    pub only_in_first: Vec<Entity>,
    pub only_in_second: Vec<Entity>,
    pub differences: Vec<Difference>,
    pub summary: Summary,
}

impl ComparisonResult {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }
}

/// Runs a full comparison over two extracted entity lists.
///
/// Ids are string-coerced before matching. When one list carries the same id
/// more than once, the last entity wins and replaces earlier payloads; this
/// is deliberate, not accidental. Matched payloads are compared with the
/// entity id as the initial path; unmatched entities are reported wholesale
/// at `ID: <id>`.
///
/// # Examples
///
/// ```
/// use jdiff_rs::{run_comparison, CompareOptions, Entity, EntityId, Node};
///
/// let first = vec![Entity { id: EntityId::Number(1.0), data: Node::Number(10.0) }];
/// let second = vec![Entity { id: EntityId::Number(1.0), data: Node::Number(11.0) }];
/// let result = run_comparison(&first, &second, &CompareOptions::default());
///
/// assert_eq!(result.matched.len(), 1);
/// assert_eq!(result.summary.modified, 1);
/// ```
pub fn run_comparison(
    first: &[Entity],
    second: &[Entity],
    options: &CompareOptions,
) -> ComparisonResult {
    let (order_first, by_id_first) = index_entities(first);
    let (order_second, by_id_second) = index_entities(second);

    let mut matched = Vec::new();
    let mut only_in_first = Vec::new();
    let mut only_in_second = Vec::new();
    let mut differences = Vec::new();
    let mut equal = 0;

    for id in &order_first {
        let entity = by_id_first[id];
        match by_id_second.get(id) {
            Some(other) => {
                let pair_differences = compare_values(&entity.data, &other.data, id, options);
                if pair_differences.is_empty() {
                    equal += 1;
                }
                differences.extend(pair_differences);
                matched.push(MatchedPair {
                    id: id.clone(),
                    first: entity.data.clone(),
                    second: other.data.clone(),
                });
            }
            None => {
                differences.push(Difference::Deleted {
                    path: format!("ID: {}", id),
                    value: entity.data.clone(),
                });
                only_in_first.push(entity.clone());
            }
        }
    }

    for id in &order_second {
        if !by_id_first.contains_key(id) {
            let entity = by_id_second[id];
            differences.push(Difference::Added {
                path: format!("ID: {}", id),
                value: entity.data.clone(),
            });
            only_in_second.push(entity.clone());
        }
    }

    let filter = PathFilter::new(&options.include_paths, &options.exclude_paths);
    let differences = filter_differences(differences, &filter);

    let mut summary = count_differences(&differences);
    summary.equal = equal;

    ComparisonResult {
        matched,
        only_in_first,
        only_in_second,
        differences,
        summary,
    }
}

/// Builds the id lookup for one side: ids in first-seen order, with
/// last-write-wins payloads on collision.
fn index_entities(entities: &[Entity]) -> (Vec<String>, HashMap<String, &Entity>) {
    let mut order = Vec::new();
    let mut by_id: HashMap<String, &Entity> = HashMap::new();
    for entity in entities {
        let id = entity.id.to_string();
        if by_id.insert(id.clone(), entity).is_none() {
            order.push(id);
        }
    }
    (order, by_id)
}

fn count_differences(differences: &[Difference]) -> Summary {
    let mut summary = Summary::default();
    for difference in differences {
        match difference {
            Difference::Added { .. } => summary.added += 1,
            Difference::Deleted { .. } => summary.deleted += 1,
            Difference::Modified { .. } => summary.modified += 1,
        }
    }
    summary.total_differences = differences.len();
    summary
}
