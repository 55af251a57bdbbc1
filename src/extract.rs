//! Entity extraction by identifier path.
//!
//! Before two documents are compared, each is broken into a list of
//! identifiable entities that the engine matches pairwise. An identifier path
//! expression names where the entities live and which field carries their id:
//!
//! - `""` or `"id"` — the document is itself an array of objects keyed by
//!   their `id` field, or a single object carrying one
//! - `"users[].id"` — traverse to `users`, which must be an array, and key
//!   each element object by its `id` field
//! - `"data.items.sku"` — the prefix locates the target (an array or a single
//!   object), the final segment names the id field
//!
//! Elements without a usable id are dropped silently; extraction only fails
//! when the declared array segment is not an array, or when nothing with an
//! id remains.
//!
//! # Examples
//!
//! ```
//! use jdiff_rs::{extract_entities, parser::parse_json};
//!
//! let doc = parse_json(r#"{"users": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]}"#).unwrap();
//! let entities = extract_entities(&doc, "users[].id").unwrap();
//! assert_eq!(entities.len(), 2);
//! assert_eq!(entities[0].id.to_string(), "1");
//! ```

use crate::error::ExtractError;
use crate::tree::{format_number, Node};
use std::fmt;

/// Match key of an extracted entity. Only strings and numbers qualify; any
/// other id value means the element carries no id.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityId {
    Text(String),
    Number(f64),
}

impl EntityId {
    fn from_node(node: &Node) -> Option<EntityId> {
        match node {
            Node::String(s) => Some(EntityId::Text(s.clone())),
            Node::Number(n) => Some(EntityId::Number(*n)),
            _ => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Text(s) => f.write_str(s),
            EntityId::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

/// A unit extracted from a document for pairwise matching.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub data: Node,
}

/// Extracts the entities named by an identifier path expression.
///
/// # Errors
///
/// Fails with `ExtractError` when the expression's declared array segment
/// does not resolve to an array, when the target is not an object or array
/// of objects, or when zero elements carry a usable id.
pub fn extract_entities(document: &Node, id_path: &str) -> Result<Vec<Entity>, ExtractError> {
    let expr = id_path.trim();

    if expr.is_empty() || expr == "id" {
        return extract_with_field(document, "id", "(root)", expr);
    }

    if let Some((array_path, rest)) = expr.split_once("[]") {
        let id_field = rest.strip_prefix('.').unwrap_or(rest);
        let id_field = if id_field.is_empty() { "id" } else { id_field };

        let target = resolve_path(document, array_path);
        return match target {
            Some(Node::Array(items)) => collect_from_items(items, id_field, expr),
            _ => Err(ExtractError::not_an_array(array_path)),
        };
    }

    // Plain dotted path: the final segment names the id field, the prefix
    // locates the target.
    let (prefix, id_field) = match expr.rsplit_once('.') {
        Some((prefix, field)) => (prefix, field),
        None => ("", expr),
    };
    let display_path = if prefix.is_empty() { "(root)" } else { prefix };
    extract_with_field(
        resolve_path(document, prefix).unwrap_or(&Node::Null),
        id_field,
        display_path,
        expr,
    )
}

/// Extraction rule shared by the default and dotted forms: arrays yield one
/// entity per object element, a single object yields one entity.
fn extract_with_field(
    target: &Node,
    id_field: &str,
    display_path: &str,
    expr: &str,
) -> Result<Vec<Entity>, ExtractError> {
    match target {
        Node::Array(items) => collect_from_items(items, id_field, expr),
        Node::Object(_) => {
            let id = resolve_path(target, id_field).and_then(EntityId::from_node);
            match id {
                Some(id) => Ok(vec![Entity {
                    id,
                    data: target.clone(),
                }]),
                None => Err(ExtractError::no_usable_ids(expr)),
            }
        }
        _ => Err(ExtractError::no_objects(display_path)),
    }
}

fn collect_from_items(
    items: &[Node],
    id_field: &str,
    expr: &str,
) -> Result<Vec<Entity>, ExtractError> {
    let mut entities = Vec::new();
    for item in items {
        if !matches!(item, Node::Object(_)) {
            continue;
        }
        if let Some(id) = resolve_path(item, id_field).and_then(EntityId::from_node) {
            entities.push(Entity {
                id,
                data: item.clone(),
            });
        }
    }

    if entities.is_empty() {
        return Err(ExtractError::no_usable_ids(expr));
    }
    Ok(entities)
}

/// Dotted traversal from a node. A missing key at any step resolves the whole
/// path to nothing; there is no partial match. The empty path resolves to the
/// node itself.
fn resolve_path<'a>(node: &'a Node, path: &str) -> Option<&'a Node> {
    let mut current = node;
    for segment in path.split('.') {
        if segment.is_empty() {
            continue;
        }
        match current {
            Node::Object(map) => current = map.get(segment)?,
            _ => return None,
        }
    }
    Some(current)
}
