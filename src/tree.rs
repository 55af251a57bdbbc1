//! Document model for structured data.

use std::collections::HashMap;

/// A node representing a value in a structured document (JSON, YAML, TOML).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(HashMap<String, Node>),
    Array(Vec<Node>),
}

impl Node {
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::Object(_) => "object",
            Node::Array(_) => "array",
        }
    }

    /// Deterministic serialization with sorted object keys.
    ///
    /// Two nodes serialize identically exactly when they hold the same data,
    /// regardless of key insertion order. Used as the equality and hashing
    /// instrument for array reconciliation; never shown to users.
    pub fn canonical(&self) -> String {
        match self {
            Node::Null => "null".to_string(),
            Node::Bool(b) => b.to_string(),
            Node::Number(n) => format_number(*n),
            Node::String(s) => format!("{:?}", s),
            Node::Array(arr) => {
                let items: Vec<String> = arr.iter().map(Node::canonical).collect();
                format!("[{}]", items.join(","))
            }
            Node::Object(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                let entries: Vec<String> = keys
                    .iter()
                    .map(|k| format!("{:?}:{}", k, map[*k].canonical()))
                    .collect();
                format!("{{{}}}", entries.join(","))
            }
        }
    }

    /// Unquoted text form of a primitive, for loose string-coerced equality.
    /// Containers fall back to their canonical form.
    pub fn coerced_string(&self) -> String {
        match self {
            Node::Null => "null".to_string(),
            Node::Bool(b) => b.to_string(),
            Node::Number(n) => format_number(*n),
            Node::String(s) => s.clone(),
            Node::Object(_) | Node::Array(_) => self.canonical(),
        }
    }

    /// Returns a short preview of the node's value, truncated to max_len.
    pub fn preview(&self, max_len: usize) -> String {
        let preview = match self {
            Node::Null => "null".to_string(),
            Node::Bool(b) => b.to_string(),
            Node::Number(n) => format_number(*n),
            Node::String(s) => format!("\"{}\"", s),
            Node::Object(map) => {
                let count = map.len();
                if count == 0 {
                    "{}".to_string()
                } else if count == 1 {
                    format!("{{ {} key }}", count)
                } else {
                    format!("{{ {} keys }}", count)
                }
            }
            Node::Array(arr) => {
                let count = arr.len();
                if count == 0 {
                    "[]".to_string()
                } else if count == 1 {
                    format!("[ {} item ]", count)
                } else {
                    format!("[ {} items ]", count)
                }
            }
        };

        if preview.len() > max_len {
            format!("{}...", &preview[..max_len.saturating_sub(3)])
        } else {
            preview
        }
    }

    /// Converts this node to a serde_json::Value for export.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Node::Null => serde_json::Value::Null,
            Node::Bool(b) => serde_json::Value::Bool(*b),
            Node::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Node::String(s) => serde_json::Value::String(s.clone()),
            Node::Array(arr) => serde_json::Value::Array(arr.iter().map(Node::to_json).collect()),
            Node::Object(map) => {
                let obj: serde_json::Map<String, serde_json::Value> =
                    map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect();
                serde_json::Value::Object(obj)
            }
        }
    }
}

/// Formats a number the way previews and coercions expect: whole values
/// without a trailing fraction, everything else as-is.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
