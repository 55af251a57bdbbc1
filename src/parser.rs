//! File parsing for JSON, YAML and TOML formats.
//!
//! This module handles parsing structured data files into the document model
//! the engine compares. It supports automatic format detection based on file
//! extension, and falls back to attempting JSON then YAML parsing if the
//! extension is unknown. Parsing is entirely a shell concern: the comparison
//! engine assumes well-formed documents and never sees a `ParseError`.

use crate::error::ParseError;
use crate::tree::Node;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Parses a file into a document Node.
///
/// The format is detected by file extension (.json, .yaml, .yml, .toml). If
/// the extension is unknown or missing, this function will attempt to parse
/// as JSON first, then YAML if JSON fails.
///
/// # Errors
///
/// This function will return an error if:
/// - The file does not exist (`ParseError::FileNotFound`)
/// - The file cannot be read (`ParseError::ReadError`)
/// - The file contains invalid JSON/YAML/TOML (`ParseError::JsonError`,
///   `ParseError::YamlError`, `ParseError::TomlError`)
/// - The file format cannot be determined (`ParseError::UnknownFormat`)
pub fn parse_file(path: &Path) -> Result<Node, ParseError> {
    if !path.exists() {
        return Err(ParseError::file_not_found(
            path.to_string_lossy().to_string(),
        ));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ParseError::read_error(path.to_string_lossy().to_string(), e))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some("json") => parse_json(&content)
            .map_err(|e| ParseError::json_error(path.to_string_lossy().to_string(), e)),
        Some("yaml") | Some("yml") => parse_yaml(&content)
            .map_err(|e| ParseError::yaml_error(path.to_string_lossy().to_string(), e)),
        Some("toml") => parse_toml(&content)
            .map_err(|e| ParseError::toml_error(path.to_string_lossy().to_string(), e)),
        _ => {
            // Try JSON first, then YAML
            parse_json(&content)
                .map_err(|_| ())
                .or_else(|_| parse_yaml(&content).map_err(|_| ()))
                .map_err(|_| ParseError::unknown_format(path.to_string_lossy().to_string()))
        }
    }
}

/// Parses a JSON string into a Node.
///
/// # Examples
///
/// ```
/// use jdiff_rs::parser::parse_json;
///
/// let json = r#"{"name": "Alice", "age": 30}"#;
/// let node = parse_json(json).unwrap();
/// ```
pub fn parse_json(content: &str) -> Result<Node, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    Ok(json_to_node(value))
}

/// Parses a YAML string into a Node.
pub fn parse_yaml(content: &str) -> Result<Node, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(yaml_to_node(value))
}

/// Parses a TOML string into a Node.
pub fn parse_toml(content: &str) -> Result<Node, toml::de::Error> {
    let value: toml::Value = toml::from_str(content)?;
    Ok(toml_to_node(value))
}

fn json_to_node(value: serde_json::Value) -> Node {
    match value {
        serde_json::Value::Null => Node::Null,
        serde_json::Value::Bool(b) => Node::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                Node::Number(f)
            } else {
                Node::Number(0.0)
            }
        }
        serde_json::Value::String(s) => Node::String(s),
        serde_json::Value::Array(arr) => Node::Array(arr.into_iter().map(json_to_node).collect()),
        serde_json::Value::Object(obj) => {
            let map: HashMap<String, Node> =
                obj.into_iter().map(|(k, v)| (k, json_to_node(v))).collect();
            Node::Object(map)
        }
    }
}

/// Converts a serde_yaml::Value to a Node. Anchors and tags are evaluated
/// during parsing; non-string keys are converted to strings.
fn yaml_to_node(value: serde_yaml::Value) -> Node {
    match value {
        serde_yaml::Value::Null => Node::Null,
        serde_yaml::Value::Bool(b) => Node::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                Node::Number(f)
            } else if let Some(i) = n.as_i64() {
                Node::Number(i as f64)
            } else if let Some(u) = n.as_u64() {
                Node::Number(u as f64)
            } else {
                Node::Number(0.0)
            }
        }
        serde_yaml::Value::String(s) => Node::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Node::Array(seq.into_iter().map(yaml_to_node).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let hash_map: HashMap<String, Node> = map
                .into_iter()
                .map(|(k, v)| {
                    let key_str = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        serde_yaml::Value::Null => "null".to_string(),
                        other => format!("{:?}", other),
                    };
                    (key_str, yaml_to_node(v))
                })
                .collect();
            Node::Object(hash_map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_node(tagged.value),
    }
}

/// Converts a toml::Value to a Node. Datetimes become their string form.
fn toml_to_node(value: toml::Value) -> Node {
    match value {
        toml::Value::String(s) => Node::String(s),
        toml::Value::Integer(i) => Node::Number(i as f64),
        toml::Value::Float(f) => Node::Number(f),
        toml::Value::Boolean(b) => Node::Bool(b),
        toml::Value::Datetime(d) => Node::String(d.to_string()),
        toml::Value::Array(arr) => Node::Array(arr.into_iter().map(toml_to_node).collect()),
        toml::Value::Table(table) => {
            let map: HashMap<String, Node> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_node(v)))
                .collect();
            Node::Object(map)
        }
    }
}
