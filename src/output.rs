//! Output formatting for comparison results.
//!
//! Renders a `ComparisonResult` in the supported output formats (colored
//! terminal, plain text, JSON, HTML, CSV, Markdown). Formatting only reads
//! the result; it never constructs differences or summaries of its own.
//!
//! # Examples
//!
//! ```
//! use jdiff_rs::{run_comparison, format_result, CompareOptions, OutputFormat, OutputOptions};
//! use jdiff_rs::{Entity, EntityId, Node};
//!
//! let first = vec![Entity { id: EntityId::Number(1.0), data: Node::Number(1.0) }];
//! let second = vec![Entity { id: EntityId::Number(1.0), data: Node::Number(2.0) }];
//! let result = run_comparison(&first, &second, &CompareOptions::default());
//!
//! let output = format_result(&result, &OutputFormat::Plain, &OutputOptions::default()).unwrap();
//! assert!(output.contains("1"));
//! ```

use crate::compare::Difference;
use crate::engine::{ComparisonResult, Summary};
use crate::error::OutputError;
use colored::*;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// Plain text, no colors (suitable for piping)
    Plain,
    /// JSON representation of the full result
    Json,
    /// Standalone HTML document with a difference table
    Html,
    /// CSV rows, one per difference
    Csv,
    /// Markdown difference table
    Markdown,
}

/// Options for controlling output formatting.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Maximum length for displayed values (truncate if longer)
    pub max_value_length: usize,
    /// List matched entity ids in terminal/plain output
    pub show_matched: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            max_value_length: 80,
            show_matched: false,
        }
    }
}

/// Formats a comparison result according to the specified format and options.
pub fn format_result(
    result: &ComparisonResult,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => Ok(format_terminal(result, options)),
        OutputFormat::Plain => Ok(format_plain(result, options)),
        OutputFormat::Json => format_json(result),
        OutputFormat::Html => Ok(format_html(result, options)),
        OutputFormat::Csv => Ok(format_csv(result, options)),
        OutputFormat::Markdown => Ok(format_markdown(result, options)),
    }
}

/// Colored terminal rendering. Additions are green, deletions red,
/// modifications yellow.
fn format_terminal(result: &ComparisonResult, options: &OutputOptions) -> String {
    let mut output = String::new();

    if options.show_matched {
        for pair in &result.matched {
            output.push_str(&format!("{} {}\n", "=".dimmed(), pair.id.dimmed()));
        }
    }

    if result.differences.is_empty() {
        output.push_str(&"No differences detected.".dimmed().to_string());
        return output;
    }

    for difference in &result.differences {
        let line = match difference {
            Difference::Added { path, value } => {
                let value = value.preview(options.max_value_length);
                format!("{} {}: {}", "+".bright_green(), path.green(), value.green())
            }
            Difference::Deleted { path, value } => {
                let value = value.preview(options.max_value_length);
                format!("{} {}: {}", "-".bright_red(), path.red(), value.red())
            }
            Difference::Modified {
                path,
                old_value,
                new_value,
            } => {
                let old_value = old_value.preview(options.max_value_length);
                let new_value = new_value.preview(options.max_value_length);
                format!(
                    "{} {}: {} {} {}",
                    "•".bright_yellow(),
                    path.yellow(),
                    old_value.yellow(),
                    "→".bright_yellow(),
                    new_value.yellow()
                )
            }
        };
        output.push_str(&line);
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_summary(&result.summary));
    output
}

/// Plain text rendering, same layout as terminal output without colors.
fn format_plain(result: &ComparisonResult, options: &OutputOptions) -> String {
    let mut output = String::new();

    if options.show_matched {
        for pair in &result.matched {
            output.push_str(&format!("= {}\n", pair.id));
        }
    }

    if result.differences.is_empty() {
        output.push_str("No differences detected.");
        return output;
    }

    for difference in &result.differences {
        let line = match difference {
            Difference::Added { path, value } => {
                format!("+ {}: {}", path, value.preview(options.max_value_length))
            }
            Difference::Deleted { path, value } => {
                format!("- {}: {}", path, value.preview(options.max_value_length))
            }
            Difference::Modified {
                path,
                old_value,
                new_value,
            } => format!(
                "• {}: {} → {}",
                path,
                old_value.preview(options.max_value_length),
                new_value.preview(options.max_value_length)
            ),
        };
        output.push_str(&line);
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_summary(&result.summary));
    output
}

fn format_json(result: &ComparisonResult) -> Result<String, OutputError> {
    use serde_json::json;

    let matched: Vec<serde_json::Value> = result
        .matched
        .iter()
        .map(|pair| {
            json!({
                "id": pair.id,
                "first": pair.first.to_json(),
                "second": pair.second.to_json(),
            })
        })
        .collect();

    let entity_list = |entities: &[crate::extract::Entity]| -> Vec<serde_json::Value> {
        entities
            .iter()
            .map(|e| json!({"id": e.id.to_string(), "data": e.data.to_json()}))
            .collect()
    };

    let differences: Vec<serde_json::Value> = result
        .differences
        .iter()
        .map(|difference| match difference {
            Difference::Added { path, value } => {
                json!({"path": path, "type": "added", "value": value.to_json()})
            }
            Difference::Deleted { path, value } => {
                json!({"path": path, "type": "deleted", "value": value.to_json()})
            }
            Difference::Modified {
                path,
                old_value,
                new_value,
            } => json!({
                "path": path,
                "type": "modified",
                "old_value": old_value.to_json(),
                "new_value": new_value.to_json(),
            }),
        })
        .collect();

    let output = json!({
        "matched": matched,
        "only_in_first": entity_list(&result.only_in_first),
        "only_in_second": entity_list(&result.only_in_second),
        "differences": differences,
        "summary": {
            "added": result.summary.added,
            "deleted": result.summary.deleted,
            "modified": result.summary.modified,
            "equal": result.summary.equal,
            "total_differences": result.summary.total_differences,
        }
    });

    serde_json::to_string_pretty(&output)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

fn format_html(result: &ComparisonResult, options: &OutputOptions) -> String {
    let mut rows = String::new();
    for difference in &result.differences {
        let (kind, path, old_value, new_value) = difference_cells(difference, options);
        rows.push_str(&format!(
            "    <tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            kind,
            escape_html(path),
            kind,
            escape_html(&old_value),
            escape_html(&new_value)
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Comparison result</title>\n\
         <style>\ntable {{ border-collapse: collapse; font-family: monospace; }}\n\
         td, th {{ border: 1px solid #ccc; padding: 4px 8px; }}\n\
         tr.added {{ background: #e6ffe6; }}\ntr.deleted {{ background: #ffe6e6; }}\n\
         tr.modified {{ background: #fff8e0; }}\n</style>\n</head>\n<body>\n\
         <p>{}</p>\n<table>\n    <tr><th>Path</th><th>Change</th><th>Old</th><th>New</th></tr>\n{}</table>\n</body>\n</html>\n",
        escape_html(&format_summary(&result.summary)),
        rows
    )
}

fn format_csv(result: &ComparisonResult, options: &OutputOptions) -> String {
    let mut output = String::from("path,type,old_value,new_value\n");
    for difference in &result.differences {
        let (kind, path, old_value, new_value) = difference_cells(difference, options);
        output.push_str(&format!(
            "{},{},{},{}\n",
            escape_csv(path),
            kind,
            escape_csv(&old_value),
            escape_csv(&new_value)
        ));
    }
    output
}

fn format_markdown(result: &ComparisonResult, options: &OutputOptions) -> String {
    let mut output = String::new();
    output.push_str("| Path | Change | Old | New |\n");
    output.push_str("|---|---|---|---|\n");
    for difference in &result.differences {
        let (kind, path, old_value, new_value) = difference_cells(difference, options);
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            escape_markdown(path),
            kind,
            escape_markdown(&old_value),
            escape_markdown(&new_value)
        ));
    }
    output.push('\n');
    output.push_str(&format_summary(&result.summary));
    output.push('\n');
    output
}

/// Shared tabular cells: (kind, path, old, new). Single-sided records leave
/// the missing side blank.
fn difference_cells<'a>(
    difference: &'a Difference,
    options: &OutputOptions,
) -> (&'static str, &'a str, String, String) {
    match difference {
        Difference::Added { path, value } => (
            "added",
            path,
            String::new(),
            value.preview(options.max_value_length),
        ),
        Difference::Deleted { path, value } => (
            "deleted",
            path,
            value.preview(options.max_value_length),
            String::new(),
        ),
        Difference::Modified {
            path,
            old_value,
            new_value,
        } => (
            "modified",
            path,
            old_value.preview(options.max_value_length),
            new_value.preview(options.max_value_length),
        ),
    }
}

fn format_summary(summary: &Summary) -> String {
    if summary.is_empty() {
        return format!("Summary: No differences ({} equal)", summary.equal);
    }

    let mut parts = Vec::new();
    if summary.added > 0 {
        parts.push(format!("{} added", summary.added));
    }
    if summary.deleted > 0 {
        parts.push(format!("{} deleted", summary.deleted));
    }
    if summary.modified > 0 {
        parts.push(format!("{} modified", summary.modified));
    }
    if summary.equal > 0 {
        parts.push(format!("{} equal", summary.equal));
    }

    format!("Summary: {}", parts.join(", "))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|")
}
