use jdiff_rs::{
    extract_entities, format_result, parse_json, run_comparison, CompareOptions, OutputFormat,
    OutputOptions,
};

fn sample() -> jdiff_rs::ComparisonResult {
    let first = extract_entities(
        &parse_json(r#"[{"id": 1, "name": "Alice", "age": 30}, {"id": 2, "name": "Bob"}]"#)
            .unwrap(),
        "",
    )
    .unwrap();
    let second = extract_entities(
        &parse_json(r#"[{"id": 1, "name": "Alice", "age": 31}, {"id": 3, "name": "Cara"}]"#)
            .unwrap(),
        "",
    )
    .unwrap();
    run_comparison(&first, &second, &CompareOptions::default())
}

fn empty() -> jdiff_rs::ComparisonResult {
    let entities = extract_entities(&parse_json(r#"[{"id": 1, "v": 1}]"#).unwrap(), "").unwrap();
    run_comparison(&entities, &entities.clone(), &CompareOptions::default())
}

#[test]
fn test_plain_output_lines() {
    let output = format_result(&sample(), &OutputFormat::Plain, &OutputOptions::default()).unwrap();
    assert!(output.contains("• 1.age: 30 → 31"));
    assert!(output.contains("- ID: 2"));
    assert!(output.contains("+ ID: 3"));
    assert!(output.contains("Summary:"));
}

#[test]
fn test_plain_output_empty_result() {
    let output = format_result(&empty(), &OutputFormat::Plain, &OutputOptions::default()).unwrap();
    assert!(output.contains("No differences detected."));
}

#[test]
fn test_terminal_output_contains_paths() {
    let output =
        format_result(&sample(), &OutputFormat::Terminal, &OutputOptions::default()).unwrap();
    assert!(output.contains("1.age"));
    assert!(output.contains("Summary:"));
}

#[test]
fn test_json_output_is_valid_json() {
    let output = format_result(&sample(), &OutputFormat::Json, &OutputOptions::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert!(value["matched"].is_array());
    assert!(value["only_in_first"].is_array());
    assert!(value["only_in_second"].is_array());
    assert_eq!(value["summary"]["total_differences"], 3);
    assert_eq!(value["differences"].as_array().unwrap().len(), 3);
}

#[test]
fn test_json_output_difference_records() {
    let output = format_result(&sample(), &OutputFormat::Json, &OutputOptions::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let modified = value["differences"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["type"] == "modified")
        .unwrap();
    assert_eq!(modified["path"], "1.age");
    assert_eq!(modified["old_value"], 30.0);
    assert_eq!(modified["new_value"], 31.0);
}

#[test]
fn test_csv_output_header_and_rows() {
    let output = format_result(&sample(), &OutputFormat::Csv, &OutputOptions::default()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "path,type,old_value,new_value");
    assert_eq!(lines.len(), 4);
    assert!(lines[1..].iter().any(|l| l.starts_with("1.age,modified")));
    // "ID: 2" contains a comma after quoting rules? No comma, kept bare
    assert!(lines[1..].iter().any(|l| l.starts_with("ID: 2,deleted")));
}

#[test]
fn test_markdown_output_table() {
    let output =
        format_result(&sample(), &OutputFormat::Markdown, &OutputOptions::default()).unwrap();
    assert!(output.contains("| Path | Change | Old | New |"));
    assert!(output.contains("| 1.age | modified | 30 | 31 |"));
}

#[test]
fn test_html_output_document() {
    let output = format_result(&sample(), &OutputFormat::Html, &OutputOptions::default()).unwrap();
    assert!(output.starts_with("<!DOCTYPE html>"));
    assert!(output.contains("<td>1.age</td>"));
    assert!(output.contains("</html>"));
}

#[test]
fn test_show_matched_lists_ids() {
    let options = OutputOptions {
        show_matched: true,
        ..Default::default()
    };
    let output = format_result(&sample(), &OutputFormat::Plain, &options).unwrap();
    assert!(output.contains("= 1"));
}

#[test]
fn test_value_truncation_respects_max_length() {
    let first = extract_entities(
        &parse_json(&format!(r#"[{{"id": 1, "text": "{}"}}]"#, "x".repeat(200))).unwrap(),
        "",
    )
    .unwrap();
    let second = extract_entities(
        &parse_json(&format!(r#"[{{"id": 1, "text": "{}"}}]"#, "y".repeat(200))).unwrap(),
        "",
    )
    .unwrap();
    let result = run_comparison(&first, &second, &CompareOptions::default());

    let options = OutputOptions {
        max_value_length: 20,
        ..Default::default()
    };
    let output = format_result(&result, &OutputFormat::Plain, &options).unwrap();
    assert!(output.contains("..."));
    assert!(!output.contains(&"x".repeat(30)));
}
