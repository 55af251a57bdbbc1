//! JDIFF command-line interface.
//!
//! This is the main entry point for the jdiff CLI tool. It uses clap for
//! argument parsing, wires the library modules together, and owns the two
//! policies the engine deliberately leaves to its caller: building the
//! immutable options record, and falling back to whole-document comparison
//! when entity extraction fails.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use jdiff_rs::{
    extract_entities, format_result, parse_file, run_comparison, ArrayMatching, CompareMode,
    CompareOptions, Entity, EntityId, Node, OutputFormat, OutputOptions,
};
use std::path::PathBuf;
use std::process;

/// JDIFF - Entity-aware comparison tool for structured documents
///
/// Compares two JSON, YAML or TOML documents by matching entities on an
/// identifier path, with configurable normalization and array matching.
#[derive(Parser)]
#[command(name = "jdiff")]
#[command(version)]
#[command(about = "Entity-aware comparison tool for structured documents", long_about = None)]
#[command(author = "JDIFF Contributors")]
struct Cli {
    /// First file to compare
    #[arg(value_name = "FILE1")]
    file1: PathBuf,

    /// Second file to compare
    #[arg(value_name = "FILE2")]
    file2: PathBuf,

    /// Identifier path expression (e.g. "users[].id", "data.items.sku")
    #[arg(short = 'i', long, default_value = "")]
    id_path: String,

    /// Comparison mode
    #[arg(short = 'm', long, value_enum, default_value = "exact")]
    mode: ModeArg,

    /// Array reconciliation strategy
    #[arg(short = 'a', long, value_enum, default_value = "index")]
    array_matching: ArrayMatchingArg,

    /// Trim and lowercase strings before comparing them
    #[arg(long)]
    normalize_strings: bool,

    /// Suppress differences at timestamp-like paths
    #[arg(long)]
    ignore_timestamps: bool,

    /// Do not report keys present only in the first document
    #[arg(long)]
    ignore_extra_keys: bool,

    /// Treat two numbers as equal when within this absolute tolerance
    #[arg(long, default_value = "0")]
    numeric_tolerance: f64,

    /// Case-insensitive primitive comparison
    #[arg(long)]
    case_insensitive: bool,

    /// Only report differences at paths containing this substring (repeatable)
    #[arg(long = "include", value_name = "PATTERN")]
    include_paths: Vec<String>,

    /// Suppress differences at paths containing this substring (repeatable)
    #[arg(long = "exclude", value_name = "PATTERN")]
    exclude_paths: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "terminal")]
    format: OutputFormatArg,

    /// Maximum length for displayed values
    #[arg(long, default_value = "80")]
    max_value_length: usize,

    /// List matched entity ids in the output
    #[arg(long)]
    show_matched: bool,

    /// Verbose output (show progress on stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (only show differences, suppress summary)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Values must match exactly
    Exact,
    /// Compare value types only
    Type,
    /// Ignore array element order
    IgnoreOrder,
}

impl From<ModeArg> for CompareMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Exact => CompareMode::Exact,
            ModeArg::Type => CompareMode::Type,
            ModeArg::IgnoreOrder => CompareMode::IgnoreOrder,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ArrayMatchingArg {
    /// Positional comparison of canonical serializations
    Index,
    /// Match array elements by id field
    Id,
    /// Order-independent hash comparison
    Hash,
    /// Length check, then positional comparison
    BestMatch,
}

impl From<ArrayMatchingArg> for ArrayMatching {
    fn from(arg: ArrayMatchingArg) -> Self {
        match arg {
            ArrayMatchingArg::Index => ArrayMatching::Index,
            ArrayMatchingArg::Id => ArrayMatching::Id,
            ArrayMatchingArg::Hash => ArrayMatching::Hash,
            ArrayMatchingArg::BestMatch => ArrayMatching::BestMatch,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// Plain text (no colors)
    Plain,
    /// JSON representation
    Json,
    /// Standalone HTML document
    Html,
    /// CSV rows
    Csv,
    /// Markdown table
    Markdown,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Plain => OutputFormat::Plain,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Html => OutputFormat::Html,
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    if cli.verbose {
        eprintln!("Parsing {}...", cli.file1.display());
    }

    let first = parse_file(&cli.file1)
        .with_context(|| format!("Failed to parse first file: {}", cli.file1.display()))?;

    if cli.verbose {
        eprintln!("Parsing {}...", cli.file2.display());
    }

    let second = parse_file(&cli.file2)
        .with_context(|| format!("Failed to parse second file: {}", cli.file2.display()))?;

    if cli.verbose {
        eprintln!("Extracting entities...");
    }

    let entities1 = extract_or_fallback(&first, &cli.id_path, cli.verbose);
    let entities2 = extract_or_fallback(&second, &cli.id_path, cli.verbose);

    let options = CompareOptions {
        mode: cli.mode.into(),
        array_matching: cli.array_matching.into(),
        normalize_strings: cli.normalize_strings,
        ignore_timestamps: cli.ignore_timestamps,
        ignore_key_order: true,
        numeric_tolerance: cli.numeric_tolerance,
        include_paths: cli.include_paths.clone(),
        exclude_paths: cli.exclude_paths.clone(),
        case_sensitive: !cli.case_insensitive,
        ignore_extra_keys: cli.ignore_extra_keys,
    };

    if cli.verbose {
        eprintln!("Comparing...");
    }

    let result = run_comparison(&entities1, &entities2, &options);

    if cli.verbose {
        eprintln!("Formatting output...");
    }

    let output_options = OutputOptions {
        max_value_length: cli.max_value_length,
        show_matched: cli.show_matched,
    };

    let output_format: OutputFormat = cli.format.into();
    let output = format_result(&result, &output_format, &output_options)
        .context("Failed to format comparison output")?;

    if !cli.quiet {
        println!("{}", output);
    } else {
        for line in output.lines() {
            if !line.starts_with("Summary:") && !line.trim().is_empty() {
                println!("{}", line);
            }
        }
    }

    if result.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

/// Caller-side retry policy: when extraction fails, compare the whole
/// document as one synthetic entity with id `root`.
fn extract_or_fallback(document: &Node, id_path: &str, verbose: bool) -> Vec<Entity> {
    match extract_entities(document, id_path) {
        Ok(entities) => entities,
        Err(err) => {
            if verbose {
                eprintln!("Entity extraction failed ({}), comparing whole document", err);
            }
            vec![Entity {
                id: EntityId::Text("root".to_string()),
                data: document.clone(),
            }]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_conversion() {
        assert_eq!(CompareMode::from(ModeArg::Exact), CompareMode::Exact);
        assert_eq!(CompareMode::from(ModeArg::Type), CompareMode::Type);
        assert_eq!(
            CompareMode::from(ModeArg::IgnoreOrder),
            CompareMode::IgnoreOrder
        );
    }

    #[test]
    fn test_array_matching_conversion() {
        assert_eq!(
            ArrayMatching::from(ArrayMatchingArg::Index),
            ArrayMatching::Index
        );
        assert_eq!(
            ArrayMatching::from(ArrayMatchingArg::BestMatch),
            ArrayMatching::BestMatch
        );
    }

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(
            OutputFormat::from(OutputFormatArg::Terminal),
            OutputFormat::Terminal
        );
        assert_eq!(OutputFormat::from(OutputFormatArg::Csv), OutputFormat::Csv);
    }

    #[test]
    fn test_fallback_wraps_document_as_root() {
        let document = Node::Number(42.0);
        let entities = extract_or_fallback(&document, "", false);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, EntityId::Text("root".to_string()));
        assert_eq!(entities[0].data, Node::Number(42.0));
    }
}
