//! JDIFF - Entity-aware comparison tool for structured documents.
//!
//! This library compares two structured documents (JSON, YAML, TOML) and
//! produces a navigable set of differences under configurable matching and
//! normalization rules. Documents are broken into identifiable entities,
//! matched pairwise by id, and compared recursively; the result carries the
//! matched pairs, the entities unique to either side, the difference list
//! and summary counts.
//!
//! # Example
//!
//! ```no_run
//! use jdiff_rs::{parse_file, extract_entities, run_comparison, CompareOptions};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let first = parse_file(Path::new("before.json"))?;
//! let second = parse_file(Path::new("after.json"))?;
//!
//! let entities1 = extract_entities(&first, "users[].id")?;
//! let entities2 = extract_entities(&second, "users[].id")?;
//!
//! let result = run_comparison(&entities1, &entities2, &CompareOptions::default());
//! for difference in &result.differences {
//!     println!("{}: {}", difference.kind(), difference.path());
//! }
//! # Ok(())
//! # }
//! ```

pub mod compare;
pub mod engine;
pub mod error;
pub mod extract;
pub mod filter;
pub mod output;
pub mod parser;
pub mod reconcile;
pub mod tree;

// Re-export commonly used types for convenience
pub use compare::{compare_values, ArrayMatching, CompareMode, CompareOptions, Difference};
pub use engine::{run_comparison, ComparisonResult, MatchedPair, Summary};
pub use error::{ExtractError, JdiffError, OutputError, ParseError};
pub use extract::{extract_entities, Entity, EntityId};
pub use filter::PathFilter;
pub use output::{format_result, OutputFormat, OutputOptions};
pub use parser::{parse_file, parse_json, parse_toml, parse_yaml};
pub use tree::Node;
