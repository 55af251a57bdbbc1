//! Custom error types for jdiff.

/// Identifier extraction failures. The only error the comparison engine
/// itself can produce; callers are expected to catch it and fall back to
/// whole-document comparison.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Path \"{path}\" does not resolve to an array")]
    NotAnArray { path: String },

    #[error("No objects found at path \"{path}\"")]
    NoObjects { path: String },

    #[error("No entities with a usable id for expression \"{expr}\"")]
    NoUsableIds { expr: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read file {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    YamlError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not detect file format for {path}")]
    UnknownFormat { path: String },
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to serialize to JSON: {source}")]
    JsonSerializationError {
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum JdiffError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl ExtractError {
    pub fn not_an_array(path: impl Into<String>) -> Self {
        Self::NotAnArray { path: path.into() }
    }

    pub fn no_objects(path: impl Into<String>) -> Self {
        Self::NoObjects { path: path.into() }
    }

    pub fn no_usable_ids(expr: impl Into<String>) -> Self {
        Self::NoUsableIds { expr: expr.into() }
    }
}

impl ParseError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn read_error(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn json_error(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonError {
            path: path.into(),
            source,
        }
    }

    pub fn yaml_error(path: impl Into<String>, source: serde_yaml::Error) -> Self {
        Self::YamlError {
            path: path.into(),
            source,
        }
    }

    pub fn toml_error(path: impl Into<String>, source: toml::de::Error) -> Self {
        Self::TomlError {
            path: path.into(),
            source,
        }
    }

    pub fn unknown_format(path: impl Into<String>) -> Self {
        Self::UnknownFormat { path: path.into() }
    }
}
