//! Error types for conda-packages

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value has the wrong kind (e.g. a list where a mapping is required)
    #[error("{context} requires {expected}, got {actual}")]
    InvalidArgumentType {
        /// Kind that was required
        expected: String,
        /// Kind (and value) that was found
        actual: String,
        /// Which variable or entry the check was applied to
        context: String,
    },

    /// A plugin record lacks a required key
    #[error("{context} requires items containing '{field}', got item {entry}")]
    MissingRequiredField {
        /// The missing key
        field: String,
        /// Rendering of the offending entry
        entry: String,
        /// Which variable the check was applied to
        context: String,
    },

    #[error("Failed to read packages config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid packages config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unsupported packages config format: {path} (expected .yaml, .yml, .toml or .json)")]
    UnsupportedConfigFormat { path: PathBuf },
}
