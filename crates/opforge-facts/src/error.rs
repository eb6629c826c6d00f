//! Error types for environment fact operations.

use std::path::PathBuf;

/// Errors that can occur while loading or parsing environment facts.
#[derive(Debug, thiserror::Error)]
pub enum FactsError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing fact fixture files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fact fixture file not found.
    #[error("facts file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Unparseable toolkit version string.
    #[error("invalid toolkit version: '{input}' (expected major[.minor])")]
    Version {
        /// The offending input.
        input: String,
    },
}

/// Result type for fact operations.
pub type Result<T> = std::result::Result<T, FactsError>;
