//! Error types for the resolution core.
//!
//! Environment variability (missing runtime, unsupported hardware, toolkit
//! skew) is never an error here; those conditions travel as verdicts and
//! warnings. Errors are reserved for conditions that indicate a broken
//! invocation or a broken source table.

use std::path::PathBuf;

/// Errors that can occur during build resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The caller-supplied working directory does not exist.
    #[error("working directory not found: {}", path.display())]
    BadWorkingDir {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A source file appeared twice in an assembled set.
    #[error("duplicate source path in assembled set: {}", path.display())]
    DuplicateSource {
        /// The duplicated path.
        path: PathBuf,
    },
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
