//! Environment fact model and detection for opforge kernel build resolution.
//!
//! The resolution core consumes a snapshot of environment facts: toolkit
//! versions, accelerator presence and generation, and which toolchain
//! variant is active. This crate defines that snapshot ([`EnvFacts`]),
//! parses toolkit versions, probes the local machine for a best-effort
//! live snapshot, and loads pinned fact fixtures from TOML.

pub mod detect;
pub mod error;
pub mod facts;
pub mod version;

pub use error::{FactsError, Result};
pub use facts::{DeviceFacts, EnvFacts};
pub use version::ToolkitVersion;
