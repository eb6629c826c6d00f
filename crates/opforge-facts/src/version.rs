//! Toolkit version model.
//!
//! Accelerator toolkits version themselves as `major.minor` (e.g. `11.8`),
//! sometimes with a patch component tacked on by packaging tools. Only the
//! (major, minor) pair matters for compatibility decisions, so that is all
//! this type keeps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FactsError;

/// An installed toolkit version, ordered on (major, minor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolkitVersion {
    /// Major version component.
    pub major: u32,
    /// Minor version component.
    pub minor: u32,
}

impl ToolkitVersion {
    /// Construct a version from its components.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl FromStr for ToolkitVersion {
    type Err = FactsError;

    /// Parse `"11"`, `"11.8"`, or `"11.8.0"` (components past the minor are
    /// ignored). Rejects empty strings and non-numeric components.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FactsError::Version {
                input: s.to_string(),
            });
        }
        let mut parts = s.split('.');
        let major = parse_component(parts.next(), s)?;
        let minor = match parts.next() {
            Some(m) => parse_component(Some(m), s)?,
            None => 0,
        };
        Ok(Self { major, minor })
    }
}

fn parse_component(part: Option<&str>, input: &str) -> Result<u32, FactsError> {
    part.and_then(|p| p.parse::<u32>().ok())
        .ok_or_else(|| FactsError::Version {
            input: input.to_string(),
        })
}

impl fmt::Display for ToolkitVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl TryFrom<String> for ToolkitVersion {
    type Error = FactsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ToolkitVersion> for String {
    fn from(v: ToolkitVersion) -> Self {
        v.to_string()
    }
}
