//! Environment fact model.
//!
//! Facts are plain data: the resolution core never queries the environment
//! itself, it is handed an [`EnvFacts`] value. That keeps every compatibility
//! decision deterministic and testable without accelerator hardware. Facts
//! can come from live detection (see [`crate::detect`]) or from a pinned
//! TOML fixture.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FactsError, Result};
use crate::version::ToolkitVersion;

/// Facts about a detected accelerator device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFacts {
    /// Hardware architecture generation digit (compute capability major),
    /// e.g. 6 for Pascal-class, 8 for Ampere-class.
    pub generation: u32,
}

/// A snapshot of the build environment, consumed by the resolution core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvFacts {
    /// Whether the host numerical-computation runtime is available at all.
    /// Without it nothing can be compiled against, let alone loaded.
    pub runtime_available: bool,

    /// Whether the alternate (ROCm-style) toolchain variant is active.
    /// Its versioning scheme differs, so the generation rules for the
    /// primary toolchain do not apply.
    #[serde(default)]
    pub rocm_variant: bool,

    /// The detected accelerator, if any. `None` is a normal state
    /// (CPU-only hosts resolve the baseline kernel set).
    #[serde(default)]
    pub device: Option<DeviceFacts>,

    /// Version of the system-installed toolkit (e.g. from nvcc).
    #[serde(default)]
    pub system_toolkit: Option<ToolkitVersion>,

    /// Toolkit version the host numerical library was built against.
    #[serde(default)]
    pub library_toolkit: Option<ToolkitVersion>,
}

impl EnvFacts {
    /// Facts for a host with no runtime installed. Everything else is moot.
    pub fn no_runtime() -> Self {
        Self {
            runtime_available: false,
            rocm_variant: false,
            device: None,
            system_toolkit: None,
            library_toolkit: None,
        }
    }

    /// Facts for a CPU-only host with a working runtime.
    pub fn cpu_only() -> Self {
        Self {
            runtime_available: true,
            ..Self::no_runtime()
        }
    }

    /// Facts for a host with an accelerator of the given generation and
    /// matching system/library toolkit versions. Convenience for tests and
    /// fixtures.
    pub fn with_device(generation: u32, toolkit: ToolkitVersion) -> Self {
        Self {
            runtime_available: true,
            rocm_variant: false,
            device: Some(DeviceFacts { generation }),
            system_toolkit: Some(toolkit),
            library_toolkit: Some(toolkit),
        }
    }

    /// The device generation, if an accelerator is present.
    pub fn device_generation(&self) -> Option<u32> {
        self.device.map(|d| d.generation)
    }

    /// Whether the primary (non-ROCm) toolchain path is active and a device
    /// is present — the precondition for every generation-based rule.
    pub fn primary_toolchain_device(&self) -> Option<u32> {
        if self.rocm_variant {
            return None;
        }
        self.device_generation()
    }

    /// Load facts from a TOML fixture file.
    pub fn load_toml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FactsError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse facts from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let facts: EnvFacts = toml::from_str(toml_str)?;
        Ok(facts)
    }

    /// Serialize facts to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        let toml_str = toml::to_string_pretty(self)?;
        Ok(toml_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn toml_round_trip() {
        let facts = EnvFacts::with_device(8, ToolkitVersion::new(11, 8));
        let toml_str = facts.to_toml().unwrap();
        let back = EnvFacts::from_toml_str(&toml_str).unwrap();
        assert_eq!(facts, back);
    }

    #[test]
    fn absent_keys_default() {
        let facts = EnvFacts::from_toml_str("runtime_available = true").unwrap();
        assert!(facts.runtime_available);
        assert!(!facts.rocm_variant);
        assert!(facts.device.is_none());
        assert!(facts.system_toolkit.is_none());
        assert!(facts.library_toolkit.is_none());
    }

    #[test]
    fn versions_parse_from_strings() {
        let facts = EnvFacts::from_toml_str(
            r#"
            runtime_available = true
            system_toolkit = "11.8"
            library_toolkit = "11.3"

            [device]
            generation = 8
            "#,
        )
        .unwrap();
        assert_eq!(facts.system_toolkit, Some(ToolkitVersion::new(11, 8)));
        assert_eq!(facts.library_toolkit, Some(ToolkitVersion::new(11, 3)));
        assert_eq!(facts.device_generation(), Some(8));
    }

    #[test]
    fn bad_version_string_is_an_error() {
        let result = EnvFacts::from_toml_str(
            r#"
            runtime_available = true
            system_toolkit = "not-a-version"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let err = EnvFacts::load_toml(Path::new("/nonexistent/facts.toml")).unwrap_err();
        assert!(matches!(err, FactsError::NotFound { .. }));
    }

    #[test]
    fn load_fixture_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facts.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "runtime_available = true").unwrap();
        writeln!(f, "rocm_variant = true").unwrap();
        let facts = EnvFacts::load_toml(&path).unwrap();
        assert!(facts.rocm_variant);
    }

    #[test]
    fn rocm_variant_masks_device_for_primary_rules() {
        let mut facts = EnvFacts::with_device(8, ToolkitVersion::new(11, 8));
        assert_eq!(facts.primary_toolchain_device(), Some(8));
        facts.rocm_variant = true;
        assert_eq!(facts.primary_toolchain_device(), None);
    }
}
