//! CLI command implementations.

pub mod doctor;
pub mod resolve;

use std::path::Path;

use anyhow::{Context, Result};

use opforge_facts::EnvFacts;

/// The build-variable toggle honored at this boundary.
pub const BUILD_TOGGLE_VAR: &str = "OPFORGE_BUILD_CORE_OPS";

/// Load pinned facts from a fixture, or detect the live environment.
pub fn load_or_detect_facts(facts_path: Option<&Path>) -> Result<EnvFacts> {
    match facts_path {
        Some(path) => EnvFacts::load_toml(path)
            .with_context(|| format!("loading facts from {}", path.display())),
        None => Ok(EnvFacts::detect().clone()),
    }
}

/// Read the build toggle from the environment, if set to a recognized value.
pub fn build_toggle_from_env() -> Option<opforge_resolve::BuildToggle> {
    std::env::var(BUILD_TOGGLE_VAR)
        .ok()
        .and_then(|v| opforge_resolve::BuildToggle::from_env_value(&v))
}
