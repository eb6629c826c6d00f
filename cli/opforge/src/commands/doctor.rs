//! `opforge doctor` — environment diagnostics.

use std::path::Path;

use anyhow::Result;

use opforge_resolve::{evaluate_with_toggle, resolve_prefix, PrefixMode};

use super::{build_toggle_from_env, load_or_detect_facts};

/// Print environment diagnostics and the gate verdict.
pub fn run(facts_path: Option<&Path>, cwd: &Path) -> Result<()> {
    println!("=== opforge Doctor ===");
    println!();

    println!("opforge version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let facts = load_or_detect_facts(facts_path)?;

    println!("--- Environment Facts ---");
    println!(
        "  Source:           {}",
        match facts_path {
            Some(path) => format!("fixture {}", path.display()),
            None => "live detection".to_string(),
        }
    );
    println!(
        "  Runtime:          {}",
        if facts.runtime_available {
            "available"
        } else {
            "not found"
        }
    );
    println!(
        "  Toolchain:        {}",
        if facts.rocm_variant { "ROCm variant" } else { "primary" }
    );
    println!(
        "  Accelerator:      {}",
        match facts.device_generation() {
            Some(generation) => format!("generation {generation}"),
            None => "none".to_string(),
        }
    );
    println!("  System toolkit:   {}", optional_version(&facts.system_toolkit));
    println!("  Library toolkit:  {}", optional_version(&facts.library_toolkit));
    println!();

    println!("--- Compatibility ---");
    let verdict = evaluate_with_toggle(&facts, build_toggle_from_env());
    println!(
        "  Verdict: {}",
        if verdict.compatible { "PASS" } else { "FAIL" }
    );
    for warning in &verdict.warnings {
        println!("  warning: {warning}");
    }
    println!();

    println!("--- Source Tree ---");
    match resolve_prefix(cwd, PrefixMode::Auto) {
        Ok(prefix) => println!("  Prefix from {}: {}", cwd.display(), prefix.display()),
        Err(e) => println!("  Prefix: error — {e}"),
    }

    Ok(())
}

fn optional_version(version: &Option<opforge_facts::ToolkitVersion>) -> String {
    match version {
        Some(v) => v.to_string(),
        None => "unknown".to_string(),
    }
}
