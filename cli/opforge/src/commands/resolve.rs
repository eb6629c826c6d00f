//! `opforge resolve` — run the full build resolution and print the
//! descriptor.
//!
//! Warnings go to stderr so the descriptor on stdout stays machine-usable;
//! the library collects warnings as data and this boundary forwards them.

use std::path::Path;

use anyhow::{bail, Result};
use serde_json::json;

use opforge_resolve::{resolve, ArchSpec, PrefixMode, Resolution};

use super::{build_toggle_from_env, load_or_detect_facts};

/// Returns whether the compatibility gate passed.
pub fn run(
    facts_path: Option<&Path>,
    archs: &[u32],
    cwd: &Path,
    mode: &str,
    format: &str,
) -> Result<bool> {
    let facts = load_or_detect_facts(facts_path)?;
    let mode = parse_mode(mode)?;
    let requested: Vec<ArchSpec> = archs.iter().map(|&g| ArchSpec::generation(g)).collect();

    let resolution = resolve(&facts, cwd, mode, &requested, build_toggle_from_env())?;

    for warning in resolution.all_warnings() {
        eprintln!("warning: {warning}");
    }

    match format {
        "text" => print!("{resolution}"),
        "json" => println!("{}", to_json(&resolution)?),
        other => bail!("unknown format: '{other}' (expected text or json)"),
    }

    Ok(resolution.verdict.compatible)
}

fn parse_mode(mode: &str) -> Result<PrefixMode> {
    match mode {
        "auto" => Ok(PrefixMode::Auto),
        "in-tree" => Ok(PrefixMode::InTree),
        "packaging" => Ok(PrefixMode::Packaging),
        other => bail!("unknown prefix mode: '{other}' (expected auto, in-tree, or packaging)"),
    }
}

fn to_json(resolution: &Resolution) -> Result<String> {
    let value = json!({
        "prefix": resolution.prefix,
        "compatible": resolution.verdict.compatible,
        "descriptor": resolution.descriptor,
        "retained_archs": resolution.filter.retained,
        "pruned_archs": resolution.filter.pruned,
        "warnings": resolution.all_warnings(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
