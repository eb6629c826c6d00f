//! Build descriptor and the full resolution orchestrator:
//! facts -> gate + filter -> prefix -> source/include assembly -> report.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use opforge_facts::EnvFacts;

use crate::error::Result;
use crate::filter::{filter_architectures, ArchSpec, FilterOutcome};
use crate::gate::{evaluate_with_toggle, BuildToggle, CompatibilityVerdict};
use crate::includes::{assemble_includes, assemble_link_flags};
use crate::prefix::{resolve_prefix, PrefixMode};
use crate::sources::assemble_sources;

/// The resolved build inputs, consumed verbatim by the external compiler
/// invocation. Produced fresh on every resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDescriptor {
    /// Ordered, duplicate-free source files to compile.
    pub sources: Vec<PathBuf>,
    /// Ordered include directories.
    pub include_dirs: Vec<PathBuf>,
    /// Extra linker flags (commonly empty).
    pub link_flags: Vec<String>,
}

/// Everything a resolution run produced: the descriptor plus the advisory
/// verdict, the architecture partition, and every warning in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The resolved source-tree prefix.
    pub prefix: PathBuf,
    /// Compiler/linker inputs.
    pub descriptor: BuildDescriptor,
    /// Compatibility gate verdict (advisory; the descriptor is produced
    /// regardless, the caller decides whether to compile).
    pub verdict: CompatibilityVerdict,
    /// Partition of the requested architectures.
    pub filter: FilterOutcome,
    /// Warnings from source assembly (skipped optional kernels).
    pub source_warnings: Vec<String>,
}

impl Resolution {
    /// All warnings in emission order: gate, then filter, then assembly.
    pub fn all_warnings(&self) -> Vec<&str> {
        self.verdict
            .warnings
            .iter()
            .map(String::as_str)
            .chain(self.filter.warning.as_deref())
            .chain(self.source_warnings.iter().map(String::as_str))
            .collect()
    }
}

/// Run the full resolution for one extension module.
///
/// Gate and filter are independent advisory checks; the assemblers run
/// unconditionally so the caller holding a negative verdict still sees
/// exactly what would be compiled. Deterministic: identical facts,
/// working directory, and request produce identical output.
pub fn resolve(
    facts: &EnvFacts,
    cwd: &Path,
    mode: PrefixMode,
    requested: &[ArchSpec],
    toggle: Option<BuildToggle>,
) -> Result<Resolution> {
    let verdict = evaluate_with_toggle(facts, toggle);
    let filter = filter_architectures(requested);

    let prefix = resolve_prefix(cwd, mode)?;
    let source_set = assemble_sources(facts, &prefix)?;
    let include_dirs = assemble_includes(&prefix)?;
    let link_flags = assemble_link_flags();

    Ok(Resolution {
        prefix,
        descriptor: BuildDescriptor {
            sources: source_set.sources,
            include_dirs,
            link_flags,
        },
        verdict,
        filter,
        source_warnings: source_set.warnings,
    })
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Build Resolution ===")?;
        writeln!(f, "Prefix: {}", self.prefix.display())?;
        writeln!(
            f,
            "Compatible: {}",
            if self.verdict.compatible { "yes" } else { "no" }
        )?;
        writeln!(f)?;

        writeln!(f, "--- Sources ({}) ---", self.descriptor.sources.len())?;
        for source in &self.descriptor.sources {
            writeln!(f, "  {}", source.display())?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "--- Include dirs ({}) ---",
            self.descriptor.include_dirs.len()
        )?;
        for dir in &self.descriptor.include_dirs {
            writeln!(f, "  {}", dir.display())?;
        }

        if !self.descriptor.link_flags.is_empty() {
            writeln!(f)?;
            writeln!(f, "--- Link flags ---")?;
            for flag in &self.descriptor.link_flags {
                writeln!(f, "  {flag}")?;
            }
        }

        if !self.filter.retained.is_empty() || !self.filter.pruned.is_empty() {
            writeln!(f)?;
            writeln!(f, "--- Architectures ---")?;
            let retained: Vec<String> =
                self.filter.retained.iter().map(ToString::to_string).collect();
            let pruned: Vec<String> =
                self.filter.pruned.iter().map(ToString::to_string).collect();
            writeln!(f, "  Retained: [{}]", retained.join(", "))?;
            writeln!(f, "  Pruned:   [{}]", pruned.join(", "))?;
        }

        let warnings = self.all_warnings();
        if !warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "--- Warnings ({}) ---", warnings.len())?;
            for warning in warnings {
                writeln!(f, "  {warning}")?;
            }
        }

        Ok(())
    }
}
