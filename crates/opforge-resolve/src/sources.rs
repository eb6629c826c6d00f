//! Source set assembler: the ordered list of kernel compilation units.
//!
//! Output order is load-bearing: the dispatch glue comes first and each
//! op's host wrapper precedes its device kernel, because some toolchains
//! infer relative dependency between compilation units from file order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use opforge_facts::EnvFacts;

use crate::error::{ResolveError, Result};
use crate::gate::AMPERE_GENERATION;

/// Kernel sources always compiled: dispatch glue, elementwise
/// bias/activation fusion, both normalization variants, and the
/// gated-activation fusion. Host wrapper plus device kernel per op.
pub const BASELINE_SOURCES: [&str; 9] = [
    "inference/kernels/core_ops/core_ops.cpp",
    "inference/kernels/core_ops/bias_activations/bias_activation.cpp",
    "inference/kernels/core_ops/bias_activations/bias_activation_cuda.cu",
    "inference/kernels/core_ops/layer_norm/layer_norm.cpp",
    "inference/kernels/core_ops/layer_norm/layer_norm_cuda.cu",
    "inference/kernels/core_ops/rms_norm/rms_norm.cpp",
    "inference/kernels/core_ops/rms_norm/rms_norm_cuda.cu",
    "inference/kernels/core_ops/gated_activations/gated_activation_kernels.cpp",
    "inference/kernels/core_ops/gated_activations/gated_activation_kernels_cuda.cu",
];

/// Quantized-linear kernel sources, valid only on Ampere-class hardware
/// (the FP6 path leans on generation-8 tensor-core instructions).
pub const QUANT_LINEAR_SOURCES: [&str; 2] = [
    "inference/kernels/core_ops/quant_linear/fp6_linear.cu",
    "inference/kernels/core_ops/quant_linear/quant_linear_kernels.cpp",
];

/// The assembled source set plus any degradation warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    /// Ordered, duplicate-free compilation units, each under the prefix.
    pub sources: Vec<PathBuf>,
    /// Warnings about skipped optional kernels.
    pub warnings: Vec<String>,
}

/// Assemble the ordered source list for the given environment.
///
/// The baseline set is unconditional. The quantized-linear kernels are
/// appended only when the primary toolchain is active and the device is
/// exactly Ampere-generation; a present device of any other generation
/// gets a warning (partial functionality, not a failure), while absence
/// of hardware skips them silently.
pub fn assemble_sources(facts: &EnvFacts, prefix: &Path) -> Result<SourceSet> {
    let mut relative: Vec<&str> = BASELINE_SOURCES.to_vec();
    let mut warnings = Vec::new();

    if let Some(generation) = facts.primary_toolchain_device() {
        if generation == AMPERE_GENERATION {
            relative.extend(QUANT_LINEAR_SOURCES);
        } else {
            warnings.push(format!(
                "FP6 quantized-linear kernel skipped: requires an Ampere-class \
                 (generation {AMPERE_GENERATION}) accelerator, detected generation \
                 {generation}"
            ));
        }
    }

    let sources = prefix_all(prefix, &relative)?;
    Ok(SourceSet { sources, warnings })
}

/// Prefix every relative path, rejecting duplicates.
pub(crate) fn prefix_all(prefix: &Path, relative: &[&str]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(relative.len());
    for rel in relative {
        let path = prefix.join(rel);
        if !seen.insert(path.clone()) {
            return Err(ResolveError::DuplicateSource { path });
        }
        out.push(path);
    }
    Ok(out)
}
