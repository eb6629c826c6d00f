//! Include directory and link flag assembly.
//!
//! Unlike sources, include paths are generation-independent: headers are
//! shared and only which compilation units get built varies.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::sources::prefix_all;

/// Include directories handed to the compiler, in order.
pub const INCLUDE_DIRS: [&str; 7] = [
    "inference/kernels/core_ops/bias_activations",
    "inference/kernels/core_ops/blas_kernels",
    "inference/kernels/core_ops/layer_norm",
    "inference/kernels/core_ops/rms_norm",
    "inference/kernels/core_ops/gated_activations",
    "inference/kernels/core_ops/quant_linear",
    "inference/kernels/includes",
];

/// Assemble the ordered include directory list, prefixed like sources.
pub fn assemble_includes(prefix: &Path) -> Result<Vec<PathBuf>> {
    prefix_all(prefix, &INCLUDE_DIRS)
}

/// Extra linker flags for this kernel set. Empty is the common case and a
/// valid one; the shape stays uniform so callers never special-case it.
pub fn assemble_link_flags() -> Vec<String> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_are_prefixed_in_order() {
        let dirs = assemble_includes(Path::new("opforge")).unwrap();
        assert_eq!(dirs.len(), INCLUDE_DIRS.len());
        for (dir, rel) in dirs.iter().zip(INCLUDE_DIRS) {
            assert_eq!(dir, &Path::new("opforge").join(rel));
            assert!(dir.starts_with("opforge"));
        }
    }

    #[test]
    fn parent_prefix_applies_uniformly() {
        let dirs = assemble_includes(Path::new("..")).unwrap();
        assert!(dirs.iter().all(|d| d.starts_with("..")));
    }

    #[test]
    fn link_flags_empty_for_this_kernel_set() {
        assert!(assemble_link_flags().is_empty());
    }
}
