//! Best-effort live detection of environment facts.
//!
//! Detection never fails: a probe that comes up empty yields `None` (or
//! `false`), and the resolution core treats absence as a narrowing of which
//! rules apply, not as an error.
//!
//! Overrides for facts this tool cannot query directly (no driver binding):
//! - `OPFORGE_DEVICE_GENERATION` — accelerator generation digit.
//! - `OPFORGE_LIBRARY_TOOLKIT` — toolkit version the host library was
//!   built against (e.g. `11.8`).

use std::process::Command;
use std::sync::OnceLock;

use crate::facts::{DeviceFacts, EnvFacts};
use crate::version::ToolkitVersion;

static DETECTED: OnceLock<EnvFacts> = OnceLock::new();

impl EnvFacts {
    /// Probe the local machine for environment facts.
    ///
    /// The result is computed once per process and cached; environment facts
    /// do not change within a single build process lifetime. Facts built
    /// explicitly (fixtures, tests) never touch this cache.
    pub fn detect() -> &'static EnvFacts {
        DETECTED.get_or_init(detect_uncached)
    }
}

fn detect_uncached() -> EnvFacts {
    let system_toolkit = probe_nvcc_version().or_else(version_from_env);
    let library_toolkit = std::env::var("OPFORGE_LIBRARY_TOOLKIT")
        .ok()
        .and_then(|v| v.parse().ok());
    let device = std::env::var("OPFORGE_DEVICE_GENERATION")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(|generation| DeviceFacts { generation });
    let rocm_variant =
        std::env::var_os("ROCM_PATH").is_some() || std::env::var_os("HIP_PATH").is_some();

    EnvFacts {
        runtime_available: library_toolkit.is_some(),
        rocm_variant,
        device,
        system_toolkit,
        library_toolkit,
    }
}

/// Run `nvcc --version` and parse the `release X.Y` token from its output.
fn probe_nvcc_version() -> Option<ToolkitVersion> {
    let output = Command::new("nvcc").arg("--version").output().ok()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_nvcc_output(&stdout)
}

fn parse_nvcc_output(output: &str) -> Option<ToolkitVersion> {
    // Expected line: "Cuda compilation tools, release 11.8, V11.8.89"
    let line = output.lines().find(|l| l.contains("release"))?;
    let after = line.split("release").nth(1)?;
    let token = after.trim_start().split([',', ' ']).next()?;
    token.parse().ok()
}

fn version_from_env() -> Option<ToolkitVersion> {
    std::env::var("CUDA_VERSION").ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nvcc_release_line() {
        let output = "nvcc: NVIDIA (R) Cuda compiler driver\n\
                      Copyright (c) 2005-2022 NVIDIA Corporation\n\
                      Built on Wed_Sep_21_10:33:58_PDT_2022\n\
                      Cuda compilation tools, release 11.8, V11.8.89\n\
                      Build cuda_11.8.r11.8/compiler.31833905_0\n";
        assert_eq!(
            parse_nvcc_output(output),
            Some(ToolkitVersion::new(11, 8))
        );
    }

    #[test]
    fn nvcc_output_without_release_line() {
        assert_eq!(parse_nvcc_output("command not found"), None);
        assert_eq!(parse_nvcc_output(""), None);
    }

    #[test]
    fn detect_is_cached() {
        let first = EnvFacts::detect();
        let second = EnvFacts::detect();
        assert!(std::ptr::eq(first, second));
    }
}
