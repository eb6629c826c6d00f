//! Compatibility gate: decides whether the native kernel build should
//! proceed for a given environment.
//!
//! The gate is advisory. Every applicable rule is evaluated and every
//! failure contributes its own warning, so the caller sees all reasons a
//! build would be unsafe in one pass. The caller decides whether a negative
//! verdict aborts the build or merely skips the optional extension.

use opforge_facts::EnvFacts;

/// Minimum supported hardware generation (Pascal-class). Anything older
/// predates the instruction set the kernels assume.
pub const MIN_DEVICE_GENERATION: u32 = 6;

/// Generation at which toolkit 11+ becomes mandatory (Ampere-class).
pub const AMPERE_GENERATION: u32 = 8;

/// Minimum toolkit major version for Ampere-class and newer devices.
pub const MIN_AMPERE_TOOLKIT_MAJOR: u32 = 11;

/// The gate's verdict: a pass/fail bit plus the warnings explaining every
/// failed rule. Warnings are data, not log side effects; a thin adapter at
/// the caller's boundary may forward them to a log sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityVerdict {
    /// Whether the build is considered safe to proceed.
    pub compatible: bool,
    /// One human-readable warning per failed rule.
    pub warnings: Vec<String>,
}

impl CompatibilityVerdict {
    fn pass() -> Self {
        Self {
            compatible: true,
            warnings: Vec::new(),
        }
    }

    fn fail(warning: impl Into<String>) -> Self {
        Self {
            compatible: false,
            warnings: vec![warning.into()],
        }
    }
}

/// External override of the gate, recovered from the build-variable toggle
/// the packaging layer exposes (`OPFORGE_BUILD_CORE_OPS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildToggle {
    /// Build disabled regardless of the environment.
    ForceOff,
    /// Build forced on; hardware/toolkit rules are skipped.
    ForceOn,
}

impl BuildToggle {
    /// Interpret a build-variable value: `"0"` disables, `"1"` forces,
    /// anything else means no override.
    pub fn from_env_value(value: &str) -> Option<Self> {
        match value.trim() {
            "0" => Some(Self::ForceOff),
            "1" => Some(Self::ForceOn),
            _ => None,
        }
    }
}

/// Evaluate every applicable compatibility rule against the facts.
pub fn evaluate(facts: &EnvFacts) -> CompatibilityVerdict {
    // Rule 1: without the host numerical runtime nothing can be built or
    // loaded. Short-circuits; no further rules are meaningful.
    if !facts.runtime_available {
        return CompatibilityVerdict::fail(
            "numerical runtime is not available; install it before pre-compiling \
             the inference kernels",
        );
    }

    let mut warnings = Vec::new();

    // Rule 2: generation thresholds apply only on the primary toolchain
    // path with a device present. The ROCm variant versions itself
    // differently and is exempt.
    if let Some(generation) = facts.primary_toolchain_device() {
        if generation < MIN_DEVICE_GENERATION {
            warnings.push(format!(
                "accelerator generation {generation} is too old; inference kernels \
                 require generation {MIN_DEVICE_GENERATION} (Pascal-class) or newer"
            ));
        }
        if generation >= AMPERE_GENERATION && !toolkits_support_ampere(facts) {
            warnings.push(format!(
                "Ampere-class and newer accelerators require toolkit \
                 {MIN_AMPERE_TOOLKIT_MAJOR}+ for both the system install and the \
                 numerical library build"
            ));
        }
    }

    CompatibilityVerdict {
        compatible: warnings.is_empty(),
        warnings,
    }
}

/// Evaluate the gate with an optional external toggle applied first.
pub fn evaluate_with_toggle(
    facts: &EnvFacts,
    toggle: Option<BuildToggle>,
) -> CompatibilityVerdict {
    match toggle {
        Some(BuildToggle::ForceOff) => {
            CompatibilityVerdict::fail("kernel build disabled by build variable")
        }
        Some(BuildToggle::ForceOn) => CompatibilityVerdict::pass(),
        None => evaluate(facts),
    }
}

/// Both the system toolkit and the library's build toolkit must be
/// confirmed at major >= 11. An unknown version cannot be confirmed.
fn toolkits_support_ampere(facts: &EnvFacts) -> bool {
    let system_ok = facts
        .system_toolkit
        .is_some_and(|v| v.major >= MIN_AMPERE_TOOLKIT_MAJOR);
    let library_ok = facts
        .library_toolkit
        .is_some_and(|v| v.major >= MIN_AMPERE_TOOLKIT_MAJOR);
    system_ok && library_ok
}
