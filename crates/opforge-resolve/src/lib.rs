//! Kernel source-set and compatibility resolution core for opforge.
//!
//! Given a snapshot of environment facts, this crate decides whether the
//! native inference-kernel extension can be built, prunes requested target
//! architectures to the supported subset, and assembles the exact source
//! files, include directories, and link flags to hand to the external
//! compiler invocation.
//!
//! Every component is a pure function of its declared inputs. Environment
//! variability (no accelerator, old hardware, toolkit skew) travels as
//! verdicts and warnings in return values, never as errors; concurrent
//! resolution calls need no coordination.

pub mod descriptor;
pub mod error;
pub mod filter;
pub mod gate;
pub mod includes;
pub mod prefix;
pub mod sources;

pub use descriptor::{resolve, BuildDescriptor, Resolution};
pub use error::{ResolveError, Result};
pub use filter::{filter_architectures, ArchSpec, FilterOutcome};
pub use gate::{evaluate, evaluate_with_toggle, BuildToggle, CompatibilityVerdict};
pub use prefix::{resolve_prefix, PrefixMode};
