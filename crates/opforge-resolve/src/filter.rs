//! Architecture filter: prunes requested target architectures down to the
//! supported subset.
//!
//! Used on multi-architecture builds (e.g. a cluster with mixed hardware)
//! where the caller requests one target per device family. The threshold
//! matches the compatibility gate's minimum so a generation that fails the
//! gate is also pruned here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gate::MIN_DEVICE_GENERATION;

/// A requested target architecture. Insertion order in the request list is
/// priority order and is preserved through filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchSpec {
    /// Hardware generation digit.
    pub generation: u32,
    /// Optional human label (e.g. a full compute-capability string such as
    /// `"8.6"`), carried through untouched.
    #[serde(default)]
    pub label: Option<String>,
}

impl ArchSpec {
    /// A bare generation with no label.
    pub fn generation(generation: u32) -> Self {
        Self {
            generation,
            label: None,
        }
    }
}

impl fmt::Display for ArchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label}"),
            None => write!(f, "{}", self.generation),
        }
    }
}

/// The filter's output: an exact partition of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Architectures that will be built, in request order.
    pub retained: Vec<ArchSpec>,
    /// Architectures below the supported floor, in request order.
    pub pruned: Vec<ArchSpec>,
    /// One batched warning listing every pruned entry, if any were pruned.
    pub warning: Option<String>,
}

/// Partition the requested architectures into supported and unsupported
/// subsets, preserving order within each.
pub fn filter_architectures(requested: &[ArchSpec]) -> FilterOutcome {
    let mut retained = Vec::new();
    let mut pruned = Vec::new();
    for arch in requested {
        if arch.generation >= MIN_DEVICE_GENERATION {
            retained.push(arch.clone());
        } else {
            pruned.push(arch.clone());
        }
    }

    // One warning for the whole batch, not one per entry.
    let warning = if pruned.is_empty() {
        None
    } else {
        let listed: Vec<String> = pruned.iter().map(ToString::to_string).collect();
        Some(format!(
            "filtered unsupported compute architectures: [{}]",
            listed.join(", ")
        ))
    };

    FilterOutcome {
        retained,
        pruned,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gens(specs: &[ArchSpec]) -> Vec<u32> {
        specs.iter().map(|a| a.generation).collect()
    }

    #[test]
    fn partitions_exactly_and_preserves_order() {
        let requested: Vec<ArchSpec> = [5, 8, 3, 6, 7]
            .iter()
            .map(|&g| ArchSpec::generation(g))
            .collect();
        let outcome = filter_architectures(&requested);
        assert_eq!(gens(&outcome.retained), vec![8, 6, 7]);
        assert_eq!(gens(&outcome.pruned), vec![5, 3]);
        assert_eq!(
            outcome.retained.len() + outcome.pruned.len(),
            requested.len()
        );
    }

    #[test]
    fn threshold_is_inclusive_at_six() {
        let outcome = filter_architectures(&[ArchSpec::generation(6)]);
        assert_eq!(gens(&outcome.retained), vec![6]);
        assert!(outcome.pruned.is_empty());
        assert!(outcome.warning.is_none());
    }

    #[test]
    fn one_batched_warning_lists_all_pruned() {
        let requested = vec![
            ArchSpec::generation(3),
            ArchSpec::generation(7),
            ArchSpec {
                generation: 5,
                label: Some("5.2".into()),
            },
        ];
        let outcome = filter_architectures(&requested);
        let warning = outcome.warning.unwrap();
        assert!(warning.contains('3'));
        assert!(warning.contains("5.2"));
        assert!(!warning.contains('7'));
    }

    #[test]
    fn empty_request_yields_empty_outcome() {
        let outcome = filter_architectures(&[]);
        assert!(outcome.retained.is_empty());
        assert!(outcome.pruned.is_empty());
        assert!(outcome.warning.is_none());
    }

    #[test]
    fn merge_by_original_index_reconstructs_input() {
        let requested: Vec<ArchSpec> = [6, 2, 9, 4, 7]
            .iter()
            .map(|&g| ArchSpec::generation(g))
            .collect();
        let outcome = filter_architectures(&requested);

        // Order-preserving merge: walk the input, pulling from whichever
        // partition the entry landed in.
        let mut retained = outcome.retained.iter();
        let mut pruned = outcome.pruned.iter();
        let merged: Vec<ArchSpec> = requested
            .iter()
            .map(|arch| {
                if arch.generation >= MIN_DEVICE_GENERATION {
                    retained.next().unwrap().clone()
                } else {
                    pruned.next().unwrap().clone()
                }
            })
            .collect();
        assert_eq!(merged, requested);
    }
}
