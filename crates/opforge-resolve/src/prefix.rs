//! Path resolver: determines the filesystem prefix under which the kernel
//! sources live.
//!
//! The build can be invoked from inside a checked-out source tree (the
//! `opforge` project directory sits directly under the working directory)
//! or from a packaging context one level up. Historically a single
//! directory-existence probe disambiguated the two; [`PrefixMode`] keeps
//! that probe as the default while letting callers that know their layout
//! state it explicitly.

use std::path::{Path, PathBuf};

use crate::error::{ResolveError, Result};

/// Name of the project source directory probed for under the working
/// directory.
pub const PROJECT_DIR: &str = "opforge";

/// How the source-tree prefix is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefixMode {
    /// Probe for the project directory under the working directory;
    /// fall back to the parent if absent.
    #[default]
    Auto,
    /// Building from inside the checked-out tree: prefix is the project
    /// directory name.
    InTree,
    /// Building from a packaging context one level above the sources:
    /// prefix is the parent directory.
    Packaging,
}

/// Resolve the prefix prepended to every source and include path.
///
/// Re-evaluated on every call: directory state can differ between
/// invocations (CI matrix builds run from different working directories),
/// so the result is never cached across `cwd` values.
pub fn resolve_prefix(cwd: &Path, mode: PrefixMode) -> Result<PathBuf> {
    if !cwd.is_dir() {
        return Err(ResolveError::BadWorkingDir {
            path: cwd.to_path_buf(),
        });
    }
    let prefix = match mode {
        PrefixMode::InTree => PathBuf::from(PROJECT_DIR),
        PrefixMode::Packaging => PathBuf::from(".."),
        PrefixMode::Auto => {
            if cwd.join(PROJECT_DIR).is_dir() {
                PathBuf::from(PROJECT_DIR)
            } else {
                PathBuf::from("..")
            }
        }
    };
    Ok(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_picks_project_dir_when_present() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(PROJECT_DIR)).unwrap();
        let prefix = resolve_prefix(dir.path(), PrefixMode::Auto).unwrap();
        assert_eq!(prefix, PathBuf::from(PROJECT_DIR));
    }

    #[test]
    fn auto_falls_back_to_parent_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = resolve_prefix(dir.path(), PrefixMode::Auto).unwrap();
        assert_eq!(prefix, PathBuf::from(".."));
    }

    #[test]
    fn auto_ignores_plain_file_with_project_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_DIR), b"not a dir").unwrap();
        let prefix = resolve_prefix(dir.path(), PrefixMode::Auto).unwrap();
        assert_eq!(prefix, PathBuf::from(".."));
    }

    #[test]
    fn explicit_modes_bypass_the_probe() {
        let dir = tempfile::tempdir().unwrap();
        // No project directory exists, yet InTree still names it.
        let in_tree = resolve_prefix(dir.path(), PrefixMode::InTree).unwrap();
        assert_eq!(in_tree, PathBuf::from(PROJECT_DIR));
        let packaging = resolve_prefix(dir.path(), PrefixMode::Packaging).unwrap();
        assert_eq!(packaging, PathBuf::from(".."));
    }

    #[test]
    fn reevaluated_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let before = resolve_prefix(dir.path(), PrefixMode::Auto).unwrap();
        assert_eq!(before, PathBuf::from(".."));
        std::fs::create_dir(dir.path().join(PROJECT_DIR)).unwrap();
        let after = resolve_prefix(dir.path(), PrefixMode::Auto).unwrap();
        assert_eq!(after, PathBuf::from(PROJECT_DIR));
    }

    #[test]
    fn missing_cwd_is_an_error() {
        let err = resolve_prefix(Path::new("/nonexistent/cwd"), PrefixMode::Auto).unwrap_err();
        assert!(matches!(err, ResolveError::BadWorkingDir { .. }));
    }
}
