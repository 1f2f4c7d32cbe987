//! Patch discovery and application.
//!
//! Patches are the `*.patch` files in the recipe's patches directory,
//! applied in lexicographic file-name order against the source root.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::fs::glob_files;
use crate::util::process::ProcessBuilder;

/// Applies a single patch file to a source tree.
pub trait PatchApplier {
    fn apply(&self, patch: &Path, source_dir: &Path) -> Result<()>;
}

/// `git apply`, checked first so a patch that does not apply cleanly fails
/// before touching the tree.
#[derive(Debug, Default, Clone)]
pub struct GitApply;

impl PatchApplier for GitApply {
    fn apply(&self, patch: &Path, source_dir: &Path) -> Result<()> {
        // git runs inside the source tree
        let patch = std::path::absolute(patch)
            .with_context(|| format!("invalid patch path '{}'", patch.display()))?;
        let patch = patch.as_path();

        ProcessBuilder::new("git")
            .args(["apply", "--check"])
            .arg(patch)
            .cwd(source_dir)
            .exec_and_check()
            .with_context(|| format!("patch '{}' will not apply cleanly", patch.display()))?;

        ProcessBuilder::new("git")
            .arg("apply")
            .arg(patch)
            .cwd(source_dir)
            .exec_and_check()
            .with_context(|| format!("failed to apply patch '{}'", patch.display()))?;

        Ok(())
    }
}

/// An ordered set of patches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSet {
    patches: Vec<PathBuf>,
}

impl PatchSet {
    /// Collect `*.patch` from a directory. A missing directory is an empty set.
    pub fn discover(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            tracing::debug!("No patches directory at {}", dir.display());
            return Ok(PatchSet::default());
        }
        Ok(PatchSet::from_files(glob_files(dir, &["*.patch".to_string()])?))
    }

    /// Build a set from arbitrary files, ordering them by file name.
    pub fn from_files(mut patches: Vec<PathBuf>) -> Self {
        patches.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        PatchSet { patches }
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.patches.iter().map(PathBuf::as_path)
    }

    /// Apply every patch in order. The first failure aborts.
    pub fn apply(&self, source_dir: &Path, applier: &dyn PatchApplier) -> Result<()> {
        for patch in &self.patches {
            tracing::info!("applying patch \"{}\"", patch.display());
            applier.apply(patch, source_dir)?;
        }
        Ok(())
    }
}
