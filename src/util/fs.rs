//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

use crate::core::errors::RecipeError;

/// A directory that relative file operations are resolved against.
///
/// Used instead of changing the process working directory: nothing global
/// is mutated, so there is nothing to restore on any exit path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirScope {
    root: PathBuf,
}

impl DirScope {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirScope { root: root.into() }
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Resolve a path relative to the scope.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// File names (not paths) of files directly in the scope matching
    /// `pattern`, sorted.
    pub fn glob(&self, pattern: &str) -> Result<Vec<String>> {
        let mut names: Vec<String> = glob_files(&self.root, &[pattern.to_string()])?
            .into_iter()
            .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Rename a file within the scope. A missing source is an error.
    pub fn rename(&self, from: &str, to: &str) -> Result<()> {
        move_file(&self.path(from), &self.path(to))
    }
}

/// Move a file, failing with [`RecipeError::MissingFile`] if it is absent.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(RecipeError::MissingFile(from.to_path_buf()).into());
    }
    fs::rename(from, to).with_context(|| {
        format!("failed to move {} to {}", from.display(), to.display())
    })
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Copy files matching `pattern` from `src` into `dst`. Returns the copied
/// destination paths.
pub fn copy_matching(src: &Path, pattern: &str, dst: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for path in glob_files(src, &[pattern.to_string()])? {
        let Some(name) = path.file_name() else {
            continue;
        };
        ensure_dir(dst)?;
        let target = dst.join(name);
        fs::copy(&path, &target).with_context(|| {
            format!("failed to copy {} to {}", path.display(), target.display())
        })?;
        copied.push(target);
    }
    Ok(copied)
}

/// Find files matching glob patterns relative to a base directory.
pub fn glob_files(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    for pattern in patterns {
        let full_pattern = base.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        for entry in glob(&pattern_str)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
        {
            match entry {
                Ok(path) => {
                    if path.is_file() {
                        results.push(path);
                    }
                }
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                }
            }
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}
