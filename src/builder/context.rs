//! Build context - staging directories and dependency locations.

use std::path::{Path, PathBuf};

use crate::core::recipe::{BUILD_SUBFOLDER, SOURCE_SUBFOLDER};

/// Directories a recipe run works in.
///
/// Everything lives under the working directory except the package folder,
/// which is the install prefix and may be anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Staging area owned by this run
    pub working_dir: PathBuf,

    /// Canonical source root (`<working_dir>/source_subfolder`)
    pub source_dir: PathBuf,

    /// Meson build directory (`<working_dir>/build_subfolder`)
    pub build_dir: PathBuf,

    /// Install prefix
    pub package_dir: PathBuf,

    /// Directory holding `*.patch` files
    pub patches_dir: PathBuf,

    /// Parallel job count
    pub jobs: Option<usize>,

    /// Verbose output
    pub verbose: bool,
}

impl BuildContext {
    /// Create a build context rooted at `working_dir`.
    pub fn new(working_dir: impl Into<PathBuf>, package_dir: impl Into<PathBuf>) -> Self {
        let working_dir = working_dir.into();
        BuildContext {
            source_dir: working_dir.join(SOURCE_SUBFOLDER),
            build_dir: working_dir.join(BUILD_SUBFOLDER),
            patches_dir: working_dir.join("patches"),
            package_dir: package_dir.into(),
            working_dir,
            jobs: None,
            verbose: false,
        }
    }

    /// Set the patches directory.
    pub fn with_patches_dir(mut self, patches_dir: impl Into<PathBuf>) -> Self {
        self.patches_dir = patches_dir.into();
        self
    }

    /// Set job count.
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Set verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Whether Meson has already set up the build directory.
    pub fn is_configured(&self) -> bool {
        self.build_dir.join("meson-private").exists()
    }
}

/// Root folders of the packaged dependencies, as handed over by the
/// dependency provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRoots {
    pub glib: PathBuf,
    pub gstreamer: PathBuf,
    /// Whether gstreamer itself was built as a shared library
    pub gstreamer_shared: bool,
}

impl DependencyRoots {
    pub fn new(glib: impl Into<PathBuf>, gstreamer: impl Into<PathBuf>, gstreamer_shared: bool) -> Self {
        DependencyRoots {
            glib: glib.into(),
            gstreamer: gstreamer.into(),
            gstreamer_shared,
        }
    }

    /// `lib/pkgconfig` under a dependency root.
    pub fn pkg_config_dir(root: &Path) -> PathBuf {
        root.join("lib").join("pkgconfig")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout() {
        let ctx = BuildContext::new("/work", "/pkg");
        assert_eq!(ctx.source_dir, PathBuf::from("/work/source_subfolder"));
        assert_eq!(ctx.build_dir, PathBuf::from("/work/build_subfolder"));
        assert_eq!(ctx.patches_dir, PathBuf::from("/work/patches"));
        assert_eq!(ctx.package_dir, PathBuf::from("/pkg"));
    }

    #[test]
    fn test_is_configured() {
        let tmp = TempDir::new().unwrap();
        let ctx = BuildContext::new(tmp.path(), tmp.path().join("pkg"));
        assert!(!ctx.is_configured());

        std::fs::create_dir_all(ctx.build_dir.join("meson-private")).unwrap();
        assert!(ctx.is_configured());
    }
}
