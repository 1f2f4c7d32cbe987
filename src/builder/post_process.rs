//! Post-install fixups of the installed tree.
//!
//! gst-plugins-base 1.16 installs its static archives as `lib<name>.a` when
//! built with Visual Studio, where consumers expect `<name>.lib`.

use std::path::Path;

use anyhow::Result;

use crate::core::settings::{CompilerFamily, PlatformContext};
use crate::util::fs::DirScope;

/// Directories under the package folder holding static archives.
pub const LIBRARY_DIRS: &[&str] = &["lib", "lib/gstreamer-1.0"];

/// New name for a static archive on `compiler`, or `None` if it keeps its
/// name.
pub fn renamed_library(file_name: &str, compiler: CompilerFamily) -> Option<String> {
    if compiler != CompilerFamily::Msvc {
        return None;
    }
    let stem = file_name.strip_prefix("lib")?.strip_suffix(".a")?;
    if stem.is_empty() {
        return None;
    }
    Some(format!("{}.lib", stem))
}

/// Rename the static archives in one directory. Returns the new names.
pub fn fix_library_names(scope: &DirScope, platform: &PlatformContext) -> Result<Vec<String>> {
    let mut renamed = Vec::new();
    if !platform.is_msvc() || !scope.exists() {
        return Ok(renamed);
    }

    for old in scope.glob("*.a")? {
        if let Some(new) = renamed_library(&old, platform.compiler.family) {
            tracing::info!("rename {} into {}", old, new);
            scope.rename(&old, &new)?;
            renamed.push(new);
        }
    }

    Ok(renamed)
}

/// Apply [`fix_library_names`] to every library directory of a package.
pub fn fix_package_library_names(
    package_dir: &Path,
    platform: &PlatformContext,
) -> Result<Vec<String>> {
    let mut renamed = Vec::new();
    for dir in LIBRARY_DIRS {
        renamed.extend(fix_library_names(
            &DirScope::new(package_dir.join(dir)),
            platform,
        )?);
    }
    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{linux_gcc, windows_msvc};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_renamed_library() {
        assert_eq!(
            renamed_library("libgstvideo-1.0.a", CompilerFamily::Msvc),
            Some("gstvideo-1.0.lib".to_string())
        );
        for family in [
            CompilerFamily::Gcc,
            CompilerFamily::Clang,
            CompilerFamily::AppleClang,
        ] {
            assert_eq!(renamed_library("libgstvideo-1.0.a", family), None);
        }
        assert_eq!(renamed_library("gstvideo.lib", CompilerFamily::Msvc), None);
        assert_eq!(renamed_library("lib.a", CompilerFamily::Msvc), None);
    }

    #[test]
    fn test_fix_package_library_names_msvc() {
        let tmp = TempDir::new().unwrap();
        let lib = tmp.path().join("lib");
        let plugins = lib.join("gstreamer-1.0");
        fs::create_dir_all(&plugins).unwrap();
        fs::write(lib.join("libgstaudio-1.0.a"), "").unwrap();
        fs::write(plugins.join("libgstvolume.a"), "").unwrap();
        fs::write(lib.join("gstapp-1.0.dll"), "").unwrap();

        let renamed = fix_package_library_names(tmp.path(), &windows_msvc("15")).unwrap();

        assert_eq!(renamed, vec!["gstaudio-1.0.lib", "gstvolume.lib"]);
        assert!(lib.join("gstaudio-1.0.lib").exists());
        assert!(plugins.join("gstvolume.lib").exists());
        assert!(!lib.join("libgstaudio-1.0.a").exists());
        assert!(lib.join("gstapp-1.0.dll").exists());
    }

    #[test]
    fn test_fix_library_names_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let lib = tmp.path().join("lib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("libgsttag-1.0.a"), "").unwrap();

        let platform = windows_msvc("15");
        fix_package_library_names(tmp.path(), &platform).unwrap();
        let second = fix_package_library_names(tmp.path(), &platform).unwrap();

        assert!(second.is_empty());
        assert!(lib.join("gsttag-1.0.lib").exists());
    }

    #[test]
    fn test_no_op_for_gcc() {
        let tmp = TempDir::new().unwrap();
        let lib = tmp.path().join("lib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("libgsttag-1.0.a"), "").unwrap();

        let renamed = fix_package_library_names(tmp.path(), &linux_gcc()).unwrap();

        assert!(renamed.is_empty());
        assert!(lib.join("libgsttag-1.0.a").exists());
    }

    #[test]
    fn test_missing_directory_is_a_no_op() {
        let tmp = TempDir::new().unwrap();
        let renamed = fix_package_library_names(tmp.path(), &windows_msvc("15")).unwrap();
        assert!(renamed.is_empty());
    }
}
