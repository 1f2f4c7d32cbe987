//! Metadata published to consumers of the packaged library.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::manifest::LibraryManifest;
use crate::core::options::BuildOptions;
use crate::core::recipe::Recipe;
use crate::core::settings::PlatformContext;

/// Define published for static builds.
pub const STATIC_DEFINE: &str = "GST_PLUGINS_BASE_STATIC";

/// Environment variable pointing consumers at the plugin directory.
pub const PLUGIN_PATH_VAR: &str = "GST_PLUGIN_PATH";

/// Plugin directory, relative to the package folder.
pub const PLUGIN_DIR: &str = "lib/gstreamer-1.0";

/// File name the package phase writes the metadata to.
pub const PACKAGE_INFO_FILE: &str = "package_info.json";

/// Link and compile metadata for downstream consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Libraries to link, in order
    pub libs: Vec<String>,
    /// Include directories, relative to the package folder
    pub include_dirs: Vec<PathBuf>,
    /// Library search directories
    pub lib_dirs: Vec<PathBuf>,
    /// Preprocessor defines
    pub defines: Vec<String>,
    /// Runtime environment for consumers
    pub env: BTreeMap<String, String>,
}

impl PackageInfo {
    /// Derive the metadata for a build. Pure: no filesystem access.
    pub fn derive(
        recipe: &Recipe,
        options: &BuildOptions,
        platform: &PlatformContext,
        package_folder: &Path,
    ) -> Self {
        let manifest = LibraryManifest::for_variant(recipe.variant);
        let plugin_dir = package_folder.join(PLUGIN_DIR);

        let mut info = PackageInfo {
            libs: manifest.core_libs(platform),
            include_dirs: vec![PathBuf::from("include").join("gstreamer-1.0")],
            lib_dirs: vec![PathBuf::from("lib")],
            defines: Vec::new(),
            env: BTreeMap::new(),
        };

        if options.shared {
            info.env.insert(
                PLUGIN_PATH_VAR.to_string(),
                plugin_dir.display().to_string(),
            );
        } else {
            info.defines.push(STATIC_DEFINE.to_string());
            info.lib_dirs.push(plugin_dir);
            info.libs.extend(manifest.static_plugins(platform));
        }

        info
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize package info")
    }

    /// Write `package_info.json` into the package folder.
    pub fn write(&self, package_folder: &Path) -> Result<PathBuf> {
        let path = package_folder.join(PACKAGE_INFO_FILE);
        crate::util::fs::write_string(&path, &self.to_json()?)?;
        Ok(path)
    }

    /// Read a previously written `package_info.json`.
    pub fn load(package_folder: &Path) -> Result<Self> {
        let path = package_folder.join(PACKAGE_INFO_FILE);
        let content = crate::util::fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse package info: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::{GL_LIBRARY, OPENGL_PLUGIN};
    use crate::core::recipe::RecipeVariant;
    use crate::test_support::{all_platforms, linux_gcc};
    use tempfile::TempDir;

    fn derive(options: BuildOptions, platform: &PlatformContext) -> PackageInfo {
        PackageInfo::derive(
            &Recipe::gst_plugins_base(),
            &options,
            platform,
            Path::new("/pkg"),
        )
    }

    #[test]
    fn test_static_build_metadata() {
        for platform in all_platforms() {
            let info = derive(BuildOptions::static_(), &platform);

            assert!(info.libs.contains(&"gstplayback".to_string()));
            assert_eq!(info.defines, vec![STATIC_DEFINE.to_string()]);
            assert!(info.env.is_empty());
            assert_eq!(
                info.lib_dirs,
                vec![PathBuf::from("lib"), PathBuf::from("/pkg/lib/gstreamer-1.0")]
            );
        }
    }

    #[test]
    fn test_shared_build_metadata() {
        for platform in all_platforms() {
            let info = derive(BuildOptions::shared(), &platform);

            assert!(!info.defines.contains(&STATIC_DEFINE.to_string()));
            assert!(!info.libs.contains(&"gstplayback".to_string()));
            assert_eq!(
                info.env.get(PLUGIN_PATH_VAR).map(String::as_str),
                Some("/pkg/lib/gstreamer-1.0")
            );
            assert_eq!(info.lib_dirs, vec![PathBuf::from("lib")]);
        }
    }

    #[test]
    fn test_core_libs_come_first() {
        let info = derive(BuildOptions::static_(), &linux_gcc());
        assert_eq!(info.libs[0], "gstallocators-1.0");
        let first_plugin = info.libs.iter().position(|l| l == "gstadder").unwrap();
        assert!(info.libs[..first_plugin].iter().all(|l| l.ends_with("-1.0")));
    }

    #[test]
    fn test_linux_exclusions_hold_for_every_option_set() {
        for shared in [true, false] {
            for fpic in [true, false] {
                let options = BuildOptions::new(shared, fpic);

                let plugin_variant = PackageInfo::derive(
                    &Recipe::gst_plugins_base(),
                    &options,
                    &linux_gcc(),
                    Path::new("/pkg"),
                );
                assert!(!plugin_variant.libs.contains(&OPENGL_PLUGIN.to_string()));

                let library_variant = PackageInfo::derive(
                    &Recipe::gst_plugins_base().with_variant(RecipeVariant::GlLibrary),
                    &options,
                    &linux_gcc(),
                    Path::new("/pkg"),
                );
                assert!(!library_variant.libs.contains(&GL_LIBRARY.to_string()));
            }
        }
    }

    #[test]
    fn test_include_dirs() {
        let info = derive(BuildOptions::default(), &linux_gcc());
        assert_eq!(info.include_dirs, vec![PathBuf::from("include/gstreamer-1.0")]);
    }

    #[test]
    fn test_write_and_load() {
        let tmp = TempDir::new().unwrap();
        let info = derive(BuildOptions::shared(), &linux_gcc());

        let path = info.write(tmp.path()).unwrap();
        assert!(path.ends_with(PACKAGE_INFO_FILE));
        assert_eq!(PackageInfo::load(tmp.path()).unwrap(), info);
    }
}
