//! Implementation of `gstrecipe package`.

use std::path::PathBuf;

use anyhow::Result;

use crate::builder::configure::resolve_configuration;
use crate::builder::context::{BuildContext, DependencyRoots};
use crate::builder::meson::BuildTool;
use crate::builder::post_process::fix_package_library_names;
use crate::core::options::BuildOptions;
use crate::core::package_info::PackageInfo;
use crate::core::recipe::Recipe;
use crate::core::settings::PlatformContext;
use crate::util::fs::copy_matching;

/// License files copied from the source root into `<package>/licenses`.
pub const LICENSE_PATTERNS: &[&str] = &["COPYING*", "LICENSE*"];

/// What the package phase produced.
#[derive(Debug, Clone)]
pub struct PackageResult {
    pub info: PackageInfo,
    /// Where the metadata was written
    pub info_path: PathBuf,
    /// Libraries renamed for MSVC
    pub renamed: Vec<String>,
    pub licenses: Vec<PathBuf>,
}

/// Install into the package folder and publish the metadata.
///
/// The configuration is resolved again rather than carried over from the
/// build phase; it is a pure function of the same inputs.
pub fn package(
    recipe: &Recipe,
    platform: &PlatformContext,
    options: &BuildOptions,
    deps: &DependencyRoots,
    ctx: &BuildContext,
    tool: &dyn BuildTool,
) -> Result<PackageResult> {
    let licenses = copy_licenses(ctx)?;

    let config = resolve_configuration(platform, options, deps, ctx)?;
    tool.configure(ctx, &config)?;
    tool.install(ctx, &config)?;

    let renamed = fix_package_library_names(&ctx.package_dir, platform)?;

    let info = PackageInfo::derive(
        recipe,
        &options.for_platform(platform),
        platform,
        &ctx.package_dir,
    );
    let info_path = info.write(&ctx.package_dir)?;
    tracing::info!("Packaged {} into {}", recipe, ctx.package_dir.display());

    Ok(PackageResult {
        info,
        info_path,
        renamed,
        licenses,
    })
}

fn copy_licenses(ctx: &BuildContext) -> Result<Vec<PathBuf>> {
    let dest = ctx.package_dir.join("licenses");
    let mut copied = Vec::new();
    for pattern in LICENSE_PATTERNS {
        copied.extend(copy_matching(&ctx.source_dir, pattern, &dest)?);
    }
    if copied.is_empty() {
        tracing::warn!("no license files found in {}", ctx.source_dir.display());
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::package_info::PACKAGE_INFO_FILE;
    use crate::test_support::{linux_gcc, static_deps, windows_msvc, RecordingBuildTool};
    use std::fs;
    use tempfile::TempDir;

    fn workspace() -> (TempDir, BuildContext) {
        let tmp = TempDir::new().unwrap();
        let ctx = BuildContext::new(tmp.path(), tmp.path().join("package"));
        fs::create_dir_all(&ctx.source_dir).unwrap();
        fs::write(ctx.source_dir.join("COPYING"), "LGPL").unwrap();
        (tmp, ctx)
    }

    #[test]
    fn test_package_linux() {
        let (_tmp, ctx) = workspace();
        let tool = RecordingBuildTool::new()
            .with_installed_files(&["lib/libgstapp-1.0.a", "include/gstreamer-1.0/gst/app/app.h"]);

        let result = package(
            &Recipe::gst_plugins_base(),
            &linux_gcc(),
            &BuildOptions::static_(),
            &static_deps(),
            &ctx,
            &tool,
        )
        .unwrap();

        assert_eq!(tool.steps(), vec!["configure", "install"]);
        assert!(result.renamed.is_empty());
        assert!(ctx.package_dir.join("lib/libgstapp-1.0.a").exists());
        assert!(ctx.package_dir.join("licenses/COPYING").exists());
        assert_eq!(result.info_path, ctx.package_dir.join(PACKAGE_INFO_FILE));

        let loaded = PackageInfo::load(&ctx.package_dir).unwrap();
        assert_eq!(loaded, result.info);
    }

    #[test]
    fn test_package_msvc_renames_libraries() {
        let (_tmp, ctx) = workspace();
        let tool = RecordingBuildTool::new().with_installed_files(&[
            "lib/libgstapp-1.0.a",
            "lib/gstreamer-1.0/libgstplayback.a",
        ]);

        let result = package(
            &Recipe::gst_plugins_base(),
            &windows_msvc("16"),
            &BuildOptions::static_(),
            &static_deps(),
            &ctx,
            &tool,
        )
        .unwrap();

        assert_eq!(result.renamed, vec!["gstapp-1.0.lib", "gstplayback.lib"]);
        assert!(ctx.package_dir.join("lib/gstapp-1.0.lib").exists());
        assert!(ctx.package_dir.join("lib/gstreamer-1.0/gstplayback.lib").exists());
    }

    #[test]
    fn test_configure_matches_build_phase() {
        let (_tmp, ctx) = workspace();
        let tool = RecordingBuildTool::new();
        let options = BuildOptions::default();

        let expected = resolve_configuration(&linux_gcc(), &options, &static_deps(), &ctx).unwrap();
        package(
            &Recipe::gst_plugins_base(),
            &linux_gcc(),
            &options,
            &static_deps(),
            &ctx,
            &tool,
        )
        .unwrap();

        assert_eq!(tool.calls()[0].config, expected);
    }

    #[test]
    fn test_install_failure_writes_no_metadata() {
        let (_tmp, ctx) = workspace();
        let tool = RecordingBuildTool::new().failing_on("install");

        let result = package(
            &Recipe::gst_plugins_base(),
            &linux_gcc(),
            &BuildOptions::default(),
            &static_deps(),
            &ctx,
            &tool,
        );

        assert!(result.is_err());
        assert!(!ctx.package_dir.join(PACKAGE_INFO_FILE).exists());
    }
}
