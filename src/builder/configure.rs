//! Meson configuration resolution.
//!
//! [`resolve_configuration`] is a pure function of the platform, the
//! options, the dependency roots and the build layout. It is called once
//! for the build phase and once again for the package phase; both calls
//! must produce the same [`MesonConfig`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::builder::context::{BuildContext, DependencyRoots};
use crate::builder::flags::{apply_platform_rules, FlagSet};
use crate::core::errors::ConfigError;
use crate::core::options::BuildOptions;
use crate::core::settings::PlatformContext;

/// Define added to compiler flags when linking a static gstreamer.
pub const GST_STATIC_COMPILATION: &str = "-DGST_STATIC_COMPILATION";

/// Auxiliary targets of the wrapped build that are always disabled.
pub const DISABLED_FEATURES: &[&str] = &["tools", "examples", "benchmarks", "tests"];

/// Everything the build tool needs for `configure`, `build` and `install`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MesonConfig {
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    /// Install prefix (the package folder)
    pub prefix: PathBuf,
    /// Meson `--buildtype`
    pub buildtype: String,
    /// `-D` definitions
    pub defs: BTreeMap<String, String>,
    /// `PKG_CONFIG_PATH` entries, in search order
    pub pkg_config_paths: Vec<PathBuf>,
}

impl MesonConfig {
    /// The `-Dkey=value` arguments, in key order.
    pub fn define_args(&self) -> Vec<String> {
        self.defs
            .iter()
            .map(|(key, value)| format!("-D{}={}", key, value))
            .collect()
    }
}

/// Resolve the flag table for a platform and dependency linkage.
pub fn resolve_flags(
    platform: &PlatformContext,
    deps: &DependencyRoots,
) -> Result<FlagSet, ConfigError> {
    let mut flags = FlagSet::new();

    apply_platform_rules(&platform.compiler, platform.arch, &mut flags)?;

    if !deps.gstreamer_shared {
        flags.add_compiler_flag(GST_STATIC_COMPILATION);
    }

    Ok(flags)
}

/// Resolve the complete Meson configuration.
pub fn resolve_configuration(
    platform: &PlatformContext,
    options: &BuildOptions,
    deps: &DependencyRoots,
    ctx: &BuildContext,
) -> Result<MesonConfig, ConfigError> {
    let options = options.for_platform(platform);
    let mut defs = BTreeMap::new();

    if platform.is_linux() {
        defs.insert("libdir".to_string(), "lib".to_string());
    }

    for (category, value) in resolve_flags(platform, deps)?.iter() {
        defs.insert(category.to_string(), value.to_string());
    }

    for feature in DISABLED_FEATURES {
        defs.insert(feature.to_string(), "disabled".to_string());
    }

    defs.insert(
        "default_library".to_string(),
        options.default_library().to_string(),
    );
    if let Some(fpic) = options.fpic {
        defs.insert("b_staticpic".to_string(), fpic.to_string());
    }

    let pkg_config_paths = vec![
        DependencyRoots::pkg_config_dir(&deps.glib),
        DependencyRoots::pkg_config_dir(&deps.gstreamer),
        ctx.working_dir.clone(),
    ];

    Ok(MesonConfig {
        source_dir: ctx.source_dir.clone(),
        build_dir: ctx.build_dir.clone(),
        prefix: ctx.package_dir.clone(),
        buildtype: platform.build_type.meson_buildtype().to_string(),
        defs,
        pkg_config_paths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::flags::FlagCategory;
    use crate::core::settings::{Arch, Compiler, CompilerFamily, Os};
    use crate::test_support::{all_platforms, linux_gcc, static_deps, shared_deps, windows_msvc};

    fn ctx() -> BuildContext {
        BuildContext::new("/work", "/pkg")
    }

    #[test]
    fn test_resolution_is_deterministic() {
        for platform in all_platforms() {
            for options in [BuildOptions::shared(), BuildOptions::static_()] {
                let deps = static_deps();
                let first = resolve_configuration(&platform, &options, &deps, &ctx()).unwrap();
                let second = resolve_configuration(&platform, &options, &deps, &ctx()).unwrap();
                assert_eq!(first, second);
                assert_eq!(first.define_args(), second.define_args());
            }
        }
    }

    #[test]
    fn test_linux_gcc_static() {
        let cfg = resolve_configuration(
            &linux_gcc(),
            &BuildOptions::static_(),
            &static_deps(),
            &ctx(),
        )
        .unwrap();

        assert_eq!(cfg.defs["libdir"], "lib");
        assert_eq!(cfg.defs["c_args"], "-m64 -DGST_STATIC_COMPILATION");
        assert_eq!(cfg.defs["cpp_args"], "-m64 -DGST_STATIC_COMPILATION");
        assert_eq!(cfg.defs["c_link_args"], "-m64");
        assert_eq!(cfg.defs["cpp_link_args"], "-m64");
        assert_eq!(cfg.defs["default_library"], "static");
        assert_eq!(cfg.defs["b_staticpic"], "true");
        for feature in DISABLED_FEATURES {
            assert_eq!(cfg.defs[*feature], "disabled");
        }
    }

    #[test]
    fn test_shared_gstreamer_drops_static_define() {
        let flags = resolve_flags(&linux_gcc(), &shared_deps()).unwrap();
        assert_eq!(flags.get(FlagCategory::CArgs), Some("-m64"));
    }

    #[test]
    fn test_msvc_configuration() {
        let cfg = resolve_configuration(
            &windows_msvc("12"),
            &BuildOptions::shared(),
            &shared_deps(),
            &ctx(),
        )
        .unwrap();

        assert!(!cfg.defs.contains_key("libdir"));
        assert!(!cfg.defs.contains_key("b_staticpic"));
        assert_eq!(cfg.defs["c_args"], "-MD -Dsnprintf=_snprintf");
        assert_eq!(cfg.defs["c_link_args"], "-lws2_32");
        assert_eq!(cfg.defs["default_library"], "shared");
    }

    #[test]
    fn test_unsupported_platform_is_an_error() {
        let platform = crate::core::settings::PlatformContext::new(
            Os::Linux,
            Arch::S390x,
            Compiler::new(CompilerFamily::Gcc, "9", None).unwrap(),
        );
        let err = resolve_configuration(
            &platform,
            &BuildOptions::default(),
            &static_deps(),
            &ctx(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NoFlagRules { .. }));
    }

    #[test]
    fn test_paths() {
        let cfg = resolve_configuration(
            &linux_gcc(),
            &BuildOptions::default(),
            &static_deps(),
            &ctx(),
        )
        .unwrap();

        assert_eq!(cfg.source_dir, PathBuf::from("/work/source_subfolder"));
        assert_eq!(cfg.build_dir, PathBuf::from("/work/build_subfolder"));
        assert_eq!(cfg.prefix, PathBuf::from("/pkg"));
        assert_eq!(cfg.buildtype, "release");
        assert_eq!(
            cfg.pkg_config_paths,
            vec![
                PathBuf::from("/deps/glib/lib/pkgconfig"),
                PathBuf::from("/deps/gstreamer/lib/pkgconfig"),
                PathBuf::from("/work"),
            ]
        );
    }

    #[test]
    fn test_define_args_sorted() {
        let cfg = resolve_configuration(
            &linux_gcc(),
            &BuildOptions::default(),
            &static_deps(),
            &ctx(),
        )
        .unwrap();
        let args = cfg.define_args();
        assert_eq!(args.first().map(String::as_str), Some("-Db_staticpic=true"));
        assert!(args.contains(&"-Dtests=disabled".to_string()));
    }
}
