//! Configuration file support.
//!
//! A recipe run is described by `gstrecipe.toml`:
//!
//! ```toml
//! [settings]
//! os = "Linux"
//! arch = "x86_64"
//! compiler = "gcc"
//! compiler_version = "9"
//! build_type = "Release"
//!
//! [options]
//! shared = false
//! fpic = true
//!
//! [recipe]
//! variant = "opengl-plugin"
//!
//! [dependencies]
//! glib = "/opt/glib"
//! gstreamer = "/opt/gstreamer"
//!
//! [layout]
//! working_dir = "."
//! package_dir = "package"
//! ```
//!
//! Every field is optional. Command-line overrides take precedence over the
//! file; settings missing from both default to the host.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::context::{BuildContext, DependencyRoots};
use crate::core::errors::ConfigError;
use crate::core::options::BuildOptions;
use crate::core::recipe::{Recipe, RecipeVariant};
use crate::core::settings::{
    Arch, BuildType, Compiler, CompilerFamily, Os, PlatformContext, Runtime,
};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "gstrecipe.toml";

/// Raw configuration as written in `gstrecipe.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub settings: SettingsConfig,
    pub options: OptionsConfig,
    pub recipe: RecipeConfig,
    pub dependencies: DependenciesConfig,
    pub layout: LayoutConfig,
}

/// `[settings]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    pub os: Option<String>,
    pub arch: Option<String>,
    pub compiler: Option<String>,
    pub compiler_version: Option<String>,
    pub compiler_runtime: Option<String>,
    pub build_type: Option<String>,
}

/// `[options]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    pub shared: Option<bool>,
    pub fpic: Option<bool>,
}

/// `[recipe]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeConfig {
    pub variant: Option<String>,
}

/// `[dependencies]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependenciesConfig {
    pub glib: Option<PathBuf>,
    pub gstreamer: Option<PathBuf>,
    /// Defaults to the `shared` option
    pub gstreamer_shared: Option<bool>,
}

/// `[layout]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub working_dir: Option<PathBuf>,
    pub package_dir: Option<PathBuf>,
    pub patches_dir: Option<PathBuf>,
    pub jobs: Option<usize>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration, falling back to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Apply command-line overrides (overrides take precedence).
    pub fn merge(&mut self, other: Overrides) {
        let s = &mut self.settings;
        if other.os.is_some() {
            s.os = other.os;
        }
        if other.arch.is_some() {
            s.arch = other.arch;
        }
        if other.compiler.is_some() {
            s.compiler = other.compiler;
        }
        if other.compiler_version.is_some() {
            s.compiler_version = other.compiler_version;
        }
        if other.compiler_runtime.is_some() {
            s.compiler_runtime = other.compiler_runtime;
        }
        if other.build_type.is_some() {
            s.build_type = other.build_type;
        }
        if other.shared.is_some() {
            self.options.shared = other.shared;
        }
        if other.fpic.is_some() {
            self.options.fpic = other.fpic;
        }
        if other.variant.is_some() {
            self.recipe.variant = other.variant;
        }
        if other.working_dir.is_some() {
            self.layout.working_dir = other.working_dir;
        }
        if other.package_dir.is_some() {
            self.layout.package_dir = other.package_dir;
        }
        if other.jobs.is_some() {
            self.layout.jobs = other.jobs;
        }
    }

    /// Validate and turn the raw configuration into typed recipe inputs.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let platform = self.platform()?;

        let raw_options = BuildOptions {
            shared: self.options.shared.unwrap_or(false),
            fpic: Some(self.options.fpic.unwrap_or(true)),
        };
        let options = raw_options.for_platform(&platform);

        let variant = match &self.recipe.variant {
            Some(v) => v.parse()?,
            None => RecipeVariant::default(),
        };
        let recipe = Recipe::gst_plugins_base().with_variant(variant);

        // Tools run with their own working directories, so every layout
        // path is anchored to the current directory here.
        let working_dir = absolute(
            self.layout
                .working_dir
                .as_deref()
                .unwrap_or_else(|| Path::new(".")),
        )?;
        let package_dir = match &self.layout.package_dir {
            Some(dir) => absolute(dir)?,
            None => working_dir.join("package"),
        };
        let patches_dir = match &self.layout.patches_dir {
            Some(dir) => absolute(dir)?,
            None => working_dir.join("patches"),
        };

        let glib = match &self.dependencies.glib {
            Some(dir) => absolute(dir)?,
            None => working_dir.join("deps").join("glib"),
        };
        let gstreamer = match &self.dependencies.gstreamer {
            Some(dir) => absolute(dir)?,
            None => working_dir.join("deps").join("gstreamer"),
        };
        let deps = DependencyRoots::new(
            glib,
            gstreamer,
            self.dependencies.gstreamer_shared.unwrap_or(options.shared),
        );

        let ctx = BuildContext::new(working_dir, package_dir)
            .with_patches_dir(patches_dir)
            .with_jobs(self.layout.jobs);

        Ok(ResolvedConfig {
            recipe,
            platform,
            options,
            deps,
            ctx,
        })
    }

    fn platform(&self) -> Result<PlatformContext, ConfigError> {
        let s = &self.settings;

        let os = match &s.os {
            Some(os) => os.parse()?,
            None => Os::host(),
        };
        let arch = match &s.arch {
            Some(arch) => arch.parse()?,
            None => Arch::host(),
        };
        let family = match &s.compiler {
            Some(compiler) => compiler.parse()?,
            None => default_compiler(os),
        };
        let version = s
            .compiler_version
            .clone()
            .unwrap_or_else(|| default_compiler_version(family).to_string());
        let runtime = match &s.compiler_runtime {
            Some(runtime) => Some(runtime.parse::<Runtime>()?),
            None if family == CompilerFamily::Msvc => Some(Runtime::MD),
            None => None,
        };
        let build_type = match &s.build_type {
            Some(bt) => bt.parse()?,
            None => BuildType::default(),
        };

        let compiler = Compiler::new(family, version, runtime)?;
        Ok(PlatformContext::new(os, arch, compiler).with_build_type(build_type))
    }
}

/// Make `path` absolute against the current directory, dropping `.` components.
fn absolute(path: &Path) -> Result<PathBuf, ConfigError> {
    let path = std::path::absolute(path).map_err(|e| ConfigError::InvalidPath {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(path.components().collect())
}

fn default_compiler(os: Os) -> CompilerFamily {
    match os {
        Os::Windows => CompilerFamily::Msvc,
        Os::Macos | Os::Ios => CompilerFamily::AppleClang,
        Os::FreeBSD | Os::Android => CompilerFamily::Clang,
        Os::Linux => CompilerFamily::Gcc,
    }
}

fn default_compiler_version(family: CompilerFamily) -> &'static str {
    match family {
        CompilerFamily::Gcc => "9",
        CompilerFamily::Clang => "10",
        CompilerFamily::AppleClang => "12",
        CompilerFamily::Msvc => "16",
    }
}

/// Command-line overrides for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub os: Option<String>,
    pub arch: Option<String>,
    pub compiler: Option<String>,
    pub compiler_version: Option<String>,
    pub compiler_runtime: Option<String>,
    pub build_type: Option<String>,
    pub shared: Option<bool>,
    pub fpic: Option<bool>,
    pub variant: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub package_dir: Option<PathBuf>,
    pub jobs: Option<usize>,
}

/// Typed, validated inputs for a recipe run.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub recipe: Recipe,
    pub platform: PlatformContext,
    pub options: BuildOptions,
    pub deps: DependencyRoots,
    pub ctx: BuildContext,
}

/// Load the config file (if any), apply overrides and resolve.
pub fn load_config(path: &Path, overrides: Overrides) -> Result<ResolvedConfig> {
    let mut config = Config::load_or_default(path)?;
    config.merge(overrides);
    Ok(config.resolve()?)
}
