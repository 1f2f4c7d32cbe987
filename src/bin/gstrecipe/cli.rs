//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use gstrecipe::util::config::{Overrides, CONFIG_FILE};

/// gstrecipe - build and package gst-plugins-base with Meson
#[derive(Parser)]
#[command(name = "gstrecipe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download, verify and extract the upstream sources
    Source,

    /// Apply patches, configure and compile
    Build,

    /// Install into the package folder and write package_info.json
    Package,

    /// Run the source, build and package phases in order
    Run,

    /// Print the metadata published to consumers
    Info(InfoArgs),

    /// Print the resolved Meson configuration
    Flags(FlagsArgs),

    /// Check that the required build tools are installed
    Doctor,
}

/// Settings shared by every command. Override `gstrecipe.toml`.
#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE, env = "GSTRECIPE_CONFIG")]
    pub config: PathBuf,

    /// Target operating system (Linux, Windows, Macos, Android, iOS, FreeBSD)
    #[arg(long, global = true)]
    pub os: Option<String>,

    /// Target architecture (x86, x86_64, armv7, armv8, ...)
    #[arg(long, global = true)]
    pub arch: Option<String>,

    /// Compiler (gcc, clang, apple-clang, "Visual Studio")
    #[arg(long, global = true)]
    pub compiler: Option<String>,

    /// Compiler version
    #[arg(long, global = true)]
    pub compiler_version: Option<String>,

    /// MSVC runtime (MD, MT, MDd, MTd)
    #[arg(long, global = true)]
    pub runtime: Option<String>,

    /// Build type (Release, Debug, RelWithDebInfo, MinSizeRel)
    #[arg(long, global = true)]
    pub build_type: Option<String>,

    /// Build shared libraries
    #[arg(long, global = true, conflicts_with = "static_")]
    pub shared: bool,

    /// Build static libraries
    #[arg(long = "static", global = true)]
    pub static_: bool,

    /// Build without position independent code
    #[arg(long, global = true)]
    pub no_fpic: bool,

    /// Recipe variant (opengl-plugin, gl-library)
    #[arg(long, global = true)]
    pub variant: Option<String>,

    /// Staging directory
    #[arg(long, global = true)]
    pub working_dir: Option<PathBuf>,

    /// Install prefix
    #[arg(long, global = true)]
    pub package_dir: Option<PathBuf>,

    /// Number of parallel jobs
    #[arg(short, long, global = true)]
    pub jobs: Option<usize>,
}

impl SettingsArgs {
    /// Turn the flags into config overrides. Unset flags leave the file alone.
    pub fn overrides(&self) -> Overrides {
        let shared = if self.shared {
            Some(true)
        } else if self.static_ {
            Some(false)
        } else {
            None
        };

        Overrides {
            os: self.os.clone(),
            arch: self.arch.clone(),
            compiler: self.compiler.clone(),
            compiler_version: self.compiler_version.clone(),
            compiler_runtime: self.runtime.clone(),
            build_type: self.build_type.clone(),
            shared,
            fpic: self.no_fpic.then_some(false),
            variant: self.variant.clone(),
            working_dir: self.working_dir.clone(),
            package_dir: self.package_dir.clone(),
            jobs: self.jobs,
        }
    }
}

#[derive(Args)]
pub struct InfoArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}
