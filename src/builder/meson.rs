//! Meson build tool - wraps `meson setup`, `meson compile` and `meson install`.

use std::ffi::OsString;

use anyhow::{Context, Result};

use crate::builder::configure::MesonConfig;
use crate::builder::context::BuildContext;
use crate::util::process::ProcessBuilder;

/// External build system invoked by the recipe.
pub trait BuildTool {
    /// Set up (or reconfigure) the build directory.
    fn configure(&self, ctx: &BuildContext, config: &MesonConfig) -> Result<()>;

    /// Compile everything.
    fn build(&self, ctx: &BuildContext, config: &MesonConfig) -> Result<()>;

    /// Install into the configured prefix.
    fn install(&self, ctx: &BuildContext, config: &MesonConfig) -> Result<()>;
}

/// Meson, driven through its command line.
#[derive(Debug, Clone)]
pub struct MesonTool {
    program: String,
}

impl MesonTool {
    pub fn new() -> Self {
        MesonTool {
            program: "meson".to_string(),
        }
    }

    /// Use a specific meson executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        MesonTool {
            program: program.into(),
        }
    }

    /// Build `meson setup` arguments.
    pub(crate) fn configure_args(&self, ctx: &BuildContext, config: &MesonConfig) -> Vec<String> {
        let mut args = vec!["setup".to_string()];

        // The package phase configures the same build directory again.
        if ctx.is_configured() {
            args.push("--reconfigure".to_string());
        }

        args.push(config.build_dir.display().to_string());
        args.push(config.source_dir.display().to_string());
        args.push(format!("--prefix={}", config.prefix.display()));
        args.push(format!("--buildtype={}", config.buildtype));
        args.extend(config.define_args());

        args
    }

    pub(crate) fn build_args(&self, ctx: &BuildContext, config: &MesonConfig) -> Vec<String> {
        let mut args = vec![
            "compile".to_string(),
            "-C".to_string(),
            config.build_dir.display().to_string(),
        ];

        if let Some(jobs) = ctx.jobs {
            args.push("-j".to_string());
            args.push(jobs.to_string());
        }

        if ctx.verbose {
            args.push("-v".to_string());
        }

        args
    }

    pub(crate) fn install_args(&self, config: &MesonConfig) -> Vec<String> {
        vec![
            "install".to_string(),
            "-C".to_string(),
            config.build_dir.display().to_string(),
        ]
    }

    /// Paths in the arguments are used as given, so the child inherits the
    /// current directory.
    fn command(&self, config: &MesonConfig) -> Result<ProcessBuilder> {
        let pkg_config_path = pkg_config_path(config)?;
        Ok(ProcessBuilder::new(&self.program)
            .env("PKG_CONFIG_PATH", pkg_config_path.to_string_lossy()))
    }

    fn run(&self, config: &MesonConfig, args: Vec<String>) -> Result<()> {
        let cmd = self.command(config)?.args(&args);
        tracing::debug!("Meson: {}", cmd.display_command());
        cmd.exec_and_check()?;
        Ok(())
    }
}

impl Default for MesonTool {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildTool for MesonTool {
    fn configure(&self, ctx: &BuildContext, config: &MesonConfig) -> Result<()> {
        tracing::info!("Configuring {}", config.source_dir.display());
        self.run(config, self.configure_args(ctx, config))
    }

    fn build(&self, ctx: &BuildContext, config: &MesonConfig) -> Result<()> {
        tracing::info!("Building in {}", config.build_dir.display());
        self.run(config, self.build_args(ctx, config))
    }

    fn install(&self, _ctx: &BuildContext, config: &MesonConfig) -> Result<()> {
        tracing::info!("Installing into {}", config.prefix.display());
        self.run(config, self.install_args(config))
    }
}

/// Join the pkg-config search path with the platform separator.
fn pkg_config_path(config: &MesonConfig) -> Result<OsString> {
    std::env::join_paths(&config.pkg_config_paths).context("invalid pkg-config search path")
}
