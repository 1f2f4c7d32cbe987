//! The recipe pipeline: named phases run against one resolved configuration.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::builder::meson::{BuildTool, MesonTool};
use crate::core::package_info::PackageInfo;
use crate::ops::doctor::{require_build_tools, SystemProbe, ToolProbe};
use crate::ops::recipe_build::build;
use crate::ops::recipe_package::{package, PackageResult};
use crate::ops::recipe_source::fetch_source;
use crate::sources::archive::{HttpFetcher, SourceFetcher};
use crate::sources::patches::{GitApply, PatchApplier, PatchSet};
use crate::util::config::ResolvedConfig;

/// A step of the recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Source,
    Build,
    Package,
    PackageInfo,
}

impl Phase {
    /// Phases run by `gstrecipe run`, in order.
    pub const ALL: [Phase; 3] = [Phase::Source, Phase::Build, Phase::Package];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Source => "source",
            Phase::Build => "build",
            Phase::Package => "package",
            Phase::PackageInfo => "package_info",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "source" => Ok(Phase::Source),
            "build" => Ok(Phase::Build),
            "package" => Ok(Phase::Package),
            "package_info" | "package-info" => Ok(Phase::PackageInfo),
            _ => bail!("unknown phase `{}`", s),
        }
    }
}

/// Runs recipe phases with a set of external collaborators.
pub struct RecipeExecutor {
    config: ResolvedConfig,
    fetcher: Box<dyn SourceFetcher>,
    patcher: Box<dyn PatchApplier>,
    tool: Box<dyn BuildTool>,
    probe: Option<Box<dyn ToolProbe>>,
}

impl RecipeExecutor {
    /// Executor using HTTP, `git apply` and meson from `PATH`.
    pub fn new(config: ResolvedConfig) -> Self {
        RecipeExecutor {
            config,
            fetcher: Box::new(HttpFetcher),
            patcher: Box::new(GitApply),
            tool: Box::new(MesonTool::new()),
            probe: Some(Box::new(SystemProbe)),
        }
    }

    pub fn with_fetcher(mut self, fetcher: impl SourceFetcher + 'static) -> Self {
        self.fetcher = Box::new(fetcher);
        self
    }

    pub fn with_patcher(mut self, patcher: impl PatchApplier + 'static) -> Self {
        self.patcher = Box::new(patcher);
        self
    }

    pub fn with_tool(mut self, tool: impl BuildTool + 'static) -> Self {
        self.tool = Box::new(tool);
        self
    }

    pub fn with_probe(mut self, probe: impl ToolProbe + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Skip the build tool check at the start of the build phase.
    pub fn without_tool_check(mut self) -> Self {
        self.probe = None;
        self
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Run a single phase. Errors name the phase.
    pub fn run_phase(&self, phase: Phase) -> Result<PhaseOutcome> {
        tracing::info!("{}: {} phase", self.config.recipe, phase);
        self.dispatch(phase)
            .with_context(|| format!("{} phase failed", phase))
    }

    /// Run source, build and package in order, stopping at the first error.
    pub fn run_all(&self) -> Result<PackageResult> {
        let mut packaged = None;
        for phase in Phase::ALL {
            if let PhaseOutcome::Packaged(result) = self.run_phase(phase)? {
                packaged = Some(result);
            }
        }
        packaged.context("package phase produced no result")
    }

    fn dispatch(&self, phase: Phase) -> Result<PhaseOutcome> {
        let cfg = &self.config;
        match phase {
            Phase::Source => {
                fetch_source(&cfg.recipe, &cfg.ctx, self.fetcher.as_ref())?;
                Ok(PhaseOutcome::Done)
            }
            Phase::Build => {
                if let Some(probe) = &self.probe {
                    let patching = !PatchSet::discover(&cfg.ctx.patches_dir)?.is_empty();
                    require_build_tools(probe.as_ref(), patching)?;
                }
                build(
                    &cfg.platform,
                    &cfg.options,
                    &cfg.deps,
                    &cfg.ctx,
                    self.patcher.as_ref(),
                    self.tool.as_ref(),
                )?;
                Ok(PhaseOutcome::Done)
            }
            Phase::Package => {
                let result = package(
                    &cfg.recipe,
                    &cfg.platform,
                    &cfg.options,
                    &cfg.deps,
                    &cfg.ctx,
                    self.tool.as_ref(),
                )?;
                Ok(PhaseOutcome::Packaged(result))
            }
            Phase::PackageInfo => Ok(PhaseOutcome::Info(self.package_info())),
        }
    }

    /// Metadata for the configured build. Pure.
    pub fn package_info(&self) -> PackageInfo {
        let cfg = &self.config;
        PackageInfo::derive(&cfg.recipe, &cfg.options, &cfg.platform, &cfg.ctx.package_dir)
    }
}

/// What a phase produced.
#[derive(Debug, Clone)]
pub enum PhaseOutcome {
    Done,
    Packaged(PackageResult),
    Info(PackageInfo),
}
