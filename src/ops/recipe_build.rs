//! Implementation of `gstrecipe build`.

use anyhow::{Context, Result};

use crate::builder::configure::{resolve_configuration, MesonConfig};
use crate::builder::context::{BuildContext, DependencyRoots};
use crate::builder::meson::BuildTool;
use crate::builder::staging::stage_pkg_config_files;
use crate::core::errors::RecipeError;
use crate::core::options::BuildOptions;
use crate::core::settings::PlatformContext;
use crate::sources::patches::{PatchApplier, PatchSet};
use crate::util::fs::DirScope;

/// Patch, stage the dependency pkg-config files, configure and compile.
///
/// Returns the configuration handed to the build tool.
pub fn build(
    platform: &PlatformContext,
    options: &BuildOptions,
    deps: &DependencyRoots,
    ctx: &BuildContext,
    patcher: &dyn PatchApplier,
    tool: &dyn BuildTool,
) -> Result<MesonConfig> {
    if !ctx.source_dir.is_dir() {
        return Err(RecipeError::MissingFile(ctx.source_dir.clone()))
            .context("sources are missing, run `gstrecipe source` first");
    }

    let patches = PatchSet::discover(&ctx.patches_dir)?;
    tracing::debug!("{} patch(es) in {}", patches.len(), ctx.patches_dir.display());
    patches.apply(&ctx.source_dir, patcher)?;

    stage_pkg_config_files(&DirScope::new(&ctx.working_dir), platform)?;

    let config = resolve_configuration(platform, options, deps, ctx)?;
    tool.configure(ctx, &config)?;
    tool.build(ctx, &config)?;

    Ok(config)
}
