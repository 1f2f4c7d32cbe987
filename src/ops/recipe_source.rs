//! Implementation of `gstrecipe source`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::builder::context::BuildContext;
use crate::core::errors::RecipeError;
use crate::core::recipe::Recipe;
use crate::sources::archive::{extract_archive, verify_sha256, ArchiveFormat, SourceFetcher};
use crate::util::fs::{ensure_dir, move_file};

/// Download, verify and extract the upstream archive into the canonical
/// source folder. Returns the source folder.
///
/// The hash is checked before anything is written, so a mismatch leaves the
/// working directory untouched.
pub fn fetch_source(
    recipe: &Recipe,
    ctx: &BuildContext,
    fetcher: &dyn SourceFetcher,
) -> Result<PathBuf> {
    if ctx.source_dir.exists() {
        return Err(RecipeError::SourceExists(ctx.source_dir.clone()).into());
    }

    let url = recipe.download_url()?;
    let format = ArchiveFormat::from_url(&url)?;

    let data = fetcher.download(&url)?;
    verify_sha256(&url, &data, &recipe.sha256)?;

    ensure_dir(&ctx.working_dir)?;
    // Same filesystem as the source folder, so the final move is a rename
    let staging = TempDir::new_in(&ctx.working_dir).with_context(|| {
        format!(
            "failed to create staging directory in {}",
            ctx.working_dir.display()
        )
    })?;
    extract_archive(&data, format, staging.path())
        .with_context(|| format!("failed to extract {}", url))?;

    move_file(&staging.path().join(recipe.archive_root()), &ctx.source_dir)?;

    tracing::info!("Sources of {} ready in {}", recipe, ctx.source_dir.display());
    Ok(ctx.source_dir.clone())
}
