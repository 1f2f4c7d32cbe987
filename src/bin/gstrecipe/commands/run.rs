//! `gstrecipe run` command

use anyhow::Result;

use crate::cli::SettingsArgs;
use crate::commands::resolve_settings;
use gstrecipe::ops::RecipeExecutor;

pub fn execute(settings: &SettingsArgs, verbose: bool) -> Result<()> {
    let executor = RecipeExecutor::new(resolve_settings(settings, verbose)?);
    let result = executor.run_all()?;

    println!(
        "Packaged {} into {}",
        executor.config().recipe,
        executor.config().ctx.package_dir.display()
    );
    println!("Wrote {}", result.info_path.display());

    Ok(())
}
