//! `gstrecipe source`, `gstrecipe build` and `gstrecipe package` commands

use anyhow::Result;

use crate::cli::SettingsArgs;
use crate::commands::resolve_settings;
use gstrecipe::ops::{Phase, PhaseOutcome, RecipeExecutor};

pub fn execute(phase: Phase, settings: &SettingsArgs, verbose: bool) -> Result<()> {
    let executor = RecipeExecutor::new(resolve_settings(settings, verbose)?);

    if let PhaseOutcome::Packaged(result) = executor.run_phase(phase)? {
        for lib in &result.renamed {
            tracing::debug!("renamed {}", lib);
        }
        println!("Wrote {}", result.info_path.display());
    }

    Ok(())
}
