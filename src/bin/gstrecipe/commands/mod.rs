//! Command implementations

pub mod doctor;
pub mod flags;
pub mod info;
pub mod phase;
pub mod run;

use anyhow::Result;

use crate::cli::SettingsArgs;
use gstrecipe::util::config::{load_config, ResolvedConfig};

/// Load `gstrecipe.toml` and apply the command-line settings.
pub fn resolve_settings(settings: &SettingsArgs, verbose: bool) -> Result<ResolvedConfig> {
    let mut resolved = load_config(&settings.config, settings.overrides())?;
    resolved.ctx.verbose = verbose;
    tracing::debug!("Platform: {}", resolved.platform);
    Ok(resolved)
}
