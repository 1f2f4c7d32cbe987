//! `gstrecipe flags` command

use anyhow::Result;

use crate::cli::{FlagsArgs, SettingsArgs};
use crate::commands::resolve_settings;
use gstrecipe::builder::resolve_configuration;

pub fn execute(args: FlagsArgs, settings: &SettingsArgs) -> Result<()> {
    let resolved = resolve_settings(settings, false)?;
    let config = resolve_configuration(
        &resolved.platform,
        &resolved.options,
        &resolved.deps,
        &resolved.ctx,
    )?;

    if args.json {
        let value = serde_json::json!({
            "prefix": config.prefix,
            "buildtype": config.buildtype,
            "defs": config.defs,
            "pkg_config_path": config.pkg_config_paths,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("# Meson configuration for {} ({}):", resolved.recipe, resolved.platform);
    println!("  --prefix={}", config.prefix.display());
    println!("  --buildtype={}", config.buildtype);
    for arg in config.define_args() {
        println!("  {}", arg);
    }

    println!("# PKG_CONFIG_PATH:");
    for path in &config.pkg_config_paths {
        println!("  {}", path.display());
    }

    Ok(())
}
