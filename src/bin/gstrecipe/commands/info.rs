//! `gstrecipe info` command

use anyhow::Result;

use crate::cli::{InfoArgs, SettingsArgs};
use crate::commands::resolve_settings;
use gstrecipe::ops::RecipeExecutor;

pub fn execute(args: InfoArgs, settings: &SettingsArgs) -> Result<()> {
    let executor = RecipeExecutor::new(resolve_settings(settings, false)?);
    let info = executor.package_info();
    let resolved = executor.config();

    if args.json {
        println!("{}", info.to_json()?);
        return Ok(());
    }

    println!("# {} ({})", resolved.recipe, resolved.platform);

    println!("libs:");
    for lib in &info.libs {
        println!("  {}", lib);
    }

    println!("include_dirs:");
    for dir in &info.include_dirs {
        println!("  {}", dir.display());
    }

    println!("lib_dirs:");
    for dir in &info.lib_dirs {
        println!("  {}", dir.display());
    }

    if !info.defines.is_empty() {
        println!("defines:");
        for define in &info.defines {
            println!("  {}", define);
        }
    }

    if !info.env.is_empty() {
        println!("env:");
        for (key, value) in &info.env {
            println!("  {}={}", key, value);
        }
    }

    Ok(())
}
