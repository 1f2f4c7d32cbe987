//! gstrecipe - a build recipe for gst-plugins-base
//!
//! This crate provides the library side of the `gstrecipe` tool: platform
//! settings, Meson configuration resolution, source acquisition, and the
//! metadata published to consumers of the packaged library.

pub mod builder;
pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test doubles and fixtures for unit tests.
///
/// Only compiled for tests. Provides recording implementations of the
/// fetcher, patcher and build tool traits, plus platform fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{
    errors::{ConfigError, RecipeError},
    options::BuildOptions,
    package_info::PackageInfo,
    recipe::Recipe,
    settings::PlatformContext,
};

pub use ops::{Phase, RecipeExecutor};
pub use util::config::{Config, ResolvedConfig};
