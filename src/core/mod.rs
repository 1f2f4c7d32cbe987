//! Core data structures for the recipe.
//!
//! - Platform settings and build options (the inputs)
//! - The recipe description and its library manifest (static data)
//! - Published package metadata (the output)
//! - Error types

pub mod errors;
pub mod manifest;
pub mod options;
pub mod package_info;
pub mod recipe;
pub mod settings;

pub use errors::{ConfigError, RecipeError};
pub use manifest::LibraryManifest;
pub use options::BuildOptions;
pub use package_info::PackageInfo;
pub use recipe::{Recipe, RecipeVariant, BUILD_SUBFOLDER, SOURCE_SUBFOLDER};
pub use settings::{Arch, BuildType, Compiler, CompilerFamily, Os, PlatformContext, Runtime};
