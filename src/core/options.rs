//! User-selectable build options.

use serde::Serialize;

use crate::core::settings::PlatformContext;

/// Build options of the recipe.
///
/// `fpic` is `None` once removed for a platform where it has no meaning
/// (Windows). Always pass options through [`BuildOptions::for_platform`]
/// before reading them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BuildOptions {
    pub shared: bool,
    pub fpic: Option<bool>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            shared: false,
            fpic: Some(true),
        }
    }
}

impl BuildOptions {
    pub fn new(shared: bool, fpic: bool) -> Self {
        BuildOptions {
            shared,
            fpic: Some(fpic),
        }
    }

    pub fn shared() -> Self {
        BuildOptions::new(true, true)
    }

    pub fn static_() -> Self {
        BuildOptions::new(false, true)
    }

    /// Drop options that do not exist on the given platform.
    pub fn for_platform(mut self, platform: &PlatformContext) -> Self {
        if platform.is_windows() {
            self.fpic = None;
        }
        self
    }

    /// Meson `default_library` value.
    pub fn default_library(&self) -> &'static str {
        if self.shared {
            "shared"
        } else {
            "static"
        }
    }
}
