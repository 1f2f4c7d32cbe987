//! The libraries gst-plugins-base installs, as consumers link them.

use crate::core::recipe::RecipeVariant;
use crate::core::settings::{Os, PlatformContext};

/// Libraries installed in every configuration.
pub const CORE_LIBS: &[&str] = &[
    "gstallocators-1.0",
    "gstapp-1.0",
    "gstaudio-1.0",
    "gstfft-1.0",
    "gstpbutils-1.0",
    "gstriff-1.0",
    "gstrtp-1.0",
    "gstrtsp-1.0",
    "gstsdp-1.0",
    "gsttag-1.0",
    "gstvideo-1.0",
    "gstgl-1.0",
];

/// Plugins that must be linked explicitly when built as static archives.
pub const STATIC_PLUGINS: &[&str] = &[
    "gstadder",
    "gstapp",
    "gstaudioconvert",
    "gstaudiomixer",
    "gstaudiorate",
    "gstaudioresample",
    "gstaudiotestsrc",
    "gstcompositor",
    "gstencoding",
    "gstgio",
    "gstopengl",
    "gstoverlaycomposition",
    "gstpbtypes",
    "gstplayback",
    "gstrawparse",
    "gstsubparse",
    "gsttcp",
    "gsttypefindfunctions",
    "gstvideoconvert",
    "gstvideorate",
    "gstvideoscale",
    "gstvideotestsrc",
    "gstvolume",
];

/// The GL support library.
pub const GL_LIBRARY: &str = "gstgl-1.0";

/// The OpenGL-backed plugin.
pub const OPENGL_PLUGIN: &str = "gstopengl";

/// A library removed from one of the lists on a given OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exclusion {
    pub os: Os,
    pub library: &'static str,
}

/// Static library lists plus the OS exclusions selected by the recipe variant.
///
/// The lists are never mutated; [`LibraryManifest::core_libs`] and
/// [`LibraryManifest::static_plugins`] filter them for a platform.
#[derive(Debug, Clone)]
pub struct LibraryManifest {
    core: &'static [&'static str],
    plugins: &'static [&'static str],
    core_exclusions: Vec<Exclusion>,
    plugin_exclusions: Vec<Exclusion>,
}

impl LibraryManifest {
    pub fn for_variant(variant: RecipeVariant) -> Self {
        let linux_gl = |library: &'static str| Exclusion {
            os: Os::Linux,
            library,
        };

        let (core_exclusions, plugin_exclusions) = match variant {
            RecipeVariant::OpenglPlugin => (Vec::new(), vec![linux_gl(OPENGL_PLUGIN)]),
            RecipeVariant::GlLibrary => (vec![linux_gl(GL_LIBRARY)], Vec::new()),
        };

        LibraryManifest {
            core: CORE_LIBS,
            plugins: STATIC_PLUGINS,
            core_exclusions,
            plugin_exclusions,
        }
    }

    /// Libraries that are always published.
    pub fn core_libs(&self, platform: &PlatformContext) -> Vec<String> {
        filter(self.core, &self.core_exclusions, platform)
    }

    /// Plugins published only for static builds.
    pub fn static_plugins(&self, platform: &PlatformContext) -> Vec<String> {
        filter(self.plugins, &self.plugin_exclusions, platform)
    }
}

fn filter(
    libs: &[&str],
    exclusions: &[Exclusion],
    platform: &PlatformContext,
) -> Vec<String> {
    libs.iter()
        .filter(|lib| {
            !exclusions
                .iter()
                .any(|ex| ex.os == platform.os && ex.library == **lib)
        })
        .map(|lib| lib.to_string())
        .collect()
}
