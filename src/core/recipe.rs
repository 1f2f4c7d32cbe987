//! Static recipe description: what is being packaged and where it comes from.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;
use url::Url;

use crate::core::errors::ConfigError;

/// Canonical directory the extracted sources are renamed to.
pub const SOURCE_SUBFOLDER: &str = "source_subfolder";

/// Canonical Meson build directory.
pub const BUILD_SUBFOLDER: &str = "build_subfolder";

/// Which GL artifact is dropped from the published libraries on Linux.
///
/// Two revisions of the recipe disagree on this; rather than keeping both
/// recipes around, the revision is a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecipeVariant {
    /// Drop the `gstopengl` plugin from the static plugin list on Linux.
    #[default]
    OpenglPlugin,
    /// Drop the `gstgl-1.0` support library from the core list on Linux.
    GlLibrary,
}

impl RecipeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeVariant::OpenglPlugin => "opengl-plugin",
            RecipeVariant::GlLibrary => "gl-library",
        }
    }
}

impl fmt::Display for RecipeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipeVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opengl-plugin" => Ok(RecipeVariant::OpenglPlugin),
            "gl-library" => Ok(RecipeVariant::GlLibrary),
            _ => Err(ConfigError::InvalidVariant(s.to_string())),
        }
    }
}

/// The packaged library and its pinned upstream archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub name: String,
    pub version: String,
    pub description: String,
    pub homepage: String,
    pub license: String,
    pub topics: Vec<String>,
    /// SHA256 of the upstream archive
    pub sha256: String,
    pub variant: RecipeVariant,
}

impl Recipe {
    /// gst-plugins-base 1.16.0.
    pub fn gst_plugins_base() -> Self {
        Recipe {
            name: "gst-plugins-base".to_string(),
            version: "1.16.0".to_string(),
            description: "GStreamer is a development framework for creating applications \
                          like media players, video editors, streaming media broadcasters \
                          and so on"
                .to_string(),
            homepage: "https://gstreamer.freedesktop.org/".to_string(),
            license: "GPL-2.0-only".to_string(),
            topics: [
                "gstreamer",
                "multimedia",
                "video",
                "audio",
                "broadcasting",
                "framework",
                "media",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            sha256: "e6ab73e4c3b0e6b112159b89661a8f709e9bcecfc2827466bc4d3e939ff9e14e"
                .to_string(),
            variant: RecipeVariant::default(),
        }
    }

    pub fn with_variant(mut self, variant: RecipeVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Upstream archive URL for this name and version.
    pub fn download_url(&self) -> Result<Url> {
        let raw = format!(
            "https://gitlab.freedesktop.org/gstreamer/{n}/-/archive/{v}/{n}-{v}.tar.bz2",
            n = self.name,
            v = self.version
        );
        Url::parse(&raw).with_context(|| format!("invalid download URL: {}", raw))
    }

    /// Top-level directory name inside the upstream archive.
    pub fn archive_root(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_url() {
        let recipe = Recipe::gst_plugins_base();
        assert_eq!(
            recipe.download_url().unwrap().as_str(),
            "https://gitlab.freedesktop.org/gstreamer/gst-plugins-base/-/archive/1.16.0/gst-plugins-base-1.16.0.tar.bz2"
        );
    }

    #[test]
    fn test_archive_root() {
        let recipe = Recipe::gst_plugins_base();
        assert_eq!(recipe.archive_root(), "gst-plugins-base-1.16.0");
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!(
            "gl-library".parse::<RecipeVariant>().unwrap(),
            RecipeVariant::GlLibrary
        );
        assert!("both".parse::<RecipeVariant>().is_err());
        assert_eq!(RecipeVariant::default(), RecipeVariant::OpenglPlugin);
    }
}
