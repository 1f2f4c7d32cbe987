//! Placement of dependency-provided pkg-config files.
//!
//! The dependency provider writes one `.pc` file per dependency into the
//! working directory. Two of them do not carry the names gst-plugins-base's
//! meson.build looks up, so they are renamed before configuring.

use anyhow::Result;

use crate::core::settings::PlatformContext;
use crate::util::fs::DirScope;

/// A `.pc` rename required before configuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PkgConfigRename {
    pub from: &'static str,
    pub to: &'static str,
    /// Only needed on Linux
    pub linux_only: bool,
}

pub const PKG_CONFIG_RENAMES: &[PkgConfigRename] = &[
    PkgConfigRename {
        from: "libmount.pc",
        to: "mount.pc",
        linux_only: true,
    },
    PkgConfigRename {
        from: "pcre.pc",
        to: "libpcre.pc",
        linux_only: false,
    },
];

/// Renames that apply on `platform`, in order.
pub fn renames_for(platform: &PlatformContext) -> Vec<PkgConfigRename> {
    PKG_CONFIG_RENAMES
        .iter()
        .filter(|r| !r.linux_only || platform.is_linux())
        .copied()
        .collect()
}

/// Rename the pkg-config files in the working directory. A missing file is
/// fatal.
pub fn stage_pkg_config_files(scope: &DirScope, platform: &PlatformContext) -> Result<()> {
    for rename in renames_for(platform) {
        tracing::debug!("Staging {} as {}", rename.from, rename.to);
        scope.rename(rename.from, rename.to)?;
    }
    Ok(())
}
