//! Build configuration and execution.
//!
//! - `flags`: the `(compiler, arch)` flag table
//! - `configure`: pure resolution of the Meson configuration
//! - `meson`: the external build tool
//! - `staging`: pkg-config file placement before configuring
//! - `post_process`: library renames after installing

pub mod configure;
pub mod context;
pub mod flags;
pub mod meson;
pub mod post_process;
pub mod staging;

pub use configure::{resolve_configuration, resolve_flags, MesonConfig};
pub use context::{BuildContext, DependencyRoots};
pub use flags::{FlagCategory, FlagSet};
pub use meson::{BuildTool, MesonTool};
