//! Shared utilities

pub mod config;
pub mod fs;
pub mod hash;
pub mod process;

pub use config::{Config, Overrides, ResolvedConfig};
pub use fs::DirScope;
pub use process::ProcessBuilder;
