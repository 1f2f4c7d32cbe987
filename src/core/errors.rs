//! Recipe error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::settings::{Arch, CompilerFamily};

/// Error while turning settings and options into a build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unsupported operating system `{0}`, valid values: Linux, Windows, Macos, Android, iOS, FreeBSD")]
    UnsupportedOs(String),

    #[error("unsupported architecture `{0}`, valid values: x86, x86_64, armv7, armv8, ppc64le, mips, s390x")]
    UnsupportedArch(String),

    #[error("unsupported compiler `{0}`, valid values: gcc, clang, apple-clang, Visual Studio")]
    UnsupportedCompiler(String),

    #[error("invalid compiler version `{0}`")]
    InvalidCompilerVersion(String),

    #[error("invalid compiler runtime `{0}`, valid values: MD, MT, MDd, MTd")]
    InvalidRuntime(String),

    #[error("invalid build type `{0}`, valid values: Release, Debug, RelWithDebInfo, MinSizeRel")]
    InvalidBuildType(String),

    #[error("invalid recipe variant `{0}`, valid values: opengl-plugin, gl-library")]
    InvalidVariant(String),

    #[error("compiler `{0}` requires a runtime setting (MD, MT, MDd, MTd)")]
    MissingRuntime(CompilerFamily),

    #[error("cannot resolve path {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },

    #[error("no flag rules for compiler `{compiler}` on architecture `{arch}`")]
    NoFlagRules {
        compiler: CompilerFamily,
        arch: Arch,
    },
}

/// Error raised while executing a recipe phase.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("archive hash mismatch for {url}:\n  expected: {expected}\n  actual:   {actual}")]
    Integrity {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("`{command}` failed with exit code {status:?}\n{stderr}")]
    ToolInvocation {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("required tool `{tool}` not found\nhelp: {hint}")]
    ToolMissing { tool: String, hint: String },

    #[error("expected file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("source folder already exists: {}", .0.display())]
    SourceExists(PathBuf),

    #[error(transparent)]
    Configuration(#[from] ConfigError),
}
