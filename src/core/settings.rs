//! Platform settings the recipe is evaluated against.
//!
//! These mirror the settings a package manager hands to a recipe: target
//! operating system, architecture, compiler identity and build type. They
//! are fixed for the lifetime of a run and drive every conditional in the
//! configuration resolver and the metadata derivation.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::errors::ConfigError;

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Os {
    Linux,
    Windows,
    Macos,
    Android,
    #[serde(rename = "iOS")]
    Ios,
    FreeBSD,
}

impl Os {
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "Linux",
            Os::Windows => "Windows",
            Os::Macos => "Macos",
            Os::Android => "Android",
            Os::Ios => "iOS",
            Os::FreeBSD => "FreeBSD",
        }
    }

    /// Detect the host operating system.
    pub fn host() -> Self {
        match std::env::consts::OS {
            "windows" => Os::Windows,
            "macos" => Os::Macos,
            "android" => Os::Android,
            "ios" => Os::Ios,
            "freebsd" => Os::FreeBSD,
            _ => Os::Linux,
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(Os::Linux),
            "windows" => Ok(Os::Windows),
            "macos" => Ok(Os::Macos),
            "android" => Ok(Os::Android),
            "ios" => Ok(Os::Ios),
            "freebsd" => Ok(Os::FreeBSD),
            _ => Err(ConfigError::UnsupportedOs(s.to_string())),
        }
    }
}

/// Target CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86,
    #[serde(rename = "x86_64")]
    X86_64,
    Armv7,
    Armv8,
    Ppc64le,
    Mips,
    S390x,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::Armv7 => "armv7",
            Arch::Armv8 => "armv8",
            Arch::Ppc64le => "ppc64le",
            Arch::Mips => "mips",
            Arch::S390x => "s390x",
        }
    }

    /// Detect the host architecture.
    pub fn host() -> Self {
        match std::env::consts::ARCH {
            "x86" => Arch::X86,
            "arm" => Arch::Armv7,
            "aarch64" => Arch::Armv8,
            "powerpc64" => Arch::Ppc64le,
            "mips" => Arch::Mips,
            "s390x" => Arch::S390x,
            _ => Arch::X86_64,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x86" | "i686" => Ok(Arch::X86),
            "x86_64" | "amd64" => Ok(Arch::X86_64),
            "armv7" | "arm" => Ok(Arch::Armv7),
            "armv8" | "aarch64" | "arm64" => Ok(Arch::Armv8),
            "ppc64le" => Ok(Arch::Ppc64le),
            "mips" => Ok(Arch::Mips),
            "s390x" => Ok(Arch::S390x),
            _ => Err(ConfigError::UnsupportedArch(s.to_string())),
        }
    }
}

/// Compiler family. Drives the flag table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompilerFamily {
    #[serde(rename = "gcc")]
    Gcc,
    #[serde(rename = "clang")]
    Clang,
    #[serde(rename = "apple-clang")]
    AppleClang,
    #[serde(rename = "Visual Studio")]
    Msvc,
}

impl CompilerFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::AppleClang => "apple-clang",
            CompilerFamily::Msvc => "Visual Studio",
        }
    }

    /// Whether the compiler understands GCC-style driver flags.
    pub fn is_gcc_like(&self) -> bool {
        !matches!(self, CompilerFamily::Msvc)
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerFamily {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcc" => Ok(CompilerFamily::Gcc),
            "clang" => Ok(CompilerFamily::Clang),
            "apple-clang" => Ok(CompilerFamily::AppleClang),
            "visual studio" | "msvc" => Ok(CompilerFamily::Msvc),
            _ => Err(ConfigError::UnsupportedCompiler(s.to_string())),
        }
    }
}

/// MSVC C runtime selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Runtime {
    MD,
    MT,
    MDd,
    MTd,
}

impl Runtime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Runtime::MD => "MD",
            Runtime::MT => "MT",
            Runtime::MDd => "MDd",
            Runtime::MTd => "MTd",
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Runtime {
    type Err = ConfigError;

    // Case matters: MDd and MD differ only by case of the suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MD" => Ok(Runtime::MD),
            "MT" => Ok(Runtime::MT),
            "MDd" => Ok(Runtime::MDd),
            "MTd" => Ok(Runtime::MTd),
            _ => Err(ConfigError::InvalidRuntime(s.to_string())),
        }
    }
}

/// Compiler identity: family, version string and (MSVC only) runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Compiler {
    pub family: CompilerFamily,
    pub version: String,
    pub runtime: Option<Runtime>,
}

impl Compiler {
    /// Create a compiler identity, validating the version string.
    pub fn new(
        family: CompilerFamily,
        version: impl Into<String>,
        runtime: Option<Runtime>,
    ) -> Result<Self, ConfigError> {
        let compiler = Compiler {
            family,
            version: version.into(),
            runtime,
        };
        compiler.major_version()?;
        Ok(compiler)
    }

    /// Leading integer component of the version ("14", "9.3" -> 9).
    pub fn major_version(&self) -> Result<u32, ConfigError> {
        self.version
            .split('.')
            .next()
            .and_then(|major| major.trim().parse().ok())
            .ok_or_else(|| ConfigError::InvalidCompilerVersion(self.version.clone()))
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.version)?;
        if let Some(runtime) = self.runtime {
            write!(f, " ({})", runtime)?;
        }
        Ok(())
    }
}

/// Build type, mapped onto Meson's `--buildtype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum BuildType {
    #[default]
    Release,
    Debug,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Release => "Release",
            BuildType::Debug => "Debug",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }

    /// Meson `--buildtype` value.
    pub fn meson_buildtype(&self) -> &'static str {
        match self {
            BuildType::Release => "release",
            BuildType::Debug => "debug",
            BuildType::RelWithDebInfo => "debugoptimized",
            BuildType::MinSizeRel => "minsize",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "release" => Ok(BuildType::Release),
            "debug" => Ok(BuildType::Debug),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "minsizerel" => Ok(BuildType::MinSizeRel),
            _ => Err(ConfigError::InvalidBuildType(s.to_string())),
        }
    }
}

/// The read-only platform context a recipe run is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlatformContext {
    pub os: Os,
    pub arch: Arch,
    pub compiler: Compiler,
    pub build_type: BuildType,
}

impl PlatformContext {
    pub fn new(os: Os, arch: Arch, compiler: Compiler) -> Self {
        PlatformContext {
            os,
            arch,
            compiler,
            build_type: BuildType::default(),
        }
    }

    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    pub fn is_linux(&self) -> bool {
        self.os == Os::Linux
    }

    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }

    pub fn is_msvc(&self) -> bool {
        self.compiler.family == CompilerFamily::Msvc
    }
}

impl fmt::Display for PlatformContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} / {} / {}",
            self.os, self.arch, self.compiler, self.build_type
        )
    }
}
