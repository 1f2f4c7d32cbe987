//! Compiler and linker flag tables.
//!
//! Platform-specific flags are data: a table keyed by
//! `(compiler family, architecture)` maps to a list of [`FlagRule`]s.
//! Adding a platform means adding a row, not another branch.

use std::collections::BTreeMap;
use std::fmt;

use crate::core::errors::ConfigError;
use crate::core::settings::{Arch, Compiler, CompilerFamily};

/// Meson option a flag is accumulated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlagCategory {
    CArgs,
    CppArgs,
    CLinkArgs,
    CppLinkArgs,
}

impl FlagCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagCategory::CArgs => "c_args",
            FlagCategory::CppArgs => "cpp_args",
            FlagCategory::CLinkArgs => "c_link_args",
            FlagCategory::CppLinkArgs => "cpp_link_args",
        }
    }
}

impl fmt::Display for FlagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a flag goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagTarget {
    /// `c_args` and `cpp_args`
    Compiler,
    /// `c_link_args` and `cpp_link_args`
    Linker,
    /// All four categories
    CompilerAndLinker,
}

impl FlagTarget {
    fn categories(&self) -> &'static [FlagCategory] {
        match self {
            FlagTarget::Compiler => &[FlagCategory::CArgs, FlagCategory::CppArgs],
            FlagTarget::Linker => &[FlagCategory::CLinkArgs, FlagCategory::CppLinkArgs],
            FlagTarget::CompilerAndLinker => &[
                FlagCategory::CArgs,
                FlagCategory::CppArgs,
                FlagCategory::CLinkArgs,
                FlagCategory::CppLinkArgs,
            ],
        }
    }
}

/// Accumulated flags, one space-joined string per category.
///
/// Append-only: a value added to an existing category is joined with a
/// single space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    flags: BTreeMap<FlagCategory, String>,
}

impl FlagSet {
    pub fn new() -> Self {
        FlagSet::default()
    }

    /// Append a value to one category.
    pub fn append(&mut self, category: FlagCategory, value: &str) {
        self.flags
            .entry(category)
            .and_modify(|existing| {
                existing.push(' ');
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    /// Append a value to every category of `target`.
    pub fn add(&mut self, target: FlagTarget, value: &str) {
        for category in target.categories() {
            self.append(*category, value);
        }
    }

    pub fn add_compiler_flag(&mut self, value: &str) {
        self.add(FlagTarget::Compiler, value);
    }

    pub fn get(&self, category: FlagCategory) -> Option<&str> {
        self.flags.get(&category).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FlagCategory, &str)> {
        self.flags.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// A single row entry in the flag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagRule {
    /// A fixed flag.
    Fixed(FlagTarget, &'static str),
    /// `-<runtime>`, from the compiler runtime setting.
    Runtime,
    /// A fixed flag applied only below a compiler major version.
    BelowVersion(u32, FlagTarget, &'static str),
}

impl FlagRule {
    fn apply(&self, compiler: &Compiler, flags: &mut FlagSet) -> Result<(), ConfigError> {
        match *self {
            FlagRule::Fixed(target, value) => flags.add(target, value),
            FlagRule::Runtime => {
                let runtime = compiler
                    .runtime
                    .ok_or(ConfigError::MissingRuntime(compiler.family))?;
                flags.add_compiler_flag(&format!("-{}", runtime));
            }
            FlagRule::BelowVersion(version, target, value) => {
                if compiler.major_version()? < version {
                    flags.add(target, value);
                }
            }
        }
        Ok(())
    }
}

const M32: &[FlagRule] = &[FlagRule::Fixed(FlagTarget::CompilerAndLinker, "-m32")];
const M64: &[FlagRule] = &[FlagRule::Fixed(FlagTarget::CompilerAndLinker, "-m64")];
const NO_FLAGS: &[FlagRule] = &[];

const MSVC: &[FlagRule] = &[
    FlagRule::Fixed(FlagTarget::Linker, "-lws2_32"),
    FlagRule::Runtime,
    FlagRule::BelowVersion(14, FlagTarget::Compiler, "-Dsnprintf=_snprintf"),
];

/// Look up the flag rules for a compiler family and architecture.
pub fn platform_rules(
    family: CompilerFamily,
    arch: Arch,
) -> Result<&'static [FlagRule], ConfigError> {
    // apple-clang takes the gcc/clang architecture flags too.
    let rules = match (family, arch) {
        (f, Arch::X86) if f.is_gcc_like() => Some(M32),
        (f, Arch::X86_64) if f.is_gcc_like() => Some(M64),
        (f, Arch::Armv7 | Arch::Armv8) if f.is_gcc_like() => Some(NO_FLAGS),
        (CompilerFamily::Msvc, Arch::X86 | Arch::X86_64 | Arch::Armv7 | Arch::Armv8) => {
            Some(MSVC)
        }
        _ => None,
    };

    rules.ok_or(ConfigError::NoFlagRules {
        compiler: family,
        arch,
    })
}

/// Apply the platform rules for `compiler` on `arch` to `flags`.
pub fn apply_platform_rules(
    compiler: &Compiler,
    arch: Arch,
    flags: &mut FlagSet,
) -> Result<(), ConfigError> {
    for rule in platform_rules(compiler.family, arch)? {
        rule.apply(compiler, flags)?;
    }
    Ok(())
}
