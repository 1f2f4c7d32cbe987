//! Test fixtures: platforms, dependency roots and in-memory archives.

use std::io::Write;
use std::path::Path;

use tempfile::TempDir;

use crate::builder::context::DependencyRoots;
use crate::core::settings::{Arch, Compiler, CompilerFamily, Os, PlatformContext, Runtime};
use crate::util::config::{Config, Overrides, ResolvedConfig};

/// Linux x86_64 with gcc 9.
pub fn linux_gcc() -> PlatformContext {
    PlatformContext::new(
        Os::Linux,
        Arch::X86_64,
        Compiler::new(CompilerFamily::Gcc, "9", None).unwrap(),
    )
}

/// Windows x86_64 with Visual Studio `version` and the MD runtime.
pub fn windows_msvc(version: &str) -> PlatformContext {
    PlatformContext::new(
        Os::Windows,
        Arch::X86_64,
        Compiler::new(CompilerFamily::Msvc, version, Some(Runtime::MD)).unwrap(),
    )
}

/// macOS x86_64 with apple-clang 12.
pub fn macos_clang() -> PlatformContext {
    PlatformContext::new(
        Os::Macos,
        Arch::X86_64,
        Compiler::new(CompilerFamily::AppleClang, "12", None).unwrap(),
    )
}

/// Every (compiler, arch) pair that has flag rules, on its usual OS.
pub fn all_platforms() -> Vec<PlatformContext> {
    let arches = [Arch::X86, Arch::X86_64, Arch::Armv7, Arch::Armv8];
    let mut platforms = Vec::new();

    for arch in arches {
        for (os, family, version) in [
            (Os::Linux, CompilerFamily::Gcc, "9"),
            (Os::Linux, CompilerFamily::Clang, "10"),
            (Os::Macos, CompilerFamily::AppleClang, "12"),
        ] {
            platforms.push(PlatformContext::new(
                os,
                arch,
                Compiler::new(family, version, None).unwrap(),
            ));
        }

        for version in ["12", "16"] {
            for runtime in [Runtime::MD, Runtime::MTd] {
                platforms.push(PlatformContext::new(
                    Os::Windows,
                    arch,
                    Compiler::new(CompilerFamily::Msvc, version, Some(runtime)).unwrap(),
                ));
            }
        }
    }

    platforms
}

/// Static glib and gstreamer under `/deps`.
pub fn static_deps() -> DependencyRoots {
    DependencyRoots::new("/deps/glib", "/deps/gstreamer", false)
}

/// Shared glib and gstreamer under `/deps`.
pub fn shared_deps() -> DependencyRoots {
    DependencyRoots::new("/deps/glib", "/deps/gstreamer", true)
}

fn tar_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, path, content.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap()
}

/// A bzip2-compressed tarball holding `files` (`(path, content)` pairs).
pub fn bz2_tarball(files: &[(&str, &str)]) -> Vec<u8> {
    let mut encoder =
        bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(&tar_bytes(files)).unwrap();
    encoder.finish().unwrap()
}

/// A gzip-compressed tarball holding `files` (`(path, content)` pairs).
pub fn gz_tarball(files: &[(&str, &str)]) -> Vec<u8> {
    let mut encoder =
        flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&tar_bytes(files)).unwrap();
    encoder.finish().unwrap()
}

/// Scratch directory under the current directory, addressed by a relative
/// path the way `--working-dir work` would be.
pub fn relative_workspace() -> TempDir {
    let tmp = TempDir::new_in(".").unwrap();
    assert!(tmp.path().is_relative());
    tmp
}

/// Linux gcc configuration resolved through [`Config`] with `working_dir`
/// as given on the command line.
pub fn resolved_linux(working_dir: &Path) -> ResolvedConfig {
    let mut config = Config::default();
    config.merge(Overrides {
        os: Some("Linux".to_string()),
        arch: Some("x86_64".to_string()),
        compiler: Some("gcc".to_string()),
        compiler_version: Some("9".to_string()),
        working_dir: Some(working_dir.to_path_buf()),
        ..Default::default()
    });
    config.resolve().unwrap()
}
