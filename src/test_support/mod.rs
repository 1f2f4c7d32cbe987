//! Test doubles and fixtures for recipe unit tests.
//!
//! The recipe talks to the outside world through three traits:
//! [`SourceFetcher`], [`PatchApplier`] and [`BuildTool`]. The doubles here
//! record what they were asked to do so tests can assert order and
//! arguments without network access, git or meson.

pub mod fixtures;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use url::Url;

use crate::builder::configure::MesonConfig;
use crate::builder::context::BuildContext;
use crate::builder::meson::BuildTool;
use crate::sources::archive::SourceFetcher;
use crate::sources::patches::PatchApplier;

pub use fixtures::*;

/// Fetcher serving a fixed archive.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    data: Vec<u8>,
    requests: Arc<Mutex<Vec<Url>>>,
}

impl StaticFetcher {
    pub fn new(data: Vec<u8>) -> Self {
        StaticFetcher {
            data,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// URLs requested so far.
    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }
}

impl SourceFetcher for StaticFetcher {
    fn download(&self, url: &Url) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.clone());
        Ok(self.data.clone())
    }
}

/// Patch applier that records patch file names instead of patching.
#[derive(Debug, Clone, Default)]
pub struct RecordingPatcher {
    applied: Arc<Mutex<Vec<PathBuf>>>,
    fail_on: Option<String>,
}

impl RecordingPatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail when asked to apply the patch with this file name.
    pub fn failing_on(name: impl Into<String>) -> Self {
        RecordingPatcher {
            applied: Arc::new(Mutex::new(Vec::new())),
            fail_on: Some(name.into()),
        }
    }

    /// File names of the patches seen, in order, including a failing one.
    pub fn applied_names(&self) -> Vec<String> {
        self.applied
            .lock()
            .unwrap()
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }
}

impl PatchApplier for RecordingPatcher {
    fn apply(&self, patch: &Path, _source_dir: &Path) -> Result<()> {
        self.applied.lock().unwrap().push(patch.to_path_buf());

        let name = patch.file_name().map(|n| n.to_string_lossy().into_owned());
        if name.is_some() && name == self.fail_on {
            bail!("patch '{}' does not apply", patch.display());
        }
        Ok(())
    }
}

/// A recorded build tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub step: &'static str,
    pub config: MesonConfig,
}

/// Build tool that records invocations and fakes their side effects.
///
/// `configure` creates `meson-private` in the build directory and
/// `install` writes the configured files into the install prefix.
#[derive(Debug, Clone, Default)]
pub struct RecordingBuildTool {
    calls: Arc<Mutex<Vec<ToolCall>>>,
    installed_files: Vec<String>,
    fail_on: Option<&'static str>,
}

impl RecordingBuildTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files (relative to the prefix) that `install` creates.
    pub fn with_installed_files(mut self, files: &[&str]) -> Self {
        self.installed_files = files.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Fail the given step (`configure`, `build` or `install`).
    pub fn failing_on(mut self, step: &'static str) -> Self {
        self.fail_on = Some(step);
        self
    }

    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Step names, in order.
    pub fn steps(&self) -> Vec<&'static str> {
        self.calls().iter().map(|c| c.step).collect()
    }

    fn record(&self, step: &'static str, config: &MesonConfig) -> Result<()> {
        self.calls.lock().unwrap().push(ToolCall {
            step,
            config: config.clone(),
        });
        if self.fail_on == Some(step) {
            bail!("meson {} failed", step);
        }
        Ok(())
    }
}

impl BuildTool for RecordingBuildTool {
    fn configure(&self, _ctx: &BuildContext, config: &MesonConfig) -> Result<()> {
        self.record("configure", config)?;
        std::fs::create_dir_all(config.build_dir.join("meson-private"))?;
        Ok(())
    }

    fn build(&self, _ctx: &BuildContext, config: &MesonConfig) -> Result<()> {
        self.record("build", config)
    }

    fn install(&self, _ctx: &BuildContext, config: &MesonConfig) -> Result<()> {
        self.record("install", config)?;
        for file in &self.installed_files {
            let path = config.prefix.join(file);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, b"")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_patcher_fails_on_named_patch() {
        let patcher = RecordingPatcher::failing_on("b.patch");
        assert!(patcher.apply(Path::new("/p/a.patch"), Path::new("/src")).is_ok());
        assert!(patcher.apply(Path::new("/p/b.patch"), Path::new("/src")).is_err());
        assert_eq!(patcher.applied_names(), vec!["a.patch", "b.patch"]);
    }

    #[test]
    fn test_static_fetcher_records_requests() {
        let fetcher = StaticFetcher::new(b"data".to_vec());
        let url = Url::parse("https://example.com/a.tar.gz").unwrap();
        assert_eq!(fetcher.download(&url).unwrap(), b"data");
        assert_eq!(fetcher.requests(), vec![url]);
    }
}
