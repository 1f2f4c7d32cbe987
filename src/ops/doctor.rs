//! Build tool checks.
//!
//! The recipe drives a handful of external tools. `doctor` looks each one
//! up and reports what it found; the build phase runs the same checks and
//! stops at the first missing tool.
//!
//! ## Usage
//!
//! ```bash
//! gstrecipe doctor           # Quick check
//! gstrecipe doctor --verbose # Paths and versions
//! ```
//!
//! ## Checks Performed
//!
//! - meson, at least 0.50
//! - pkg-config (or pkgconf)
//! - bison and flex (win_bison / win_flex on Windows)
//! - git, used to apply patches

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use semver::{Version, VersionReq};

use crate::core::errors::RecipeError;
use crate::util::process::{find_executable, ProcessBuilder};

/// Minimum meson version the wrapped build needs.
pub const MESON_REQUIREMENT: &str = ">=0.50";

/// An external tool the recipe needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolRequirement {
    /// Display name
    pub name: &'static str,
    /// Executable names to try, in order
    pub executables: &'static [&'static str],
    /// Version requirement, checked against `--version` output
    pub version_req: Option<&'static str>,
    /// Install hint shown when the tool is missing
    pub hint: &'static str,
    /// Only needed when there are patches to apply
    pub patches_only: bool,
}

/// Tools checked by `doctor` and before the build phase.
pub const BUILD_TOOLS: &[ToolRequirement] = &[
    ToolRequirement {
        name: "meson",
        executables: &["meson"],
        version_req: Some(MESON_REQUIREMENT),
        hint: "install meson with `pip install meson` (0.50 or newer)",
        patches_only: false,
    },
    ToolRequirement {
        name: "pkg-config",
        executables: &["pkg-config", "pkgconf"],
        version_req: None,
        hint: "install pkg-config or pkgconf from your system package manager",
        patches_only: false,
    },
    ToolRequirement {
        name: "bison",
        executables: &["bison", "win_bison"],
        version_req: None,
        hint: "install bison (winflexbison on Windows)",
        patches_only: false,
    },
    ToolRequirement {
        name: "flex",
        executables: &["flex", "win_flex"],
        version_req: None,
        hint: "install flex (winflexbison on Windows)",
        patches_only: false,
    },
    ToolRequirement {
        name: "git",
        executables: &["git"],
        version_req: None,
        hint: "install git, it is used to apply the recipe patches",
        patches_only: true,
    },
];

/// Looks tools up. Split out so checks can run against a fake PATH.
pub trait ToolProbe {
    fn locate(&self, executable: &str) -> Option<PathBuf>;

    /// First line of `<tool> --version`.
    fn version(&self, path: &Path) -> Option<String>;
}

/// Probe the real `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl ToolProbe for SystemProbe {
    fn locate(&self, executable: &str) -> Option<PathBuf> {
        find_executable(executable)
    }

    fn version(&self, path: &Path) -> Option<String> {
        let output = ProcessBuilder::new(path).arg("--version").exec().ok()?;
        if !output.status.success() {
            return None;
        }
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .map(|line| line.trim().to_string())
    }
}

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Path to the tool (if found)
    pub path: Option<PathBuf>,

    /// Version string (if known)
    pub version: Option<String>,

    /// Install hint for failed checks
    pub hint: Option<String>,

    /// How long the check took
    pub duration: Duration,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
            version: None,
            hint: None,
            duration: Duration::ZERO,
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: false,
            message: message.into(),
            path: None,
            version: None,
            hint: None,
            duration: Duration::ZERO,
        }
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Convert a failed check into the error the build phase reports.
    pub fn into_error(self) -> Option<RecipeError> {
        if self.passed {
            return None;
        }
        let hint = match self.hint {
            Some(hint) => format!("{}; {}", self.message, hint),
            None => self.message,
        };
        Some(RecipeError::ToolMissing {
            tool: self.name,
            hint,
        })
    }
}

/// Summary of all checks.
#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,

    /// Total time taken
    pub total_duration: Duration,

    /// Environment information
    pub environment: HashMap<String, String>,
}

impl DoctorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }
}

/// Run every check against the real `PATH`.
pub fn doctor() -> DoctorReport {
    run_checks(&SystemProbe)
}

/// Run every check with the given probe.
pub fn run_checks(probe: &dyn ToolProbe) -> DoctorReport {
    let start = Instant::now();
    let mut report = DoctorReport::new();

    report
        .environment
        .insert("os".to_string(), std::env::consts::OS.to_string());
    report
        .environment
        .insert("arch".to_string(), std::env::consts::ARCH.to_string());

    for tool in BUILD_TOOLS {
        report.add(check_tool(tool, probe));
    }

    report.total_duration = start.elapsed();
    report
}

/// Fail with [`RecipeError::ToolMissing`] on the first tool that is absent
/// or too old. Patch-only tools are skipped unless `patching` is set.
pub fn require_build_tools(probe: &dyn ToolProbe, patching: bool) -> Result<(), RecipeError> {
    for tool in BUILD_TOOLS.iter().filter(|t| patching || !t.patches_only) {
        if let Some(err) = check_tool(tool, probe).into_error() {
            return Err(err);
        }
    }
    Ok(())
}

/// Check one tool.
pub fn check_tool(tool: &ToolRequirement, probe: &dyn ToolProbe) -> CheckResult {
    let start = Instant::now();

    let Some((executable, path)) = tool
        .executables
        .iter()
        .find_map(|exe| probe.locate(exe).map(|path| (*exe, path)))
    else {
        return CheckResult::fail(
            tool.name,
            format!("not found (tried {})", tool.executables.join(", ")),
        )
        .with_hint(tool.hint)
        .with_duration(start.elapsed());
    };

    let version = probe.version(&path);

    if let Some(req) = tool.version_req {
        let parsed = version.as_deref().and_then(parse_tool_version);
        let satisfied = match (&parsed, VersionReq::parse(req)) {
            (Some(v), Ok(req)) => req.matches(v),
            _ => false,
        };
        if !satisfied {
            let found = version.as_deref().unwrap_or("unknown version");
            return CheckResult::fail(
                tool.name,
                format!("{} {} does not satisfy {}", executable, found, req),
            )
            .with_path(path)
            .with_hint(tool.hint)
            .with_duration(start.elapsed());
        }
    }

    let mut result = CheckResult::pass(tool.name, format!("Found {}", executable))
        .with_path(path)
        .with_duration(start.elapsed());
    if let Some(version) = version {
        result = result.with_version(version);
    }
    result
}

/// Pull a semantic version out of `--version` output ("0.56.2",
/// "meson 1.2", "bison (GNU Bison) 3.8.2").
pub fn parse_tool_version(output: &str) -> Option<Version> {
    output.split_whitespace().find_map(|word| {
        let word = word.trim_start_matches('v');
        let parts: Vec<&str> = word.split('.').collect();
        if parts.is_empty() || parts.len() > 3 || !parts.iter().all(|p| p.parse::<u64>().is_ok()) {
            return None;
        }
        let mut numbers = parts.iter().filter_map(|p| p.parse::<u64>().ok());
        let major = numbers.next()?;
        Some(Version::new(
            major,
            numbers.next().unwrap_or(0),
            numbers.next().unwrap_or(0),
        ))
    })
}

/// Format the doctor report for display.
pub fn format_report(report: &DoctorReport, verbose: bool) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    let _ = writeln!(output, "gstrecipe doctor");
    let _ = writeln!(output, "================\n");

    if verbose {
        let unknown = "unknown".to_string();
        let _ = writeln!(
            output,
            "Environment: {} ({})\n",
            report.environment.get("os").unwrap_or(&unknown),
            report.environment.get("arch").unwrap_or(&unknown)
        );
    }

    let _ = writeln!(output, "Checks:");
    for check in &report.checks {
        let status = if check.passed { "[OK]" } else { "[!!]" };
        let _ = writeln!(output, "  {} {}", status, check.name);

        if verbose || !check.passed {
            let _ = writeln!(output, "      {}", check.message);
        }
        if verbose {
            if let Some(path) = &check.path {
                let _ = writeln!(output, "      Path: {}", path.display());
            }
            if let Some(version) = &check.version {
                let _ = writeln!(output, "      Version: {}", version);
            }
        }
        if let Some(hint) = check.hint.as_ref().filter(|_| !check.passed) {
            let _ = writeln!(output, "      help: {}", hint);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "Summary: {} passed, {} failed",
        report.passed_count(),
        report.failed_count()
    );

    if report.all_passed() {
        let _ = writeln!(output, "\nAll build tools are available.");
    }

    output
}
