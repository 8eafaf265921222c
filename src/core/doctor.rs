//! Doctor command logic
//!
//! Checks that the packager and bundler are installed and that the project
//! layout matches the manifest, with suggestions for anything missing.

use std::path::Path;

use crate::config::defaults::{DEFAULT_BUNDLER, DEFAULT_PACKAGER};
use crate::core::manifest::{project_root, Manifest};

/// Result of checking one build tool
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Tool label and program, e.g. `Packager (wasm-pack)`
    pub name: String,
    pub passed: bool,
    /// Version reported by `--version`, if any
    pub version: Option<String>,
    pub error: Option<String>,
    /// How to install or point at the tool
    pub suggestion: Option<String>,
}

impl CheckResult {
    fn pass(name: String, version: String) -> Self {
        Self {
            name,
            passed: true,
            version: Some(version),
            error: None,
            suggestion: None,
        }
    }

    fn fail(name: String, error: String, suggestion: &str) -> Self {
        Self {
            name,
            passed: false,
            version: None,
            error: Some(error),
            suggestion: Some(suggestion.to_string()),
        }
    }
}

/// Tool checks plus project layout problems
///
/// Both tools are needed by every operation, so any failed check or layout
/// issue fails the report.
#[derive(Debug, Default)]
pub struct DoctorReport {
    pub checks: Vec<CheckResult>,
    /// Manifest and layout problems
    pub config_issues: Vec<String>,
}

impl DoctorReport {
    /// Whether every tool was found and the layout matches the manifest
    pub fn all_passed(&self) -> bool {
        self.config_issues.is_empty() && self.checks.iter().all(|c| c.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Checks whose tool is missing or not runnable
    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Run `<command> --version` and pull a version number out of its output
///
/// Returns `None` when the command is not on PATH or exits unsuccessfully.
pub fn check_command_available(command: &str, cwd: &Path) -> Option<String> {
    let resolved = which::which_in(command, std::env::var_os("PATH"), cwd).ok()?;
    std::process::Command::new(resolved)
        .arg("--version")
        .current_dir(cwd)
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                let combined = format!("{stdout}{stderr}");
                Some(extract_version(&combined).unwrap_or_else(|| "unknown".to_string()))
            } else {
                None
            }
        })
}

/// Extract version string from command output
fn extract_version(output: &str) -> Option<String> {
    let version_regex = regex::Regex::new(r"v?(\d+\.\d+(?:\.\d+)?(?:-\w+)?)").ok()?;
    version_regex
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Check a tool used by the build chain
pub fn check_tool(label: &str, program: &str, cwd: &Path) -> CheckResult {
    let name = format!("{label} ({program})");
    if let Some(version) = check_command_available(program, cwd) {
        return CheckResult::pass(name, version);
    }

    let suggestion = if program == DEFAULT_PACKAGER {
        "Install wasm-pack: cargo install wasm-pack (https://rustwasm.github.io/wasm-pack/)"
    } else if program == DEFAULT_BUNDLER {
        "Install webpack locally: npm install --save-dev webpack webpack-cli, then run through npx or add node_modules/.bin to PATH"
    } else {
        "Install the tool or fix the path in the [tools] section of the manifest"
    };
    CheckResult::fail(
        name,
        format!("'{program}' not found in PATH or not runnable"),
        suggestion,
    )
}

/// Check target directories and bundler configs exist relative to the project root
pub fn check_project_layout(project_dir: &Path, manifest: &Manifest) -> Vec<String> {
    let mut issues = Vec::new();

    for target in &manifest.targets {
        let dir = project_dir.join(&target.path);
        if !dir.is_dir() {
            issues.push(format!(
                "Target '{}': directory '{}' does not exist",
                target.name,
                target.path.display()
            ));
        }
    }

    for (label, config) in [
        ("dev", &manifest.bundler.dev_config),
        ("prod", &manifest.bundler.prod_config),
    ] {
        if !project_dir.join(config).is_file() {
            issues.push(format!("Bundler {label} config '{config}' does not exist"));
        }
    }

    issues
}

/// Run all doctor checks against the manifest at `manifest_path`
///
/// Without a readable manifest the default tools are checked and the
/// manifest problem is reported as a configuration issue.
pub fn run_doctor(manifest_path: &Path) -> DoctorReport {
    let mut report = DoctorReport::default();
    let project_dir = project_root(manifest_path);

    match Manifest::load_validated(manifest_path) {
        Ok(manifest) => {
            report.checks.push(check_tool("Packager", &manifest.tools.packager, &project_dir));
            report.checks.push(check_tool("Bundler", &manifest.tools.bundler, &project_dir));
            for issue in check_project_layout(&project_dir, &manifest) {
                tracing::warn!("{issue}");
                report.config_issues.push(issue);
            }
        }
        Err(e) => {
            report.checks.push(check_tool("Packager", DEFAULT_PACKAGER, &project_dir));
            report.checks.push(check_tool("Bundler", DEFAULT_BUNDLER, &project_dir));
            report.config_issues.push(e.to_string());
        }
    }

    report
}
