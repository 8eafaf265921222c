//! CLI command for `demobuild doctor`
//!
//! Checks the packager and bundler are installed and the project layout
//! matches the manifest.

use anyhow::Result;
use std::path::Path;

use crate::cli::output::{
    create_spinner, is_json, is_quiet, print_detail, print_info, print_success, print_warning,
    status,
};
use crate::core::doctor::run_doctor;

/// Version line including the git revision when the build recorded one
fn version_line() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if !sha.is_empty() && sha != "VERGEN_IDEMPOTENT_OUTPUT" => {
            let short = sha.get(..7).unwrap_or(sha);
            format!("demobuild {version} ({short})")
        }
        _ => format!("demobuild {version}"),
    }
}

/// Execute the doctor command
pub async fn execute(manifest_path: &Path) -> Result<()> {
    let spinner = create_spinner("Checking build tools...");
    let report = run_doctor(manifest_path);
    spinner.finish_and_clear();

    if is_json() {
        let json_result = serde_json::json!({
            "status": if report.all_passed() { "success" } else { "error" },
            "version": version_line(),
            "checks": report.checks.iter().map(|c| serde_json::json!({
                "name": c.name,
                "passed": c.passed,
                "version": c.version,
                "error": c.error,
                "suggestion": c.suggestion
            })).collect::<Vec<_>>(),
            "config_issues": report.config_issues,
            "passed_count": report.passed_count(),
            "total_count": report.checks.len()
        });
        println!("{}", serde_json::to_string_pretty(&json_result)?);

        if !report.all_passed() {
            anyhow::bail!("Doctor found problems");
        }
        return Ok(());
    }

    if is_quiet() {
        if !report.all_passed() {
            for check in report.failed_checks() {
                eprintln!("{} Missing: {}", status::ERROR, check.name);
            }
            for issue in &report.config_issues {
                eprintln!("{} {issue}", status::ERROR);
            }
            anyhow::bail!("Doctor found problems");
        }
        return Ok(());
    }

    print_info(&format!("{} - checking build tools...", version_line()));
    println!();

    for check in &report.checks {
        let version_str = check
            .version
            .as_ref()
            .map(|v| format!(" (v{v})"))
            .unwrap_or_default();

        if check.passed {
            println!("  {} {}{version_str}", status::SUCCESS, check.name);
        } else {
            println!("  {} {}", status::ERROR, check.name);
            if let Some(error) = &check.error {
                print_detail(&format!("Error: {error}"));
            }
            if let Some(suggestion) = &check.suggestion {
                print_detail(&format!("Suggestion: {suggestion}"));
            }
        }
    }

    if !report.config_issues.is_empty() {
        println!();
        print_warning("Project issues:");
        for issue in &report.config_issues {
            print_detail(&format!("• {issue}"));
        }
    }

    println!();
    let passed = report.passed_count();
    let total = report.checks.len();

    if report.all_passed() {
        print_success(&format!("All checks passed ({passed}/{total})"));
        print_detail("Ready to build.");
        Ok(())
    } else {
        println!("{} {passed}/{total} tool checks passed", status::ERROR);
        anyhow::bail!("Doctor found problems. Fix the items above and run 'demobuild doctor' again.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line_names_crate_version() {
        assert!(version_line().starts_with(&format!("demobuild {}", env!("CARGO_PKG_VERSION"))));
    }
}
