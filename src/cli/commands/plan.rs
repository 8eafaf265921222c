//! CLI command for `demobuild plan`
//!
//! Prints the invocation sequence for an operation without running it.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::output::{is_json, print_detail, print_info};
use crate::core::manifest::{project_root, Manifest};
use crate::core::plan::{BuildPlan, Operation};

/// Load the manifest and plan `operation`
pub fn load_plan(manifest_path: &Path, operation: Operation) -> Result<BuildPlan> {
    let manifest = Manifest::load_validated(manifest_path)
        .with_context(|| format!("Failed to load {}", manifest_path.display()))?;
    Ok(BuildPlan::new(
        &manifest,
        operation,
        &project_root(manifest_path),
    ))
}

/// Print a plan in the active output format
pub fn print_plan(plan: &BuildPlan) -> Result<()> {
    if is_json() {
        println!("{}", serde_json::to_string_pretty(plan)?);
        return Ok(());
    }

    print_info(&format!(
        "Plan for '{}' ({} mode) in {}:",
        plan.operation,
        plan.mode,
        plan.invocations
            .first()
            .map(|inv| inv.cwd.display().to_string())
            .unwrap_or_default()
    ));
    for (index, invocation) in plan.invocations.iter().enumerate() {
        print_detail(&format!("{}. {}", index + 1, invocation));
    }
    Ok(())
}

/// Execute the plan command
pub async fn execute(manifest_path: &Path, operation: Operation) -> Result<()> {
    let plan = load_plan(manifest_path, operation)?;
    print_plan(&plan)
}
