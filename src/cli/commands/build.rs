//! Build, start and release command implementation
//!
//! All three run the same chain: package every target in order, then run the
//! bundler once. They differ only in the bundler configuration and whether
//! the bundler serves.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::commands::plan::{load_plan, print_plan};
use crate::cli::output::{is_json, is_quiet, print_detail, print_info, print_success};
use crate::core::builder::{BuildEvent, BuildOrchestrator};
use crate::core::plan::Operation;
use crate::infra::process::ProcessRunner;

/// Execute an operation
pub async fn execute(manifest_path: &Path, operation: Operation, dry_run: bool) -> Result<()> {
    let plan = load_plan(manifest_path, operation)?;

    if dry_run {
        return print_plan(&plan);
    }

    // Tools share the terminal, so progress is plain lines printed between steps.
    let runner = ProcessRunner::new().quiet(is_quiet() || is_json());
    let mut orchestrator = BuildOrchestrator::new(runner);

    let result = orchestrator
        .execute(&plan, |event| match event {
            BuildEvent::Started {
                index,
                total,
                invocation,
            } => {
                print_info(&format!(
                    "[{}/{total}] {}: {}",
                    index + 1,
                    invocation.step,
                    invocation.command_line()
                ));
            }
            BuildEvent::Finished { elapsed, .. } => {
                print_detail(&format!("done in {:.1}s", elapsed.as_secs_f64()));
            }
        })
        .await;

    let report = result.with_context(|| format!("'{operation}' aborted"))?;

    if is_json() {
        let json = serde_json::json!({
            "status": "success",
            "operation": report.operation,
            "mode": report.mode,
            "packages_built": report.packages_built,
            "bundler_config": report.bundler_config,
            "elapsed_ms": u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    print_success(&format!("'{operation}' complete!"));
    print_detail(&format!("Packages built: {}", report.packages_built));
    print_detail(&format!(
        "Bundler config: {} ({} mode)",
        report.bundler_config, report.mode
    ));
    print_detail(&format!("Elapsed: {:.1}s", report.elapsed.as_secs_f64()));

    Ok(())
}
