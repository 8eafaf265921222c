//! CLI command for `demobuild init`

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::output::{is_json, print_detail, print_success};
use crate::core::init::init_project;

/// Execute the init command
pub async fn execute(manifest_path: &Path, force: bool) -> Result<()> {
    let manifest = init_project(manifest_path, force)
        .with_context(|| format!("Failed to initialize {}", manifest_path.display()))?;

    if is_json() {
        let json = serde_json::json!({
            "status": "success",
            "manifest": manifest_path.display().to_string(),
            "targets": manifest.targets.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    print_success(&format!("Created {}", manifest_path.display()));
    print_detail(&format!("{} targets:", manifest.targets.len()));
    for target in &manifest.targets {
        print_detail(&format!("  {} ({})", target.name, target.path.display()));
    }
    Ok(())
}
