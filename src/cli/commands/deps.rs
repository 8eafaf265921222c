//! CLI command for `demobuild deps`
//!
//! Lists the package each target provides downstream, as a `file:` spec.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::output::{is_json, print_detail, print_info};
use crate::core::manifest::Manifest;

/// Execute the deps command
pub async fn execute(manifest_path: &Path) -> Result<()> {
    let manifest = Manifest::load_validated(manifest_path)
        .with_context(|| format!("Failed to load {}", manifest_path.display()))?;

    if is_json() {
        let deps: serde_json::Map<String, serde_json::Value> = manifest
            .targets
            .iter()
            .map(|t| (t.name.clone(), serde_json::Value::String(t.dependency_spec())))
            .collect();
        let json = serde_json::json!({ "dependencies": deps });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    print_info(&format!("Dependencies provided by {}:", manifest.project.name));
    for target in &manifest.targets {
        print_detail(&format!("{} -> {}", target.name, target.dependency_spec()));
    }
    Ok(())
}
