//! CLI implementation for `demobuild clean`

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::output::{is_json, print_detail, print_success};
use crate::core::clean::{clean_project, has_build_artifacts};
use crate::core::manifest::{project_root, Manifest};

/// Execute the clean command
pub async fn execute(manifest_path: &Path) -> Result<()> {
    let manifest = Manifest::load_validated(manifest_path)
        .with_context(|| format!("Failed to load {}", manifest_path.display()))?;
    let project_dir = project_root(manifest_path);

    if !has_build_artifacts(&project_dir, &manifest) && !is_json() {
        print_success("Nothing to clean");
        return Ok(());
    }

    let result =
        clean_project(&project_dir, &manifest).with_context(|| "Failed to clean build artifacts")?;

    if is_json() {
        let json = serde_json::json!({
            "status": "success",
            "removed": result.removed,
            "skipped": result.skipped,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    print_success("Cleaned build artifacts:");
    for dir in &result.removed {
        print_detail(&format!("Removed {}/", dir.display()));
    }
    Ok(())
}
