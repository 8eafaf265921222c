//! Clean logic
//!
//! Removes each target's packager output (`<path>/pkg`) and the bundler's
//! `dist/` directory.

use std::path::{Path, PathBuf};

use crate::config::defaults::BUNDLE_OUT_DIR;
use crate::core::manifest::Manifest;
use crate::error::FilesystemError;
use crate::infra::filesystem;

/// Result of clean operation
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Directories that were removed
    pub removed: Vec<PathBuf>,
    /// Directories that didn't exist (skipped)
    pub skipped: Vec<PathBuf>,
}

/// Directories produced by a build, relative to the project root
pub fn artifact_dirs(manifest: &Manifest) -> Vec<PathBuf> {
    manifest
        .targets
        .iter()
        .map(|target| target.output_dir())
        .chain(std::iter::once(PathBuf::from(BUNDLE_OUT_DIR)))
        .collect()
}

/// Remove build artifacts of a project
pub fn clean_project(project_dir: &Path, manifest: &Manifest) -> Result<CleanResult, FilesystemError> {
    let mut result = CleanResult::default();

    for dir in artifact_dirs(manifest) {
        let full = project_dir.join(&dir);
        if full.is_dir() {
            filesystem::remove_dir_all(&full)?;
            tracing::info!("Removed {}", full.display());
            result.removed.push(dir);
        } else {
            result.skipped.push(dir);
        }
    }

    Ok(result)
}

/// Check if any artifact directory exists
pub fn has_build_artifacts(project_dir: &Path, manifest: &Manifest) -> bool {
    artifact_dirs(manifest)
        .iter()
        .any(|dir| project_dir.join(dir).is_dir())
}
