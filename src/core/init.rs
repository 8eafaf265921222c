//! Project initialization logic
//!
//! Writes a `demobuild.toml` listing the five demo targets.

use std::path::Path;

use crate::core::manifest::Manifest;
use crate::error::{DemobuildError, ManifestError};
use crate::infra::filesystem;

const MANIFEST_HEADER: &str = "\
# demobuild manifest
#
# Each [[targets]] entry is packaged in order with `tools.packager`,
# then `tools.bundler` runs once with the configuration for the mode:
#   build / start -> bundler.dev_config
#   release       -> bundler.prod_config
# String values may reference environment variables as ${VAR}.

";

/// Render the default manifest with its explanatory header
pub fn default_manifest_toml() -> Result<String, DemobuildError> {
    let body = Manifest::demo()
        .to_toml()
        .map_err(|e| ManifestError::Serialize(e.to_string()))?;
    Ok(format!("{MANIFEST_HEADER}{body}"))
}

/// Write the default manifest to `manifest_path`
///
/// Refuses to overwrite an existing manifest unless `force` is set.
pub fn init_project(manifest_path: &Path, force: bool) -> Result<Manifest, DemobuildError> {
    if manifest_path.exists() && !force {
        return Err(ManifestError::AlreadyExists {
            path: manifest_path.to_path_buf(),
        }
        .into());
    }

    let content = default_manifest_toml()?;
    filesystem::write_file(manifest_path, &content)?;
    tracing::info!("Wrote {}", manifest_path.display());

    Ok(Manifest::demo())
}
