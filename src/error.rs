//! Error types for demobuild
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Manifest loading and validation errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file does not exist
    #[error("Manifest not found at '{path}'. Run 'demobuild init' to create one.")]
    NotFound { path: PathBuf },

    /// Manifest could not be read
    #[error("Failed to read manifest '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Manifest is not valid TOML or does not match the schema
    #[error("Failed to parse manifest: {source}")]
    Parse { source: toml::de::Error },

    /// Environment variable substitution failed
    #[error("Failed to substitute environment variables: {0}")]
    Substitution(String),

    /// Manifest could not be rendered as TOML
    #[error("Failed to serialize manifest: {0}")]
    Serialize(String),

    /// One or more validation problems
    #[error("Invalid manifest:\n  - {}", errors.join("\n  - "))]
    Invalid { errors: Vec<String> },

    /// Manifest already exists and would be overwritten
    #[error("Manifest already exists at '{path}'. Use --force to overwrite it")]
    AlreadyExists { path: PathBuf },
}

/// Errors raised while running the build chain
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// An external tool ran and reported failure
    #[error("{step} failed: '{program}' exited with {}", describe_code(*code))]
    StepFailed {
        step: String,
        program: String,
        code: Option<i32>,
    },

    /// An external tool could not be located on PATH
    #[error("Tool '{program}' not found in PATH. Run 'demobuild doctor' for details")]
    ToolNotFound { program: String },

    /// An external tool could not be started
    #[error("Failed to start '{program}': {error}")]
    Spawn { program: String, error: String },
}

impl BuildError {
    /// Process exit code to report for this error
    ///
    /// A failed step reports the tool's own exit code; anything else,
    /// including a tool killed by a signal, reports 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::StepFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },
}

/// Top-level demobuild error type
#[derive(Error, Debug)]
pub enum DemobuildError {
    /// Manifest error
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Build error
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

impl DemobuildError {
    /// Process exit code to report for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Build(e) => e.exit_code(),
            _ => 1,
        }
    }
}

/// Find the exit code carried by an error chain
///
/// Walks the `anyhow` chain looking for a [`BuildError`] (bare or wrapped in
/// [`DemobuildError`]); falls back to 1.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<BuildError>() {
            return e.exit_code();
        }
        if let Some(e) = cause.downcast_ref::<DemobuildError>() {
            return e.exit_code();
        }
    }
    1
}
