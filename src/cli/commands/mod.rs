//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod clean;
pub mod deps;
pub mod doctor;
pub mod init;
pub mod plan;

use anyhow::Result;
use clap::Subcommand;
use std::path::Path;

use crate::core::plan::Operation;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Package every target, then bundle with the dev configuration
    Build {
        /// Print the invocations without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Package every target, then serve the bundle with the dev configuration
    Start {
        /// Print the invocations without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Package every target, then bundle with the production configuration
    Release {
        /// Print the invocations without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the invocation sequence for an operation
    Plan {
        /// Operation to plan
        #[arg(short, long, value_enum, default_value_t = Operation::Build)]
        operation: Operation,
    },

    /// List the packages each target provides downstream
    Deps,

    /// Create a demobuild.toml with the default demo targets
    Init {
        /// Overwrite an existing manifest
        #[arg(short, long)]
        force: bool,
    },

    /// Check tools and project layout
    Doctor,

    /// Remove packager and bundler output
    Clean,
}

impl Commands {
    /// Execute the command
    pub async fn run(self, manifest_path: &Path) -> Result<()> {
        match self {
            Self::Build { dry_run } => {
                build::execute(manifest_path, Operation::Build, dry_run).await
            }
            Self::Start { dry_run } => {
                build::execute(manifest_path, Operation::Start, dry_run).await
            }
            Self::Release { dry_run } => {
                build::execute(manifest_path, Operation::Release, dry_run).await
            }
            Self::Plan { operation } => plan::execute(manifest_path, operation).await,
            Self::Deps => deps::execute(manifest_path).await,
            Self::Init { force } => init::execute(manifest_path, force).await,
            Self::Doctor => doctor::execute(manifest_path).await,
            Self::Clean => clean::execute(manifest_path).await,
        }
    }
}
