//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::defaults::{MANIFEST_ENV, MANIFEST_FILE};
use commands::Commands;

/// Demobuild - package WebAssembly demos, then bundle them
///
/// Runs the packager once per target in manifest order, then the bundler
/// once with the dev or production configuration.
#[derive(Parser, Debug)]
#[command(name = "demobuild")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the project manifest
    #[arg(long, global = true, env = MANIFEST_ENV, default_value = MANIFEST_FILE)]
    pub manifest: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        if let Some(cmd) = self.command {
            cmd.run(&self.manifest).await
        } else {
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
