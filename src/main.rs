//! Demobuild CLI - package WebAssembly demos, then bundle them
//!
//! Entry point for the demobuild command-line application.

use clap::Parser;

use demobuild::cli::output::{display_error, OutputConfig};
use demobuild::cli::Cli;
use demobuild::error::exit_code_for;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let output_config = OutputConfig::new(cli.quiet, cli.json, cli.verbose);
    output_config.apply_global();

    // RUST_LOG directives take precedence over -v
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(output_config.log_directive().into())
                .from_env_lossy(),
        )
        .init();

    if let Err(e) = cli.run().await {
        display_error(&e);
        std::process::exit(exit_code_for(&e));
    }
}
