//! Demobuild - build orchestrator for WebAssembly demo packages
//!
//! Packages every configured target with an external packaging tool
//! (`wasm-pack` by default), then runs a bundler (`webpack` by default) once
//! with the configuration file selected by the build mode. The chain is
//! strictly sequential and stops at the first failure.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Manifest, planning and orchestration
//! - [`infra`] - Process execution and filesystem helpers
//! - [`config`] - Defaults and constants
//! - [`error`] - Error types and exit code mapping

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
