//! Core business logic module
//!
//! Planning and sequencing of the build chain. Process spawning and
//! filesystem writes go through [`crate::infra`].
//!
//! # Submodules
//!
//! - [`manifest`] - Manifest (demobuild.toml) parsing and validation
//! - [`plan`] - Operations, modes and the ordered invocation plan
//! - [`builder`] - Sequential, fail-fast plan execution
//! - [`init`] - Default manifest generation
//! - [`clean`] - Removal of packager and bundler output
//! - [`doctor`] - Tool and project layout checks

pub mod builder;
pub mod clean;
pub mod doctor;
pub mod init;
pub mod manifest;
pub mod plan;
