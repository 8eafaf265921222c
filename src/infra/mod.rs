//! Infrastructure layer
//!
//! Handles I/O operations: external processes and filesystem writes.

pub mod filesystem;
pub mod process;
