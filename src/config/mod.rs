//! Configuration constants
//!
//! Default tool names, file names and the built-in demo target list.

pub mod defaults;
