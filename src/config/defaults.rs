//! Default configuration values

/// Manifest file name looked up in the current directory
pub const MANIFEST_FILE: &str = "demobuild.toml";

/// Environment variable that overrides the manifest location
pub const MANIFEST_ENV: &str = "DEMOBUILD_MANIFEST";

/// Default packaging tool
pub const DEFAULT_PACKAGER: &str = "wasm-pack";

/// Default packager arguments placed before the target path
pub const DEFAULT_PACKAGER_ARGS: &[&str] = &["build"];

/// Default bundler
pub const DEFAULT_BUNDLER: &str = "webpack";

/// Default bundler arguments prepended when serving (`start`)
pub const DEFAULT_SERVE_ARGS: &[&str] = &["serve"];

/// Bundler configuration used by `build` and `start`
pub const DEFAULT_DEV_CONFIG: &str = "webpack.dev.js";

/// Bundler configuration used by `release`
pub const DEFAULT_PROD_CONFIG: &str = "webpack.prod.js";

/// Directory inside each target where the packager writes its output
pub const PACKAGE_OUT_DIR: &str = "pkg";

/// Directory the bundler writes to
pub const BUNDLE_OUT_DIR: &str = "dist";

/// Default project name written by `init`
pub const DEFAULT_PROJECT_NAME: &str = "div-examples";

/// Built-in demo targets, in build order
pub const DEFAULT_TARGETS: &[&str] = &["hello_svelte", "hello_world", "reposition", "styled", "toggle"];

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
