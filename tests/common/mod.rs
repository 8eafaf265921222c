//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Lines the fake tools appended to `calls.log`, empty if none ran
    pub fn calls(&self) -> Vec<String> {
        if !self.file_exists("calls.log") {
            return Vec::new();
        }
        self.read_file("calls.log")
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Create an executable shell script
    #[cfg(unix)]
    pub fn create_script(&self, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        self.create_file(name, &format!("#!/bin/sh\n{body}\n"));
        let path = self.dir.path().join(name);
        let mut perms = std::fs::metadata(&path)
            .expect("Failed to stat script")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("Failed to chmod script");
    }

    /// Install fake packager and bundler scripts that log their argv
    ///
    /// The packager exits with `fail_code` when its target path contains
    /// `fail_target`.
    #[cfg(unix)]
    pub fn install_fake_tools(&self, fail_target: Option<&str>, fail_code: i32) {
        self.install_fake_tools_in("", fail_target, fail_code);
    }

    /// Install the fake tools under `subdir`, still logging to the root `calls.log`
    #[cfg(unix)]
    pub fn install_fake_tools_in(&self, subdir: &str, fail_target: Option<&str>, fail_code: i32) {
        let log = self.path().join("calls.log");
        let log = log.display();
        let fail = match fail_target {
            Some(target) => format!("case \"$2\" in *{target}*) exit {fail_code};; esac"),
            None => String::new(),
        };
        let tools = Path::new(subdir).join("tools");
        self.create_script(
            &tools.join("fake-packager").to_string_lossy(),
            &format!("echo \"packager $*\" >> \"{log}\"\n{fail}"),
        );
        self.create_script(
            &tools.join("fake-bundler").to_string_lossy(),
            &format!("echo \"bundler $*\" >> \"{log}\""),
        );
    }

    /// Write a manifest using the fake tools and the given targets
    pub fn write_manifest(&self, targets: &[&str]) {
        self.write_manifest_in("", targets);
    }

    /// Write the fake-tool manifest to `<subdir>/demobuild.toml`
    pub fn write_manifest_in(&self, subdir: &str, targets: &[&str]) {
        let mut manifest = String::from(
            r#"[project]
name = "test-demos"
version = "1.0.0"
license = "MIT"
repository = "https://example.com/test-demos"
keywords = ["wasm"]

[tools]
packager = "./tools/fake-packager"
bundler = "./tools/fake-bundler"

[bundler]
dev_config = "webpack.dev.js"
prod_config = "webpack.prod.js"
"#,
        );
        for target in targets {
            manifest.push_str(&format!(
                "\n[[targets]]\nname = \"{target}\"\npath = \"demos/{target}\"\n"
            ));
        }
        let path = Path::new(subdir).join("demobuild.toml");
        self.create_file(&path.to_string_lossy(), &manifest);
    }

    /// Run demobuild in the project directory
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_demobuild"));
        cmd.current_dir(self.path());
        cmd.env_remove("DEMOBUILD_MANIFEST");
        cmd.env_remove("RUST_LOG");
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("Failed to execute demobuild")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// The five demo targets in build order
pub const DEMO_TARGETS: &[&str] = &["hello_svelte", "hello_world", "reposition", "styled", "toggle"];

/// Combined stdout and stderr
pub fn combined_output(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}
