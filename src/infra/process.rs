//! External process execution
//!
//! Spawns the packager and bundler. Child processes inherit stdio so the
//! tools' own diagnostics reach the user unchanged.

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;

use crate::core::plan::Invocation;
use crate::error::BuildError;

/// Completion status of an external tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl ToolStatus {
    /// Successful exit
    pub const SUCCESS: Self = Self { code: Some(0) };

    /// Whether the tool reported success
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ToolStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Runs one invocation to completion
///
/// Implementations must not return until the command has finished.
pub trait CommandRunner {
    /// Run the invocation and report how it exited
    fn run(
        &mut self,
        invocation: &Invocation,
    ) -> impl Future<Output = Result<ToolStatus, BuildError>> + Send;
}

/// Runner that spawns real processes
#[derive(Debug, Default)]
pub struct ProcessRunner {
    /// Capture output instead of inheriting the terminal
    quiet: bool,
}

impl ProcessRunner {
    /// Create a runner that inherits stdio
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard tool output (used with `--quiet` and `--json`)
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(
        &mut self,
        invocation: &Invocation,
    ) -> impl Future<Output = Result<ToolStatus, BuildError>> + Send {
        let program = invocation.program.clone();
        let args = invocation.args.clone();
        let cwd = invocation.cwd.clone();
        let quiet = self.quiet;

        async move {
            let resolved = resolve_program(&program, &cwd)?;
            tracing::debug!("Resolved '{program}' to {}", resolved.display());

            let mut cmd = tokio::process::Command::new(&resolved);
            cmd.args(&args).current_dir(&cwd).stdin(Stdio::null());
            if quiet {
                cmd.stdout(Stdio::null());
            }

            let status = cmd.status().await.map_err(|e| BuildError::Spawn {
                program: program.clone(),
                error: e.to_string(),
            })?;

            Ok(ToolStatus::from(status))
        }
    }
}

/// Locate a program the way a shell would, relative paths against `cwd`
pub fn resolve_program(program: &str, cwd: &std::path::Path) -> Result<PathBuf, BuildError> {
    which::which_in(program, std::env::var_os("PATH"), cwd).map_err(|_| {
        BuildError::ToolNotFound {
            program: program.to_string(),
        }
    })
}
