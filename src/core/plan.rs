//! Build plan construction
//!
//! Turns a manifest and an [`Operation`] into the ordered list of external
//! invocations: one packager run per target, in declared order, followed by
//! exactly one bundler run. Planning is pure; nothing is spawned here.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::manifest::Manifest;

/// Bundler configuration selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Development configuration
    Dev,
    /// Production configuration
    Release,
}

impl Mode {
    /// Bundler configuration file for this mode
    pub fn config_file<'a>(&self, manifest: &'a Manifest) -> &'a str {
        match self {
            Mode::Dev => &manifest.bundler.dev_config,
            Mode::Release => &manifest.bundler.prod_config,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Dev => write!(f, "dev"),
            Mode::Release => write!(f, "release"),
        }
    }
}

/// The three user-facing operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Package every target, then bundle once with the dev configuration
    Build,
    /// Package every target, then serve the bundle with the dev configuration
    Start,
    /// Package every target, then bundle once with the production configuration
    Release,
}

impl Operation {
    /// Mode selected by this operation
    pub fn mode(&self) -> Mode {
        match self {
            Operation::Build | Operation::Start => Mode::Dev,
            Operation::Release => Mode::Release,
        }
    }

    /// Whether the bundler runs as a dev server
    pub fn serves(&self) -> bool {
        matches!(self, Operation::Start)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Build => write!(f, "build"),
            Operation::Start => write!(f, "start"),
            Operation::Release => write!(f, "release"),
        }
    }
}

/// What an invocation is for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Step {
    /// Packaging one target
    Package {
        /// Target name
        target: String,
    },
    /// The final bundler run
    Bundle {
        /// Mode whose configuration is used
        mode: Mode,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Package { target } => write!(f, "package '{target}'"),
            Step::Bundle { mode } => write!(f, "bundle ({mode})"),
        }
    }
}

/// One external command to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// Purpose of this command
    pub step: Step,
    /// Program name or path
    pub program: String,
    /// Arguments
    pub args: Vec<String>,
    /// Working directory
    pub cwd: PathBuf,
}

impl Invocation {
    /// Shell-like rendering of the command line
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

fn quote_arg(arg: &str) -> String {
    if !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@+,".contains(c))
    {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Ordered invocations for one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    /// Operation this plan implements
    pub operation: Operation,
    /// Mode derived from the operation
    pub mode: Mode,
    /// Invocations in execution order; the bundler is always last
    pub invocations: Vec<Invocation>,
}

impl BuildPlan {
    /// Plan an operation against a manifest rooted at `project_dir`
    pub fn new(manifest: &Manifest, operation: Operation, project_dir: &Path) -> Self {
        let mode = operation.mode();
        let mut invocations: Vec<Invocation> = manifest
            .targets
            .iter()
            .map(|target| {
                let mut args = manifest.tools.packager_args.clone();
                args.push(target.path.display().to_string());
                args.extend(target.args.iter().cloned());
                Invocation {
                    step: Step::Package {
                        target: target.name.clone(),
                    },
                    program: manifest.tools.packager.clone(),
                    args,
                    cwd: project_dir.to_path_buf(),
                }
            })
            .collect();

        let mut bundler_args = Vec::new();
        if operation.serves() {
            bundler_args.extend(manifest.tools.serve_args.iter().cloned());
        }
        bundler_args.extend(manifest.tools.bundler_args.iter().cloned());
        bundler_args.push("--config".to_string());
        bundler_args.push(mode.config_file(manifest).to_string());

        invocations.push(Invocation {
            step: Step::Bundle { mode },
            program: manifest.tools.bundler.clone(),
            args: bundler_args,
            cwd: project_dir.to_path_buf(),
        });

        Self {
            operation,
            mode,
            invocations,
        }
    }

    /// Number of packaging invocations
    pub fn package_count(&self) -> usize {
        self.invocations
            .iter()
            .filter(|inv| matches!(inv.step, Step::Package { .. }))
            .count()
    }

    /// The bundler invocation
    pub fn bundle(&self) -> Option<&Invocation> {
        self.invocations
            .last()
            .filter(|inv| matches!(inv.step, Step::Bundle { .. }))
    }
}
