//! Build orchestration logic
//!
//! Executes a [`BuildPlan`] strictly in order, one invocation at a time.
//! The first failing invocation aborts the chain: nothing after it runs,
//! including the bundler.

use std::time::{Duration, Instant};

use crate::core::plan::{BuildPlan, Invocation, Mode, Operation};
use crate::error::BuildError;
use crate::infra::process::CommandRunner;

/// Progress notifications emitted while a plan runs
#[derive(Debug, Clone, Copy)]
pub enum BuildEvent<'a> {
    /// An invocation is about to start
    Started {
        /// Zero-based position in the plan
        index: usize,
        /// Total invocations in the plan
        total: usize,
        /// The invocation
        invocation: &'a Invocation,
    },
    /// An invocation finished successfully
    Finished {
        /// Zero-based position in the plan
        index: usize,
        /// The invocation
        invocation: &'a Invocation,
        /// Wall time spent
        elapsed: Duration,
    },
}

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    /// Operation that ran
    pub operation: Operation,
    /// Mode used for the bundler
    pub mode: Mode,
    /// Number of targets packaged
    pub packages_built: usize,
    /// Bundler configuration file used
    pub bundler_config: String,
    /// Total wall time
    pub elapsed: Duration,
}

/// Build orchestrator
#[derive(Debug)]
pub struct BuildOrchestrator<R> {
    runner: R,
}

impl<R: CommandRunner> BuildOrchestrator<R> {
    /// Create an orchestrator over a command runner
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Give back the runner
    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Run every invocation in the plan, stopping at the first failure
    pub async fn execute<F>(
        &mut self,
        plan: &BuildPlan,
        mut on_event: F,
    ) -> Result<BuildReport, BuildError>
    where
        F: FnMut(BuildEvent<'_>),
    {
        let started = Instant::now();
        let total = plan.invocations.len();

        tracing::info!(
            "Running '{}' ({} mode): {} packages, then bundler",
            plan.operation,
            plan.mode,
            plan.package_count()
        );

        for (index, invocation) in plan.invocations.iter().enumerate() {
            on_event(BuildEvent::Started {
                index,
                total,
                invocation,
            });
            tracing::info!("[{}/{}] {}", index + 1, total, invocation.step);
            tracing::debug!("Executing: {} (in {})", invocation, invocation.cwd.display());

            let step_started = Instant::now();
            let status = self.runner.run(invocation).await?;

            if !status.success() {
                tracing::warn!(
                    "{} failed with {:?}; skipping {} remaining step(s)",
                    invocation.step,
                    status.code,
                    total - index - 1
                );
                return Err(BuildError::StepFailed {
                    step: invocation.step.to_string(),
                    program: invocation.program.clone(),
                    code: status.code,
                });
            }

            on_event(BuildEvent::Finished {
                index,
                invocation,
                elapsed: step_started.elapsed(),
            });
        }

        let bundler_config = plan
            .bundle()
            .and_then(|inv| inv.args.last().cloned())
            .unwrap_or_default();

        Ok(BuildReport {
            operation: plan.operation,
            mode: plan.mode,
            packages_built: plan.package_count(),
            bundler_config,
            elapsed: started.elapsed(),
        })
    }
}
