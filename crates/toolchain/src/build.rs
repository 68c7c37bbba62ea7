use crate::error::{Result, ToolchainError};
use crate::invocation::Invocation;
use crate::registry::BuildRegistry;
use crate::runner::{ProcessRunner, StepStatus};
use crate::target::TargetKey;
use std::fs;
use std::path::{Path, PathBuf};

/// One executed build step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub invocation: Invocation,
    pub status: StepStatus,
}

/// Every step of a target, in the order it ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub target: TargetKey,
    pub steps: Vec<StepOutcome>,
}

impl BuildReport {
    pub fn failed_steps(&self) -> impl Iterator<Item = (usize, &StepOutcome)> {
        self.steps
            .iter()
            .enumerate()
            .filter(|(_, step)| !step.status.success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_steps().next().is_none()
    }
}

/// Runs a target's compile steps one after another
pub struct BuildEngine<'a, R: ProcessRunner> {
    registry: &'a BuildRegistry,
    runner: &'a R,
    output_dir: PathBuf,
}

impl<'a, R: ProcessRunner> BuildEngine<'a, R> {
    pub fn new(registry: &'a BuildRegistry, runner: &'a R, output_dir: impl AsRef<Path>) -> Self {
        Self {
            registry,
            runner,
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Creates the output directory, then runs every registered step even when
    /// an earlier one fails.
    pub fn build(&self, key: &str) -> Result<BuildReport> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| ToolchainError::file_io(&self.output_dir, e))?;

        let steps = self.registry.lookup(key)?;
        log::info!("Building '{key}' ({} steps)", steps.len());

        let mut outcomes = Vec::with_capacity(steps.len());
        for (index, invocation) in steps.iter().enumerate() {
            log::debug!("[{}/{}] {invocation}", index + 1, steps.len());
            let status = self.runner.run(invocation);
            if !status.success() {
                log::warn!("Step {} of '{key}' ended with {status}", index + 1);
            }
            outcomes.push(StepOutcome {
                invocation: invocation.clone(),
                status,
            });
        }

        let report = BuildReport {
            target: TargetKey::new(key),
            steps: outcomes,
        };
        if !report.all_succeeded() {
            let failed: Vec<String> = report
                .failed_steps()
                .map(|(index, _)| (index + 1).to_string())
                .collect();
            log::warn!(
                "Build of '{key}' finished with failing steps: {}",
                failed.join(", ")
            );
        }
        Ok(report)
    }
}
