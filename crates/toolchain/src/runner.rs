use crate::invocation::Invocation;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

/// How a child process ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// Exited with a code
    Exited(i32),
    /// Killed by a signal, no exit code
    Terminated,
    /// Never started
    SpawnFailed(String),
}

impl StepStatus {
    pub fn success(&self) -> bool {
        matches!(self, StepStatus::Exited(0))
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Exited(code) => write!(f, "exit code {code}"),
            StepStatus::Terminated => f.write_str("terminated by signal"),
            StepStatus::SpawnFailed(reason) => write!(f, "failed to start: {reason}"),
        }
    }
}

/// Executes invocations; blocking until the child exits
pub trait ProcessRunner {
    fn run(&self, invocation: &Invocation) -> StepStatus;
}

/// Runs real child processes from the project root with inherited stdio
#[derive(Debug, Clone)]
pub struct SystemRunner {
    root: PathBuf,
}

impl SystemRunner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// `./bin/x` style programs are taken relative to the root; bare names go
    /// through `PATH`
    fn resolve_program(&self, program: &Path) -> PathBuf {
        let has_dir = program.components().count() > 1
            || matches!(program.components().next(), Some(Component::CurDir));
        if program.is_relative() && has_dir {
            self.root.join(program)
        } else {
            program.to_path_buf()
        }
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> StepStatus {
        let program = self.resolve_program(&invocation.program);
        log::debug!("Spawning {invocation} in {}", self.root.display());

        let status = Command::new(&program)
            .args(&invocation.args)
            .current_dir(&self.root)
            .status();

        match status {
            Ok(status) => match status.code() {
                Some(code) => StepStatus::Exited(code),
                None => StepStatus::Terminated,
            },
            Err(err) => {
                log::error!("Cannot start {}: {err}", program.display());
                StepStatus::SpawnFailed(err.to_string())
            }
        }
    }
}
