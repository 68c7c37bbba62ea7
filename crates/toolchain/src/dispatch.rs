use crate::config::ToolchainConfig;
use crate::error::{Result, ToolchainError};
use crate::invocation::Invocation;
use crate::registry::Registries;
use crate::runner::{ProcessRunner, StepStatus};

/// Launches built binaries directly, under the debugger or under the memory analyzer
pub struct Dispatcher<'a, R: ProcessRunner> {
    config: &'a ToolchainConfig,
    registries: &'a Registries,
    runner: &'a R,
}

impl<'a, R: ProcessRunner> Dispatcher<'a, R> {
    pub fn new(config: &'a ToolchainConfig, registries: &'a Registries, runner: &'a R) -> Self {
        Self {
            config,
            registries,
            runner,
        }
    }

    /// Run the registered binary; its exit status is returned, not raised
    pub fn run(&self, key: &str) -> Result<StepStatus> {
        self.require_output_dir()?;
        let executable = self.registries.run.lookup(key)?;
        Ok(self.launch(key, executable.to_invocation()))
    }

    /// `<debugger> <binary>`
    pub fn debug(&self, key: &str) -> Result<StepStatus> {
        self.require_output_dir()?;
        let executable = self.registries.inspect.lookup(key)?;
        let invocation = Invocation::new(&self.config.debugger)
            .arg(executable.program.display().to_string());
        Ok(self.launch(key, invocation))
    }

    /// `<memchecker> --tool=memcheck --leak-check=full <binary>`
    pub fn memcheck(&self, key: &str) -> Result<StepStatus> {
        self.require_output_dir()?;
        let executable = self.registries.inspect.lookup(key)?;
        let invocation = Invocation::new(&self.config.memchecker)
            .args(["--tool=memcheck", "--leak-check=full"])
            .arg(executable.program.display().to_string());
        Ok(self.launch(key, invocation))
    }

    fn require_output_dir(&self) -> Result<()> {
        let dir = self.config.output_path();
        if dir.is_dir() {
            Ok(())
        } else {
            Err(ToolchainError::MissingOutputDir(dir))
        }
    }

    fn launch(&self, key: &str, invocation: Invocation) -> StepStatus {
        log::info!("Running '{key}': {invocation}");
        let status = self.runner.run(&invocation);
        if status.success() {
            log::debug!("'{key}' finished with {status}");
        } else {
            log::warn!("'{key}' finished with {status}");
        }
        status
    }
}
