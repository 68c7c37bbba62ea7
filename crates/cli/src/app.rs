use crate::router::{Command, Route, Verb};
use anyhow::{Context as AnyhowContext, Result};
use simkit_source::{FileScanner, LineCounter, NormalizerConfig, ScanOptions, SourceNormalizer};
use simkit_toolchain::{
    clean, ArtifactSet, BuildEngine, Dispatcher, Registries, StepStatus, SystemRunner,
    ToolchainConfig,
};

/// Immutable configuration for one process run
pub(crate) struct App {
    pub(crate) toolchain: ToolchainConfig,
    pub(crate) registries: Registries,
    pub(crate) scan: ScanOptions,
    pub(crate) normalizer: NormalizerConfig,
    pub(crate) json: bool,
}

impl App {
    pub(crate) fn new(
        toolchain: ToolchainConfig,
        normalizer: NormalizerConfig,
        json: bool,
    ) -> Result<Self> {
        toolchain.validate()?;
        let scan = ScanOptions::default();
        scan.validate()?;
        normalizer.validate()?;
        let registries = Registries::standard(&toolchain);
        Ok(Self {
            toolchain,
            registries,
            scan,
            normalizer,
            json,
        })
    }

    pub(crate) fn execute(&self, command: &Command) -> Result<()> {
        let target = command.target.as_deref().unwrap_or_default();
        match &command.route {
            Route::Verb(Verb::Build) => self.build(target).map(|_| ()),
            Route::Verb(Verb::Run) => self.launch(Verb::Run, target),
            Route::Verb(Verb::Debug) => self.launch(Verb::Debug, target),
            Route::Verb(Verb::Memcheck) => self.launch(Verb::Memcheck, target),
            Route::Verb(Verb::Clean) => self.clean(),
            Route::Verb(Verb::Count) => self.count(),
            Route::Verb(Verb::Format) => self.format(),
            Route::BuildAndRun(key) => {
                if self.build(key.as_str())? {
                    self.launch(Verb::Run, key.as_str())?;
                }
                Ok(())
            }
        }
    }

    fn runner(&self) -> SystemRunner {
        SystemRunner::new(&self.toolchain.root)
    }

    /// Returns false when the key was unknown and reported
    fn build(&self, key: &str) -> Result<bool> {
        let runner = self.runner();
        let engine = BuildEngine::new(
            &self.registries.build,
            &runner,
            self.toolchain.output_path(),
        );
        Ok(report_unknown_key(engine.build(key))?.is_some())
    }

    fn launch(&self, verb: Verb, key: &str) -> Result<()> {
        let runner = self.runner();
        let dispatcher = Dispatcher::new(&self.toolchain, &self.registries, &runner);
        let result = match verb {
            Verb::Debug => dispatcher.debug(key),
            Verb::Memcheck => dispatcher.memcheck(key),
            _ => dispatcher.run(key),
        };
        if let Some(StepStatus::Exited(code)) = report_unknown_key(result)? {
            log::info!("{} '{key}' exited with code {code}", verb.name());
        }
        Ok(())
    }

    fn clean(&self) -> Result<()> {
        let report = clean(&self.toolchain.root, &ArtifactSet::standard())?;
        if report.failed > 0 {
            log::warn!("{} artifacts could not be removed", report.failed);
        }
        Ok(())
    }

    fn count(&self) -> Result<()> {
        let scanner = FileScanner::with_options(&self.toolchain.root, self.scan.clone());
        let report = LineCounter::new(&scanner)
            .count()
            .with_context(|| format!("Cannot count lines under {}", scanner.root().display()))?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", report.render());
        }
        Ok(())
    }

    fn format(&self) -> Result<()> {
        let scanner = FileScanner::with_options(&self.toolchain.root, self.scan.clone());
        let report = SourceNormalizer::new(self.normalizer.clone())
            .format(&scanner)
            .with_context(|| format!("Cannot format sources under {}", scanner.root().display()))?;
        for skipped in &report.skipped {
            println!("{}", skipped.path.display());
        }
        Ok(())
    }
}

/// Unknown keys print the valid set and end the operation without failing
fn report_unknown_key<T>(result: simkit_toolchain::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_unknown_key() => {
            println!("{err}");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
