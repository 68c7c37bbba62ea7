use crate::config::ToolchainConfig;
use std::fmt;
use std::path::PathBuf;

/// One external process: a program and its literal arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// What a compile step produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Plain executable
    Executable,
    /// Position independent shared object (`-shared -fPIC`)
    SharedLibrary,
    /// Executable that loads shared objects at runtime (`-ldl`)
    DynamicLoader,
}

/// Builder for a single compiler invocation
#[derive(Debug, Clone)]
pub struct CompileJob {
    kind: OutputKind,
    sources: Vec<String>,
    output: PathBuf,
}

impl CompileJob {
    pub fn executable(output: impl Into<PathBuf>) -> Self {
        Self::new(OutputKind::Executable, output)
    }

    pub fn shared_library(output: impl Into<PathBuf>) -> Self {
        Self::new(OutputKind::SharedLibrary, output)
    }

    pub fn dynamic_loader(output: impl Into<PathBuf>) -> Self {
        Self::new(OutputKind::DynamicLoader, output)
    }

    fn new(kind: OutputKind, output: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            sources: Vec::new(),
            output: output.into(),
        }
    }

    pub fn sources(mut self, sources: &[&str]) -> Self {
        self.sources.extend(sources.iter().map(|s| s.to_string()));
        self
    }

    /// `<cc> <cflags> -I <include> [-shared -fPIC] <sources> [-ldl] -o <output>`
    pub fn to_invocation(&self, config: &ToolchainConfig) -> Invocation {
        let mut invocation = Invocation::new(&config.compiler)
            .args(config.cflags.iter().cloned())
            .arg("-I")
            .arg(config.include_dir.display().to_string());
        if self.kind == OutputKind::SharedLibrary {
            invocation = invocation.args(["-shared", "-fPIC"]);
        }
        invocation = invocation.args(self.sources.iter().cloned());
        if self.kind == OutputKind::DynamicLoader {
            invocation = invocation.arg("-ldl");
        }
        invocation
            .arg("-o")
            .arg(self.output.display().to_string())
    }
}
