use crate::config::ToolchainConfig;
use crate::error::{RegistryKind, Result, ToolchainError};
use crate::invocation::{CompileJob, Invocation};
use crate::target::TargetKey;
use std::path::PathBuf;

/// Ordered key → value table; lookups of unknown keys list the valid ones
#[derive(Debug, Clone)]
pub struct Registry<T> {
    kind: RegistryKind,
    entries: Vec<(TargetKey, T)>,
}

impl<T> Registry<T> {
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    /// Register a key; a repeated key replaces the earlier value in place
    pub fn insert(mut self, key: impl Into<TargetKey>, value: T) -> Self {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Keys in registration order
    pub fn keys(&self) -> Vec<TargetKey> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k.as_str() == key)
    }

    pub fn lookup(&self, key: &str) -> Result<&T> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
            .ok_or_else(|| ToolchainError::UnknownKey {
                registry: self.kind,
                key: key.to_string(),
                valid: self.keys(),
            })
    }
}

/// Key → ordered compiler invocations
pub type BuildRegistry = Registry<Vec<Invocation>>;

/// Key → program to launch
pub type BinaryRegistry = Registry<Executable>;

/// A runnable artifact and its fixed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Executable {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: &[&str]) -> Self {
        self.args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn to_invocation(&self) -> Invocation {
        Invocation::new(&self.program).args(self.args.iter().cloned())
    }
}

pub const BIN_MACHINE: &str = "./bin/test_machine";
pub const BIN_LINKER: &str = "./bin/test_elf";
pub const LIB_STATIC_LINKER: &str = "./bin/staticLinker.so";
pub const BIN_LINK_TOOL: &str = "./bin/link";

const MACHINE_SOURCES: &[&str] = &[
    "./src/tests/test_machine.c",
    "./src/common/printf.c",
    "./src/common/convert.c",
    "./src/common/trie.c",
    "./src/common/cleanup.c",
    "./src/hardware/cpu/isa.c",
    "./src/hardware/cpu/mmu.c",
    "./src/hardware/memory/dram.c",
];

const LINKER_TEST_SOURCES: &[&str] = &[
    "./src/tests/test_elf.c",
    "./src/common/printf.c",
    "./src/common/convert.c",
    "./src/common/cleanup.c",
    "./src/linker/parseElf.c",
    "./src/linker/staticlink.c",
];

const STATIC_LINKER_SOURCES: &[&str] = &[
    "./src/common/printf.c",
    "./src/common/convert.c",
    "./src/common/cleanup.c",
    "./src/datastruct/hashtable.c",
    "./src/linker/parseElf.c",
    "./src/linker/staticlink.c",
];

const LINK_TOOL_SOURCES: &[&str] = &[
    "./src/linker/linker.c",
    "./src/common/printf.c",
    "./src/common/convert.c",
    "./src/common/cleanup.c",
];

const LINK_TOOL_ARGS: &[&str] = &[
    "./files/exe/sum.elf.txt",
    "./files/exe/main.elf.txt",
    "-o",
    "./files/exe/output.eof.txt",
];

/// Every output the build registry can write
pub const BUILD_OUTPUTS: &[&str] = &[BIN_MACHINE, BIN_LINKER, LIB_STATIC_LINKER, BIN_LINK_TOOL];

/// The immutable target tables for one process run
#[derive(Debug, Clone)]
pub struct Registries {
    /// Used by `build`
    pub build: BuildRegistry,
    /// Used by `run`; includes the link tool
    pub run: BinaryRegistry,
    /// Used by `debug` and `memcheck`; primary binaries only
    pub inspect: BinaryRegistry,
}

impl Registries {
    /// Target tables for the simulator project
    pub fn standard(config: &ToolchainConfig) -> Self {
        let machine = CompileJob::executable(BIN_MACHINE).sources(MACHINE_SOURCES);
        let linker_test = CompileJob::executable(BIN_LINKER).sources(LINKER_TEST_SOURCES);
        let static_linker =
            CompileJob::shared_library(LIB_STATIC_LINKER).sources(STATIC_LINKER_SOURCES);
        let link_tool = CompileJob::dynamic_loader(BIN_LINK_TOOL).sources(LINK_TOOL_SOURCES);

        let build = Registry::new(RegistryKind::Build)
            .insert(TargetKey::MACHINE, vec![machine.to_invocation(config)])
            .insert(
                TargetKey::LINKER,
                vec![
                    linker_test.to_invocation(config),
                    static_linker.to_invocation(config),
                    link_tool.to_invocation(config),
                ],
            )
            .insert(
                TargetKey::SHARED_LIBRARY,
                vec![static_linker.to_invocation(config)],
            );

        let inspect = Registry::new(RegistryKind::Binary)
            .insert(TargetKey::MACHINE, Executable::new(BIN_MACHINE))
            .insert(TargetKey::LINKER, Executable::new(BIN_LINKER));

        let run = inspect.clone().insert(
            TargetKey::LINK_TOOL,
            Executable::new(BIN_LINK_TOOL).with_args(LINK_TOOL_ARGS),
        );

        Self {
            build,
            run,
            inspect,
        }
    }

    /// Keys usable as a verb to build and then run
    pub fn primary_keys(&self) -> Vec<TargetKey> {
        self.inspect
            .keys()
            .into_iter()
            .filter(|k| self.build.contains(k.as_str()))
            .collect()
    }
}
