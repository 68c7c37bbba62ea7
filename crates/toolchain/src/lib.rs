//! # Simkit Toolchain
//!
//! Drives the external C toolchain for the simulator project.
//!
//! ```text
//! TargetKey
//!     │
//!     ├──> BuildEngine  (BuildRegistry: key → [Invocation, ...])
//!     │      └─> every step runs, statuses collected in a BuildReport
//!     │
//!     └──> Dispatcher   (run / debug / memcheck registries)
//!            └─> child exit status handed back to the caller
//! ```
//!
//! Registries are plain values built once from a [`ToolchainConfig`] and
//! passed to each component. Looking up an unregistered key yields
//! [`ToolchainError::UnknownKey`], whose message lists the valid keys.

mod build;
mod clean;
mod config;
mod dispatch;
mod error;
mod invocation;
mod registry;
mod runner;
mod target;

pub use build::{BuildEngine, BuildReport, StepOutcome};
pub use clean::{clean, ArtifactSet, CleanReport, CLEAN_PATTERNS};
pub use config::ToolchainConfig;
pub use dispatch::Dispatcher;
pub use error::{RegistryKind, Result, ToolchainError};
pub use invocation::{CompileJob, Invocation, OutputKind};
pub use registry::{
    BinaryRegistry, BuildRegistry, Executable, Registries, Registry, BIN_LINKER, BIN_LINK_TOOL,
    BIN_MACHINE, BUILD_OUTPUTS, LIB_STATIC_LINKER,
};
pub use runner::{ProcessRunner, StepStatus, SystemRunner};
pub use target::TargetKey;
