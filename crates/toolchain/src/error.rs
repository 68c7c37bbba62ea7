use crate::target::TargetKey;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for toolchain operations
pub type Result<T> = std::result::Result<T, ToolchainError>;

/// Which registry a lookup went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Build,
    Binary,
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKind::Build => f.write_str("build"),
            RegistryKind::Binary => f.write_str("binary"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ToolchainError {
    /// Key is not registered; carries every valid key in registration order
    #[error("input the correct {registry} key: [{}]", format_keys(.valid))]
    UnknownKey {
        registry: RegistryKind,
        key: String,
        valid: Vec<TargetKey>,
    },

    /// run/debug/memcheck need a build directory
    #[error("output directory {0} does not exist, build a target first")]
    MissingOutputDir(PathBuf),

    #[error("IO error on {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid artifact pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ToolchainError {
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Unknown keys are reported to the user instead of failing the process
    pub fn is_unknown_key(&self) -> bool {
        matches!(self, Self::UnknownKey { .. })
    }
}

fn format_keys(keys: &[TargetKey]) -> String {
    keys.iter()
        .map(|k| format!("'{k}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
