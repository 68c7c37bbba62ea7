use std::path::PathBuf;
use thiserror::Error;

/// Result type for source tree operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors that can occur while scanning, counting or normalizing sources
#[derive(Error, Debug)]
pub enum SourceError {
    /// IO error on a specific file
    #[error("IO error on {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not single-byte text
    #[error("{path} is not ASCII text (byte 0x{byte:02x} at offset {offset})")]
    Decode {
        path: PathBuf,
        offset: usize,
        byte: u8,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SourceError {
    /// Attach a path to an IO error
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
