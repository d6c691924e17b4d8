//! Shared configuration error type

use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading or validating a configuration file.
///
/// Read and parse failures carry the offending path so a bad deployment
/// can be traced to the file, not just the syscall.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Result alias using common Error
pub type Result<T> = std::result::Result<T, Error>;
