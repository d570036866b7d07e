//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

use crate::params::ParamStoreError;

/// Errors that can abort configuration resolution
///
/// Every variant is terminal: the resolver never retries and never
/// returns a partially resolved [`crate::Config`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Defaults file missing or unreadable
    #[error("Failed to read defaults file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Defaults file is not valid YAML for the defaults record
    #[error("Failed to parse defaults YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Stage is not one of dev, stage, test, prod (or production)
    #[error("Invalid Stage type: {0:?}")]
    InvalidStage(String),

    /// Parameter store session or query failed
    #[error("Parameter store error: {0}")]
    RemoteConnection(String),

    /// Blocking runtime could not be started
    #[error("Failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// Blocking entry point called from inside an async runtime
    #[error("load_blocking called from within an async runtime; use load().await")]
    NestedRuntime,
}

impl ConfigError {
    /// Create a file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid stage error
    pub fn invalid_stage(value: impl Into<String>) -> Self {
        Self::InvalidStage(value.into())
    }
}

impl From<ParamStoreError> for ConfigError {
    fn from(err: ParamStoreError) -> Self {
        Self::RemoteConnection(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
