use std::path::PathBuf;

use dsc_core::{ConfigurationError, DscError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] DscError),
}

impl From<ConfigurationError> for IoError {
    fn from(err: ConfigurationError) -> Self {
        IoError::Core(err.into())
    }
}

pub type Result<T> = std::result::Result<T, IoError>;
