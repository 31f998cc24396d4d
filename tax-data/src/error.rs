use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading configuration and parameter files.
///
/// Ledger queries never produce these; a failed query is a zero total.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("no tax parameter file found for {jurisdiction} in {dir}")]
    NoParameterFiles { jurisdiction: String, dir: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn parse(
        path: impl Into<PathBuf>,
        message: impl ToString,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
