use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration or provisioning resources.
#[derive(Debug, Error)]
pub enum FortuneError {
    /// Every theme flag is off, so random drawing has nothing to pick from.
    #[error("Fortune themes ALL disabled! Please check!")]
    AllThemesDisabled,

    /// The copywriting download failed and there is no local copy.
    #[error("Copywriting resource missing at {path}! Please check!")]
    ResourceMissing { path: PathBuf },

    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A download succeeded but its body was not JSON.
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl FortuneError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, FortuneError>;
