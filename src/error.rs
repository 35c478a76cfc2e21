use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling the setup document.
///
/// Every variant is fatal: nothing is retried and no output is written once
/// one of these has been returned.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("Deploy directory not found: {0}")]
    DeployDirNotFound(PathBuf),

    #[error("Namespace manifest not found: {0}")]
    NamespaceManifestNotFound(PathBuf),

    #[error("Failed to read directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read manifest {path}")]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output {path}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigSource,
    },
}

/// Why a config file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigSource {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AssembleError>;
