use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AssembleError, ConfigSource, Result};

pub const DEFAULT_DEPLOY_DIR: &str = "../deploy";
pub const DEFAULT_NAMESPACE_FILE: &str = "namespace.yaml";
pub const DEFAULT_NAMESPACE: &str = "octarine-dataplane";
pub const DEFAULT_OUTPUT_FILE: &str = "setup.yaml";
pub const DEFAULT_CLUSTER_PREFIX: &str = "cluster";

/// Inputs to a single assembly run.
///
/// Fields missing from a config file fall back to [`Default`], which carries
/// the historical constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Root directory scanned for `.yaml` manifests.
    pub deploy_dir: PathBuf,
    /// Manifest defining the namespace itself. Always emitted first, never injected.
    pub namespace_file: PathBuf,
    /// Namespace written beneath each `metadata:` line.
    pub namespace: String,
    /// Combined document destination. Created or truncated.
    pub output_file: PathBuf,
    /// Manifests whose path relative to `deploy_dir` starts with this are
    /// cluster-scoped and left untouched.
    pub cluster_prefix: String,
    /// Sort discovered paths instead of keeping filesystem order.
    pub sort_discovered: bool,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            deploy_dir: PathBuf::from(DEFAULT_DEPLOY_DIR),
            namespace_file: PathBuf::from(DEFAULT_NAMESPACE_FILE),
            namespace: DEFAULT_NAMESPACE.to_string(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            cluster_prefix: DEFAULT_CLUSTER_PREFIX.to_string(),
            sort_discovered: false,
        }
    }
}

impl AssemblerConfig {
    /// Load a JSON config file. Absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_err = |source: ConfigSource| AssembleError::Config {
            path: path.to_path_buf(),
            source,
        };

        let content = fs::read_to_string(path).map_err(|e| config_err(e.into()))?;
        serde_json::from_str(&content).map_err(|e| config_err(e.into()))
    }

    pub fn with_deploy_dir(mut self, deploy_dir: impl Into<PathBuf>) -> Self {
        self.deploy_dir = deploy_dir.into();
        self
    }

    pub fn with_namespace_file(mut self, namespace_file: impl Into<PathBuf>) -> Self {
        self.namespace_file = namespace_file.into();
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_output_file(mut self, output_file: impl Into<PathBuf>) -> Self {
        self.output_file = output_file.into();
        self
    }

    pub fn with_sorted_discovery(mut self, sort: bool) -> Self {
        self.sort_discovered = sort;
        self
    }
}
