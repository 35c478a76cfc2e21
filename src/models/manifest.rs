use std::path::{Path, PathBuf};

/// How a manifest entered the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// The fixed manifest defining the namespace.
    Namespace,
    /// A `.yaml` file found under the deploy directory.
    Discovered,
}

/// A manifest path plus the policy facts needed to process it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRef {
    pub path: PathBuf,
    pub kind: ManifestKind,
    /// Path relative to the deploy directory. Only set for discovered manifests.
    pub relative_path: Option<PathBuf>,
}

impl ManifestRef {
    pub fn namespace(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: ManifestKind::Namespace,
            relative_path: None,
        }
    }

    /// A manifest found at `path` while walking `root`.
    pub fn discovered(root: &Path, path: PathBuf) -> Self {
        let relative_path = path.strip_prefix(root).ok().map(Path::to_path_buf);
        Self {
            path,
            kind: ManifestKind::Discovered,
            relative_path,
        }
    }

    pub fn is_namespace(&self) -> bool {
        self.kind == ManifestKind::Namespace
    }
}

/// Text of one manifest after injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestText {
    pub source: ManifestRef,
    pub text: String,
    /// Number of namespace lines inserted. Zero for untouched manifests.
    pub injected: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovered_keeps_relative_path() {
        let root = Path::new("../deploy");
        let manifest = ManifestRef::discovered(root, root.join("cluster").join("role.yaml"));
        assert_eq!(manifest.kind, ManifestKind::Discovered);
        assert_eq!(
            manifest.relative_path,
            Some(PathBuf::from("cluster").join("role.yaml"))
        );
    }

    #[test]
    fn test_namespace_has_no_relative_path() {
        let manifest = ManifestRef::namespace("namespace.yaml");
        assert!(manifest.is_namespace());
        assert!(manifest.relative_path.is_none());
    }
}
