//! Manifest discovery
//!
//! Walks the deploy directory top-down and collects every `.yaml` file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AssembleError, Result};
use crate::models::ManifestRef;

/// Suffix marking a file as a manifest. Matched case-sensitively.
pub const MANIFEST_SUFFIX: &str = ".yaml";

/// Find every manifest under `root`.
///
/// A directory's own files come before those of its subdirectories. Sibling
/// order is whatever the filesystem returns unless `sort` is set, in which
/// case the result is ordered lexicographically by path.
pub fn discover_manifests(root: &Path, sort: bool) -> Result<Vec<ManifestRef>> {
    if !root.is_dir() {
        return Err(AssembleError::DeployDirNotFound(root.to_path_buf()));
    }

    let mut paths = Vec::new();
    walk(root, &mut paths)?;

    if sort {
        paths.sort();
    }

    info!("Discovered {} manifests under {:?}", paths.len(), root);
    Ok(paths
        .into_iter()
        .map(|path| ManifestRef::discovered(root, path))
        .collect())
}

fn walk(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
    let read_dir_err = |source| AssembleError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(read_dir_err)?;

        if file_type.is_dir() {
            subdirs.push(path);
            continue;
        }

        if !is_manifest(&path) {
            continue;
        }

        // Follows links: links to directories are never walked, and FIFOs,
        // sockets and devices are skipped.
        let metadata = fs::metadata(&path).map_err(|source| AssembleError::ReadManifest {
            path: path.clone(),
            source,
        })?;
        if metadata.is_file() {
            debug!("Found manifest {:?}", path);
            paths.push(path);
        } else {
            debug!("Skipping non-regular entry {:?}", path);
        }
    }

    for subdir in subdirs {
        walk(&subdir, paths)?;
    }

    Ok(())
}

fn is_manifest(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(MANIFEST_SUFFIX))
}
