// ABOUTME: Finds packages whose manifest holds a given flattened key/value pair.
// ABOUTME: Unreadable manifests are reported as skipped instead of failing the query.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::manifest::{FlatConfig, PACKAGE_MANIFEST_FILE};

/// Packages live in `<project root>/packages/<name>`.
pub const PACKAGES_DIR: &str = "packages";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("at least one value is required")]
    NoValues,

    #[error("manifest key must not be empty")]
    EmptyKey,

    #[error("reading packages directory {path} failed: {source}")]
    ReadRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPackage {
    pub package: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    pub matched: Vec<String>,
    pub skipped: Vec<SkippedPackage>,
}

/// Match packages under `root` whose manifest value at `key` equals the
/// first of `values`. Further values are accepted but not compared.
pub fn query_manifest(root: &Path, key: &str, values: &[String]) -> Result<QueryReport, QueryError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(QueryError::EmptyKey);
    }
    let Some(wanted) = values.first().map(|v| v.trim()) else {
        return Err(QueryError::NoValues);
    };

    let mut report = QueryReport::default();
    for package in package_dirs(root)? {
        let name = package
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let manifest = match FlatConfig::load(&package.join(PACKAGE_MANIFEST_FILE)) {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::debug!("skipping package {name}: {e}");
                report.skipped.push(SkippedPackage {
                    package: name,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if manifest.get(key) == Some(wanted) {
            report.matched.push(name);
        }
    }
    Ok(report)
}

fn package_dirs(root: &Path) -> Result<Vec<PathBuf>, QueryError> {
    let read_error = |source: std::io::Error| QueryError::ReadRoot {
        path: root.to_path_buf(),
        source,
    };

    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(root).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}
