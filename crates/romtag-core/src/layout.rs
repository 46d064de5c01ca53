//! On-disk layout of the versioned cache directory
//!
//! ```text
//! <cache_dir>/
//!   CURRENT              catalog version of the most recent build
//!   <version>/queries/   one file per cached query result
//!   <version>/records/   one file per catalog item
//! ```

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

const CURRENT_FILE: &str = "CURRENT";

/// Paths of one catalog version's cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    cache_dir: PathBuf,
    version: String,
}

impl CacheLayout {
    /// Layout for a known catalog version; records it as the current version
    pub fn for_version(cache_dir: &Path, version: &str) -> CoreResult<Self> {
        let layout = Self {
            cache_dir: cache_dir.to_path_buf(),
            version: sanitize_version(version),
        };
        std::fs::create_dir_all(layout.root()).map_err(|e| CoreError::IoWithPath {
            path: layout.root().display().to_string(),
            source: e,
        })?;
        let current = cache_dir.join(CURRENT_FILE);
        std::fs::write(&current, &layout.version).map_err(|e| CoreError::IoWithPath {
            path: current.display().to_string(),
            source: e,
        })?;
        Ok(layout)
    }

    /// Layout of the most recently built version, for runs without a catalog
    pub fn current(cache_dir: &Path) -> CoreResult<Self> {
        let current = cache_dir.join(CURRENT_FILE);
        let version = match std::fs::read_to_string(&current) {
            Ok(v) if !v.trim().is_empty() => sanitize_version(v.trim()),
            Ok(_) => {
                return Err(CoreError::NoCacheVersion {
                    path: cache_dir.display().to_string(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CoreError::NoCacheVersion {
                    path: cache_dir.display().to_string(),
                })
            }
            Err(e) => {
                return Err(CoreError::IoWithPath {
                    path: current.display().to_string(),
                    source: e,
                })
            }
        };
        Ok(Self {
            cache_dir: cache_dir.to_path_buf(),
            version,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `<cache_dir>/<version>`
    pub fn root(&self) -> PathBuf {
        self.cache_dir.join(&self.version)
    }

    pub fn queries_dir(&self) -> PathBuf {
        self.root().join("queries")
    }

    pub fn records_dir(&self) -> PathBuf {
        self.root().join("records")
    }
}

/// Reduce a catalog build string to a safe directory name
fn sanitize_version(version: &str) -> String {
    let cleaned: String = version
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "unversioned".to_string()
    } else {
        cleaned
    }
}
