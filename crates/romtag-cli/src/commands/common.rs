//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use glob::Pattern;
use romtag_core::{Config, ItemId};
use std::fmt;
use std::path::{Path, PathBuf};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that destructors run and the run log is flushed.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) u8);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; never shown to the user
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Parse a comma-separated item list
pub(crate) fn parse_items(list: &str) -> Result<Vec<ItemId>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| ItemId::new(s).map_err(Into::into))
        .collect()
}

/// Archive files directly inside `dir`, ordered by item name
pub(crate) fn scan_archives(dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Scan directory not found: {}", dir.display());
    }

    let dir_str = dir
        .to_str()
        .with_context(|| format!("Scan directory is not valid UTF-8: {}", dir.display()))?;
    let pattern = format!("{}/*", Pattern::escape(dir_str));

    let mut archives: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("Invalid scan pattern: {}", pattern))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|path| path.is_file() && config.is_archive(path))
        .collect();

    archives.sort_by(|a, b| a.file_stem().cmp(&b.file_stem()).then_with(|| a.cmp(b)));
    Ok(archives)
}

/// Item id of an archive: its file stem
pub(crate) fn item_for(path: &Path) -> Option<ItemId> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(ItemId::try_new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_scan_archives_filters_and_sorts() {
        let temp = tempdir().unwrap();
        for name in ["sf2.zip", "neogeo.7z", "readme.txt", "1942.ZIP"] {
            fs::write(temp.path().join(name), b"").unwrap();
        }
        fs::create_dir_all(temp.path().join("sf2")).unwrap();

        let archives = scan_archives(temp.path(), &Config::default()).unwrap();
        let names: Vec<String> = archives
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["1942.ZIP", "neogeo.7z", "sf2.zip"]);
    }

    #[test]
    fn test_scan_archives_missing_dir() {
        let temp = tempdir().unwrap();
        assert!(scan_archives(&temp.path().join("nope"), &Config::default()).is_err());
    }

    #[test]
    fn test_parse_items() {
        let items = parse_items("pacman, galaga,,").unwrap();
        assert_eq!(items, vec![ItemId::new("pacman").unwrap(), ItemId::new("galaga").unwrap()]);
        assert!(parse_items("../etc").is_err());
    }

    #[test]
    fn test_item_for() {
        assert_eq!(
            item_for(Path::new("/roms/pacman.zip")),
            Some(ItemId::new("pacman").unwrap())
        );
    }
}
