//! Dependency resolution against a scan directory
//!
//! Every reference a record carries (devices, BIOS chain, parent, disks,
//! sample set) is classified as present or missing by looking for a file
//! whose stem matches the reference. ROM sets count only as archives with
//! one of the scan's extensions; disk images may have any extension.

use glob::Pattern;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::item_id::ItemId;
use crate::record::MetadataRecord;

/// Placeholder for a comma inside a label identifier
pub const COMMA_PLACEHOLDER: &str = ":comma:";

/// Kind of dependency a record refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DependencyKind {
    Device,
    Bios,
    Parent,
    Disk,
    Sample,
}

impl DependencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Device => "device",
            DependencyKind::Bios => "bios",
            DependencyKind::Parent => "parent",
            DependencyKind::Disk => "disk",
            DependencyKind::Sample => "sample",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking one dependency on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    /// A matching file was found
    Present,
    /// No matching file was found
    Missing,
    /// Not verified because no sample directory was given; tagged as present
    Assumed,
    /// Dependency checking is disabled
    Unchecked,
}

/// One dependency with its presence on disk
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedDependency {
    pub kind: DependencyKind,
    /// Label-safe identifier (see [`label_safe`])
    pub id: String,
    pub presence: Presence,
}

impl ResolvedDependency {
    pub fn is_missing(&self) -> bool {
        self.presence == Presence::Missing
    }
}

/// Per-item context threaded through resolution
#[derive(Debug, Clone)]
pub struct ScanContext {
    /// Item whose dependencies are being resolved
    pub item: ItemId,

    /// Directory holding the scanned archives
    pub scan_dir: PathBuf,

    /// Verify presence on disk. When off, every dependency is `Unchecked`.
    pub check_deps: bool,

    /// Directory holding sample sets, when sample checking was requested
    pub sample_dir: Option<PathBuf>,

    /// Archive extensions that count as a ROM or sample set, without the dot
    pub archive_extensions: Vec<String>,
}

/// Rewrite an identifier so it can travel inside a comma-joined label batch
pub fn label_safe(id: &str) -> String {
    id.replace(',', COMMA_PLACEHOLDER)
}

/// Resolve every dependency of `record` in a stable order: devices, BIOS
/// chain, parent, disks, sample set
pub fn resolve(record: &MetadataRecord, ctx: &ScanContext) -> CoreResult<Vec<ResolvedDependency>> {
    if ctx.check_deps && !ctx.scan_dir.is_dir() {
        return Err(CoreError::ScanDirNotFound {
            path: ctx.scan_dir.display().to_string(),
        });
    }

    let mut resolved = Resolved::new(ctx);

    for device in &record.device_refs {
        let presence = resolved.check(|| archive_exists(&ctx.scan_dir, device, ctx))?;
        resolved.push(DependencyKind::Device, device, presence);
    }

    for link in &record.bios_chain {
        let kind = if record.parent.as_ref() == Some(link) {
            DependencyKind::Parent
        } else {
            DependencyKind::Bios
        };
        let presence = resolved.check(|| archive_exists(&ctx.scan_dir, link, ctx))?;
        resolved.push(kind, link, presence);
    }

    if let Some(parent) = &record.parent {
        let presence = resolved.check(|| archive_exists(&ctx.scan_dir, parent, ctx))?;
        resolved.push(DependencyKind::Parent, parent, presence);
    }

    for disk in &record.disks {
        // Clones share disk images with their parent; either folder counts
        let presence = resolved.check(|| {
            if let Some(parent) = &record.parent {
                if file_exists(&ctx.scan_dir.join(parent.as_str()), disk, None)? {
                    return Ok(true);
                }
            }
            file_exists(&ctx.scan_dir.join(ctx.item.as_str()), disk, None)
        })?;
        resolved.push(DependencyKind::Disk, disk, presence);
    }

    if let Some(sample) = &record.sample_parent {
        let presence = match (&ctx.sample_dir, ctx.check_deps) {
            (_, false) => Presence::Unchecked,
            (None, true) => Presence::Assumed,
            (Some(dir), true) => {
                if archive_exists(dir, sample, ctx)? {
                    Presence::Present
                } else {
                    Presence::Missing
                }
            }
        };
        resolved.push(DependencyKind::Sample, sample, presence);
    }

    Ok(resolved.finish())
}

struct Resolved<'a> {
    ctx: &'a ScanContext,
    deps: Vec<ResolvedDependency>,
}

impl<'a> Resolved<'a> {
    fn new(ctx: &'a ScanContext) -> Self {
        Self {
            ctx,
            deps: Vec::new(),
        }
    }

    fn check(&self, probe: impl FnOnce() -> CoreResult<bool>) -> CoreResult<Presence> {
        if !self.ctx.check_deps {
            return Ok(Presence::Unchecked);
        }
        Ok(if probe()? {
            Presence::Present
        } else {
            Presence::Missing
        })
    }

    fn push(&mut self, kind: DependencyKind, id: &str, presence: Presence) {
        let id = label_safe(id);
        if self.deps.iter().any(|d| d.kind == kind && d.id == id) {
            return;
        }
        if presence == Presence::Missing {
            log::warn!("{}: missing {} {}", self.ctx.item, kind, id);
        }
        self.deps.push(ResolvedDependency { kind, id, presence });
    }

    fn finish(self) -> Vec<ResolvedDependency> {
        self.deps
    }
}

/// Whether `dir` holds `stem.<ext>` for one of the scan's archive extensions
fn archive_exists(dir: &Path, stem: &str, ctx: &ScanContext) -> CoreResult<bool> {
    file_exists(dir, stem, Some(ctx.archive_extensions.as_slice()))
}

/// Whether `dir` holds a file named `stem.<ext>`.
///
/// With `extensions` the extension must be one of them (case-insensitive);
/// without, any extension or none at all is accepted.
fn file_exists(dir: &Path, stem: &str, extensions: Option<&[String]>) -> CoreResult<bool> {
    if !dir.is_dir() {
        return Ok(false);
    }
    if extensions.is_none() && dir.join(stem).is_file() {
        return Ok(true);
    }

    let dir_str = dir.to_str().ok_or_else(|| CoreError::GlobPattern {
        pattern: dir.display().to_string(),
        message: "path is not valid UTF-8".to_string(),
    })?;
    let pattern = format!("{}/{}.*", Pattern::escape(dir_str), Pattern::escape(stem));
    let paths = glob::glob(&pattern).map_err(|e| CoreError::GlobPattern {
        pattern: pattern.clone(),
        message: e.to_string(),
    })?;

    for entry in paths {
        match entry {
            Ok(path) if path.is_file() && accepts(&path, extensions) => return Ok(true),
            Ok(_) => {}
            Err(e) => log::debug!("Skipping unreadable path while probing {}: {}", pattern, e),
        }
    }
    Ok(false)
}

fn accepts(path: &Path, extensions: Option<&[String]>) -> bool {
    let Some(extensions) = extensions else {
        return true;
    };
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
