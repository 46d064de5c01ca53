//! In-memory label store, for dry runs over fixtures and for tests

use crate::error::LabelResult;
use crate::traits::{join_batch, LabelStore};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Labels kept in a map, with a count of mutating calls
#[derive(Debug, Default)]
pub struct MemoryLabels {
    files: Mutex<BTreeMap<PathBuf, BTreeSet<String>>>,
    mutations: AtomicUsize,
}

impl MemoryLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the labels of a file
    pub fn set(&self, file: &Path, labels: impl IntoIterator<Item = impl Into<String>>) {
        self.lock()
            .insert(file.to_path_buf(), labels.into_iter().map(Into::into).collect());
    }

    /// Current labels of a file, without going through the trait
    pub fn labels(&self, file: &Path) -> BTreeSet<String> {
        self.lock().get(file).cloned().unwrap_or_default()
    }

    /// Number of add/remove calls that changed something
    pub fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, BTreeSet<String>>> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl LabelStore for MemoryLabels {
    async fn get_labels(&self, file: &Path) -> LabelResult<BTreeSet<String>> {
        Ok(self.labels(file))
    }

    async fn remove_labels(&self, file: &Path, labels: &BTreeSet<String>) -> LabelResult<()> {
        if labels.is_empty() {
            return Ok(());
        }
        join_batch(labels)?;
        let mut files = self.lock();
        let current = files.entry(file.to_path_buf()).or_default();
        current.retain(|l| !labels.contains(l));
        self.mutations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn add_labels(&self, file: &Path, labels: &BTreeSet<String>) -> LabelResult<()> {
        if labels.is_empty() {
            return Ok(());
        }
        join_batch(labels)?;
        let mut files = self.lock();
        files
            .entry(file.to_path_buf())
            .or_default()
            .extend(labels.iter().cloned());
        self.mutations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
