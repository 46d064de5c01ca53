//! Label storage trait definition

use crate::error::{LabelError, LabelResult};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::Path;

/// Access to the labels attached to files
///
/// Mutations take a batch; implementations send it comma-joined, so no
/// label may contain a comma.
#[async_trait]
pub trait LabelStore: Send + Sync {
    /// Current labels of `file`
    async fn get_labels(&self, file: &Path) -> LabelResult<BTreeSet<String>>;

    /// Remove `labels` from `file`
    async fn remove_labels(&self, file: &Path, labels: &BTreeSet<String>) -> LabelResult<()>;

    /// Add `labels` to `file`
    async fn add_labels(&self, file: &Path, labels: &BTreeSet<String>) -> LabelResult<()>;

    /// Backend identifier for logging
    fn backend(&self) -> &'static str;
}

/// Join a batch for a mutating call, rejecting labels that would split
pub fn join_batch(labels: &BTreeSet<String>) -> LabelResult<String> {
    if let Some(bad) = labels.iter().find(|l| l.contains(',')) {
        return Err(LabelError::InvalidLabel { label: bad.clone() });
    }
    Ok(labels.iter().cloned().collect::<Vec<_>>().join(","))
}

/// Split a comma-joined label listing
pub fn split_batch(text: &str) -> BTreeSet<String> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
