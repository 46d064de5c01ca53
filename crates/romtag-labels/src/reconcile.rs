//! Apply a computed tag set to a file with the smallest mutation

use crate::error::LabelResult;
use crate::traits::LabelStore;
use romtag_core::TagSet;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

/// Result of reconciling one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Managed labels already match; nothing was sent to the store
    Unchanged,

    /// Labels were (or in a dry run, would have been) changed
    Applied {
        added: BTreeSet<String>,
        removed: BTreeSet<String>,
        /// Full label set after the mutation
        labels: BTreeSet<String>,
        dry_run: bool,
    },
}

impl ReconcileOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, ReconcileOutcome::Applied { .. })
    }
}

/// Diffs computed tags against a file's labels and applies the difference
pub struct TagReconciler {
    store: Arc<dyn LabelStore>,
    dry_run: bool,
}

impl TagReconciler {
    pub fn new(store: Arc<dyn LabelStore>, dry_run: bool) -> Self {
        Self { store, dry_run }
    }

    /// Bring the managed labels of `file` in line with `computed`.
    ///
    /// Only labels in `vocabulary` are candidates for removal, unless
    /// `reset_all` is set, in which case every existing label is.
    /// Removals go out before additions.
    pub async fn reconcile(
        &self,
        file: &Path,
        computed: &TagSet,
        vocabulary: &BTreeSet<String>,
        reset_all: bool,
    ) -> LabelResult<ReconcileOutcome> {
        let current = self.store.get_labels(file).await?;
        let computed = computed.label_set();

        let candidates: BTreeSet<String> = if reset_all {
            current.clone()
        } else {
            current.intersection(vocabulary).cloned().collect()
        };

        if candidates == computed {
            log::debug!("{}: labels up to date", file.display());
            return Ok(ReconcileOutcome::Unchanged);
        }

        let removed: BTreeSet<String> = candidates.difference(&computed).cloned().collect();
        let added: BTreeSet<String> = computed.difference(&current).cloned().collect();

        let mut labels = current;
        labels.retain(|l| !removed.contains(l));
        labels.extend(added.iter().cloned());

        if !self.dry_run {
            self.store.remove_labels(file, &removed).await?;
            self.store.add_labels(file, &added).await?;
        }

        log::info!(
            "{}{}: {}",
            if self.dry_run { "[dry-run] " } else { "" },
            file.display(),
            labels.iter().cloned().collect::<Vec<_>>().join(",")
        );

        Ok(ReconcileOutcome::Applied {
            added,
            removed,
            labels,
            dry_run: self.dry_run,
        })
    }
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
