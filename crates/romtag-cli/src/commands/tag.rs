//! Tag command implementation
//!
//! For every archive in the scan directory: load (or build) its record,
//! resolve dependencies, compute tags and reconcile them with the file's
//! labels. One file at a time, in item-name order.

use anyhow::{Context, Result};
use romtag_catalog::{CatalogResult, RecordBuilder};
use romtag_core::{
    compute, managed_vocabulary, resolve, Config, ItemId, MetadataRecord, RecordStore,
    ScanContext,
};
use romtag_labels::{LabelStore, MemoryLabels, ReconcileOutcome, TagReconciler, TagTool};
use std::path::Path;
use std::sync::Arc;

use crate::cli::{GlobalArgs, TagArgs};
use crate::commands::common::{item_for, scan_archives, ExitCode};
use crate::context::RuntimeContext;

#[derive(Debug, Default)]
struct TagSummary {
    changed: usize,
    unchanged: usize,
    skipped: usize,
    failed: usize,
}

/// Execute the tag command
pub async fn execute(args: &TagArgs, global: &GlobalArgs, config: Config) -> Result<()> {
    let ctx = RuntimeContext::new(global, config).await?;
    let archives = scan_archives(&args.scan_dir, &ctx.config)?;

    let labels = label_store(&ctx.config.tag_program, args.dry_run).await?;
    let reconciler = TagReconciler::new(labels, args.dry_run);
    let builder = ctx.builder()?;
    let records = ctx.records()?;

    if !args.check_deps {
        ctx.verbose("Dependency checking is off; dependencies are labelled without a prefix");
    }
    if args.dry_run {
        println!("Dry run - labels will not be changed");
    }

    let mut summary = TagSummary::default();

    for file in &archives {
        let Some(item) = item_for(file) else {
            log::warn!("{}: file name is not a valid item name, skipping", file.display());
            summary.skipped += 1;
            continue;
        };

        let record = match load_record(&item, builder.as_ref(), &records).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                summary.skipped += 1;
                continue;
            }
            Err(e) if !e.is_fatal_for_run() => {
                eprintln!("  ✗ {}: {}", item, e);
                summary.failed += 1;
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Cannot load record for '{}'", item));
            }
        };

        let scan = ScanContext {
            item: item.clone(),
            scan_dir: args.scan_dir.clone(),
            check_deps: args.check_deps,
            sample_dir: args.samples.clone(),
            archive_extensions: ctx.config.archive_extensions.clone(),
        };
        let resolved = resolve(&record, &scan)?;
        let tags = compute(&record, &resolved);
        let vocabulary = managed_vocabulary(&resolved);

        let outcome = reconciler
            .reconcile(file, &tags, &vocabulary, args.reset)
            .await
            .with_context(|| format!("Failed to update labels on {}", file.display()))?;

        report(file, &outcome, ctx.verbose);
        match outcome {
            ReconcileOutcome::Unchanged => summary.unchanged += 1,
            ReconcileOutcome::Applied { .. } => summary.changed += 1,
        }
    }

    println!();
    println!(
        "{} {} file(s), {} unchanged, {} skipped, {} failed",
        if args.dry_run { "Would update" } else { "Updated" },
        summary.changed,
        summary.unchanged,
        summary.skipped,
        summary.failed
    );

    if summary.failed > 0 {
        return Err(ExitCode(1).into());
    }
    Ok(())
}

/// The `tag` tool, or an empty in-memory store for a dry run without it
async fn label_store(program: &str, dry_run: bool) -> Result<Arc<dyn LabelStore>> {
    let tool = TagTool::new(program);
    let store: Arc<dyn LabelStore> = match tool.probe().await {
        Ok(()) => Arc::new(tool),
        Err(e) if dry_run => {
            log::warn!("{}; dry run continues as if files had no labels", e);
            Arc::new(MemoryLabels::new())
        }
        Err(e) => return Err(e).context("Label tool is required unless --dry-run is given"),
    };
    log::debug!("Label backend: {}", store.backend());
    Ok(store)
}

/// Stored record of `item`, built on demand when a catalog is available.
///
/// `Ok(None)` means the item is skipped; the reason has been logged.
async fn load_record(
    item: &ItemId,
    builder: Option<&RecordBuilder>,
    records: &RecordStore,
) -> CatalogResult<Option<MetadataRecord>> {
    let Some(builder) = builder else {
        let record = records.get(item)?;
        if record.is_none() {
            log::warn!("{}: no stored record and no catalog configured, skipping", item);
        }
        return Ok(record);
    };

    Ok(builder.ensure(item).await?.into_record())
}

fn report(file: &Path, outcome: &ReconcileOutcome, verbose: bool) {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.display().to_string());

    match outcome {
        ReconcileOutcome::Unchanged => {
            if verbose {
                println!("  = {}", name);
            }
        }
        ReconcileOutcome::Applied {
            added,
            removed,
            labels,
            ..
        } => {
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            println!("  ✓ {}: {}", name, labels.join(", "));
            if verbose {
                for label in removed {
                    println!("      - {}", label);
                }
                for label in added {
                    println!("      + {}", label);
                }
            }
        }
    }
}
