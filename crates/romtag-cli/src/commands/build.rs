//! Build command implementation
//!
//! Builds the metadata record of every catalog item (or the listed ones)
//! that does not have one yet. A failed query fails only its item.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use romtag_catalog::BuildOutcome;
use romtag_core::Config;

use crate::cli::{BuildArgs, GlobalArgs};
use crate::commands::common::{parse_items, ExitCode};
use crate::context::RuntimeContext;

/// Execute the build command
pub async fn execute(args: &BuildArgs, global: &GlobalArgs, config: Config) -> Result<()> {
    let ctx = RuntimeContext::new(global, config).await?;
    let (Some(catalog), Some(builder)) = (ctx.catalog.clone(), ctx.builder()?) else {
        anyhow::bail!("build needs a catalog; set `catalog` in romtag.yml or pass --catalog");
    };

    let items = match &args.items {
        Some(list) => parse_items(list)?,
        None => catalog
            .items()
            .await
            .context("Failed to list catalog items")?,
    };
    ctx.verbose(&format!(
        "Building {} item(s) into {}",
        items.len(),
        ctx.layout.records_dir().display()
    ));

    let pb = ProgressBar::new(items.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut built = 0usize;
    let mut existing = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for item in &items {
        pb.set_message(item.to_string());
        match builder.ensure(item).await {
            Ok(BuildOutcome::Built(_)) => built += 1,
            Ok(BuildOutcome::Existing(_)) => existing += 1,
            Ok(BuildOutcome::Skipped) => skipped += 1,
            Err(e) if !e.is_fatal_for_run() => {
                pb.println(format!("  ✗ {}: {}", item, e));
                failed += 1;
            }
            Err(e) => {
                pb.abandon();
                return Err(e).with_context(|| format!("Build aborted at '{}'", item));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let stats = builder.cache().stats();
    println!(
        "Built {} record(s), {} already present, {} skipped, {} failed",
        built, existing, skipped, failed
    );
    ctx.verbose(&format!(
        "Query cache: {} hit(s), {} miss(es)",
        stats.hits, stats.misses
    ));
    log::info!(
        "build: {} built, {} existing, {} skipped, {} failed",
        built,
        existing,
        skipped,
        failed
    );

    if failed > 0 {
        return Err(ExitCode(1).into());
    }
    Ok(())
}
