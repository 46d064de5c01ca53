//! Clean command implementation
//!
//! Removes the whole cache directory: every catalog version's query cache
//! and record store. Records are never rewritten otherwise.

use anyhow::{Context, Result};
use romtag_core::Config;
use std::fs;

use crate::cli::CleanArgs;

/// Execute the clean command
pub async fn execute(args: &CleanArgs, config: &Config) -> Result<()> {
    let cache_dir = &config.cache_dir;

    if !cache_dir.exists() {
        println!("Nothing to clean: {} not found", cache_dir.display());
        return Ok(());
    }

    if args.dry_run {
        println!("Dry run - would remove: {}", cache_dir.display());
        return Ok(());
    }

    fs::remove_dir_all(cache_dir)
        .with_context(|| format!("Failed to remove {}", cache_dir.display()))?;
    log::info!("clean: removed {}", cache_dir.display());
    println!("Removed: {}", cache_dir.display());
    Ok(())
}

#[cfg(test)]
#[path = "clean_test.rs"]
mod tests;
