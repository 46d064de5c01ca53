//! Show command implementation

use anyhow::{Context, Result};
use romtag_core::{Config, ItemId};

use crate::cli::{GlobalArgs, OutputFormat, ShowArgs};
use crate::commands::common::ExitCode;
use crate::context::RuntimeContext;

/// Execute the show command
pub async fn execute(args: &ShowArgs, global: &GlobalArgs, config: Config) -> Result<()> {
    let ctx = RuntimeContext::new(global, config).await?;
    let item = ItemId::new(args.item.as_str())?;

    let Some(record) = ctx.records()?.get(&item)? else {
        eprintln!(
            "No stored record for '{}' (catalog version {}); run `romtag build --items {}`",
            item,
            ctx.layout.version(),
            item
        );
        return Err(ExitCode(1).into());
    };

    match args.output {
        OutputFormat::Text => print!("{}", record.to_lines()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&record)
                .context("Failed to serialize record to JSON")?;
            println!("{}", json);
        }
    }
    Ok(())
}
