//! Catalog backend that evaluates queries with `xmlstarlet sel`
//!
//! `xmlstarlet sel` exits 0 when the template produced output and 1 when
//! nothing matched; anything else is treated as a failure.

use crate::error::{CatalogError, CatalogResult};
use crate::traits::{Catalog, CatalogQuery, QueryOutcome, ITEM_PLACEHOLDER};
use async_trait::async_trait;
use romtag_core::ItemId;
use std::path::{Path, PathBuf};
use tokio::process::Command;

const ITEMS_SELECT: &str = "/mame/machine";
const VERSION_SELECT: &str = "/mame";

/// xmlstarlet-backed catalog over a `-listxml` file
pub struct XmlStarletCatalog {
    program: String,
    catalog: PathBuf,
}

impl XmlStarletCatalog {
    /// Create a backend for `catalog`, which must exist
    pub fn new(program: impl Into<String>, catalog: &Path) -> CatalogResult<Self> {
        if !catalog.is_file() {
            return Err(CatalogError::CatalogNotFound {
                path: catalog.display().to_string(),
            });
        }
        Ok(Self {
            program: program.into(),
            catalog: catalog.to_path_buf(),
        })
    }

    /// Arguments for one `sel` invocation
    fn select_args(&self, select: &str, value: &str) -> Vec<String> {
        vec![
            "sel".to_string(),
            "-T".to_string(),
            "-t".to_string(),
            "-m".to_string(),
            select.to_string(),
            "-v".to_string(),
            value.to_string(),
            "-n".to_string(),
            self.catalog.display().to_string(),
        ]
    }

    async fn run(&self, label: &str, subject: &str, args: Vec<String>) -> CatalogResult<QueryOutcome> {
        log::debug!("{} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| CatalogError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        match output.status.code() {
            Some(0) => {
                let text = String::from_utf8(output.stdout).map_err(|_| {
                    CatalogError::InvalidOutput {
                        query: label.to_string(),
                        subject: subject.to_string(),
                    }
                })?;
                Ok(QueryOutcome::Found(text.trim_end_matches('\n').to_string()))
            }
            Some(1) if output.stdout.is_empty() => Ok(QueryOutcome::NotRecognized),
            _ => Err(CatalogError::QueryFailed {
                query: label.to_string(),
                subject: subject.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }
}

#[async_trait]
impl Catalog for XmlStarletCatalog {
    async fn query(&self, query: &CatalogQuery, subject: &ItemId) -> CatalogResult<QueryOutcome> {
        let select = render_select(query, subject);
        let args = self.select_args(&select, query.value);
        self.run(query.name, subject.as_str(), args).await
    }

    async fn items(&self) -> CatalogResult<Vec<ItemId>> {
        let args = self.select_args(ITEMS_SELECT, "@name");
        let text = match self.run("items", "*", args).await? {
            QueryOutcome::Found(text) => text,
            QueryOutcome::NotRecognized => return Ok(Vec::new()),
        };

        let mut items: Vec<ItemId> = text
            .lines()
            .filter_map(|line| {
                let id = ItemId::try_new(line.trim());
                if id.is_none() && !line.trim().is_empty() {
                    log::warn!("Ignoring catalog entry with unusable name '{}'", line);
                }
                id
            })
            .collect();
        items.sort();
        items.dedup();
        Ok(items)
    }

    async fn version(&self) -> CatalogResult<String> {
        let args = self.select_args(VERSION_SELECT, "@build");
        match self.run("version", "*", args).await? {
            QueryOutcome::Found(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            _ => Ok("unversioned".to_string()),
        }
    }
}

/// Substitute the quoted subject into a query's select path
pub(crate) fn render_select(query: &CatalogQuery, subject: &ItemId) -> String {
    query
        .select
        .replace(ITEM_PLACEHOLDER, &xpath_literal(subject.as_str()))
}

/// Quote a string as an XPath 1.0 literal
///
/// XPath has no escape character, so a value holding both quote kinds is
/// built with `concat()`.
pub(crate) fn xpath_literal(s: &str) -> String {
    if !s.contains('\'') {
        format!("'{}'", s)
    } else if !s.contains('"') {
        format!("\"{}\"", s)
    } else {
        let parts: Vec<String> = s.split('\'').map(|p| format!("'{}'", p)).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

#[cfg(test)]
#[path = "xmlstarlet_test.rs"]
mod tests;
