//! Catalog trait definition

use crate::error::CatalogResult;
use async_trait::async_trait;
use romtag_core::ItemId;

/// Placeholder replaced by the quoted subject identifier in a query path
pub const ITEM_PLACEHOLDER: &str = "{item}";

/// A structured query against the catalog
///
/// `select` picks nodes (with `{item}` standing for the subject) and `value`
/// is evaluated once per selected node; results are newline-separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogQuery {
    /// Short name used in logs and by test fakes
    pub name: &'static str,
    pub select: &'static str,
    pub value: &'static str,
}

impl CatalogQuery {
    /// Stable text identifying the query, used as part of the cache key
    pub fn cache_text(&self) -> String {
        format!("{}|{}", self.select, self.value)
    }
}

/// Result of a catalog query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The query selected something; raw textual result
    Found(String),
    /// Nothing matched: the subject is unknown or lacks the queried data
    NotRecognized,
}

/// Structured-query access to the catalog
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Evaluate `query` for `subject`
    async fn query(&self, query: &CatalogQuery, subject: &ItemId) -> CatalogResult<QueryOutcome>;

    /// Every item identifier in the catalog, sorted
    async fn items(&self) -> CatalogResult<Vec<ItemId>>;

    /// Catalog build identifier; selects the cache directory
    async fn version(&self) -> CatalogResult<String>;
}
