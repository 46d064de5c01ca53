//! romtag-catalog - Catalog access for romtag
//!
//! This crate provides the `Catalog` trait with an xmlstarlet-backed
//! implementation, the memoizing `QueryCache`, and the `RecordBuilder` that
//! turns catalog queries into persisted metadata records.

pub mod builder;
pub mod cache;
pub mod error;
pub mod queries;
pub(crate) mod sanitize;
pub mod traits;
pub mod xmlstarlet;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use builder::{BuildOutcome, RecordBuilder};
pub use cache::{CacheStats, QueryCache};
pub use error::{CatalogError, CatalogResult};
pub use traits::{Catalog, CatalogQuery, QueryOutcome};
pub use xmlstarlet::XmlStarletCatalog;
