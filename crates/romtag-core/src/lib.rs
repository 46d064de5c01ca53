//! romtag-core - Core library for romtag
//!
//! This crate provides the typed metadata record and its line format, the
//! key/value stores backing the query cache and record store, dependency
//! resolution against a scan directory, and tag computation.

pub mod checksum;
pub mod config;
pub mod error;
pub mod item_id;
pub mod layout;
pub mod record;
pub mod record_store;
pub mod resolver;
pub mod store;
pub mod tags;

pub use checksum::cache_key;
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use item_id::ItemId;
pub use layout::CacheLayout;
pub use record::{Classification, DriverStatus, MetadataRecord};
pub use record_store::RecordStore;
pub use resolver::{
    label_safe, resolve, DependencyKind, Presence, ResolvedDependency, ScanContext,
};
pub use store::{DirStore, KeyValueStore, MemoryStore};
pub use tags::{compute, managed_vocabulary, FixedTag, Tag, TagSet};
