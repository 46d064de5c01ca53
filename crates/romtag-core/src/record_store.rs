//! One record per catalog item, on top of a [`KeyValueStore`]

use crate::error::CoreResult;
use crate::item_id::ItemId;
use crate::record::MetadataRecord;
use crate::store::KeyValueStore;

/// Persisted per-item metadata records
///
/// Records are parsed once here, at the store boundary. A record that exists
/// is never rewritten; rebuilding requires removing the whole store.
pub struct RecordStore {
    store: Box<dyn KeyValueStore>,
}

impl RecordStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the record for `item`, if one was built
    pub fn get(&self, item: &ItemId) -> CoreResult<Option<MetadataRecord>> {
        Ok(self
            .store
            .get(item.as_str())?
            .map(|text| MetadataRecord::parse(&text)))
    }

    /// Persist a record. Returns `false` if one already existed.
    pub fn insert(&self, item: &ItemId, record: &MetadataRecord) -> CoreResult<bool> {
        if self.store.contains(item.as_str())? {
            log::debug!("Record for {} already present, not rewriting", item);
            return Ok(false);
        }
        self.store.put(item.as_str(), &record.to_lines())?;
        Ok(true)
    }
}
