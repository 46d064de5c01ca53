//! Builds one metadata record per catalog item
//!
//! All catalog access goes through the [`QueryCache`]. The record is
//! assembled in memory and only handed to the [`RecordStore`] once every
//! query succeeded, so a failed build leaves nothing behind.

use crate::cache::QueryCache;
use crate::error::CatalogResult;
use crate::queries;
use crate::sanitize::sanitize_text;
use crate::traits::{CatalogQuery, QueryOutcome};
use romtag_core::{Classification, DriverStatus, ItemId, MetadataRecord, RecordStore};
use std::collections::BTreeSet;

/// Upper bound on `romof` hops; real chains are two or three links long
const MAX_CHAIN_DEPTH: usize = 16;

/// Result of [`RecordBuilder::build`] / [`RecordBuilder::ensure`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// A new record was built and stored
    Built(MetadataRecord),
    /// A record already existed and was loaded
    Existing(MetadataRecord),
    /// The item is not dumped or unknown to the catalog; nothing stored
    Skipped,
}

impl BuildOutcome {
    pub fn record(&self) -> Option<&MetadataRecord> {
        match self {
            BuildOutcome::Built(r) | BuildOutcome::Existing(r) => Some(r),
            BuildOutcome::Skipped => None,
        }
    }

    pub fn into_record(self) -> Option<MetadataRecord> {
        match self {
            BuildOutcome::Built(r) | BuildOutcome::Existing(r) => Some(r),
            BuildOutcome::Skipped => None,
        }
    }
}

/// Turns catalog queries into persisted [`MetadataRecord`]s
pub struct RecordBuilder {
    cache: QueryCache,
    records: RecordStore,
}

impl RecordBuilder {
    pub fn new(cache: QueryCache, records: RecordStore) -> Self {
        Self { cache, records }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    /// Load the stored record for `item`, building it first if needed
    pub async fn ensure(&self, item: &ItemId) -> CatalogResult<BuildOutcome> {
        if let Some(record) = self.records.get(item)? {
            return Ok(BuildOutcome::Existing(record));
        }
        self.build(item).await
    }

    /// Build and store the record for `item`
    pub async fn build(&self, item: &ItemId) -> CatalogResult<BuildOutcome> {
        if !self.is_dumped(item).await? {
            log::warn!("{}: not dumped or not in catalog, skipping", item);
            return Ok(BuildOutcome::Skipped);
        }

        let record = match self.collect(item).await {
            Ok(record) => record,
            Err(e) => {
                log::error!("{}: record build failed, nothing written: {}", item, e);
                return Err(e);
            }
        };

        if self.records.insert(item, &record)? {
            log::info!("{}: record built", item);
        }
        Ok(BuildOutcome::Built(record))
    }

    async fn collect(&self, item: &ItemId) -> CatalogResult<MetadataRecord> {
        let mut record = MetadataRecord {
            description: self.text(&queries::DESCRIPTION, item).await?,
            manufacturer: self.text(&queries::MANUFACTURER, item).await?,
            year: self.text(&queries::YEAR, item).await?,
            ..Default::default()
        };

        record.status = self
            .value(&queries::DRIVER_STATUS, item)
            .await?
            .map(|s| DriverStatus::parse(&s))
            .unwrap_or_default();
        record.emulation = self
            .value(&queries::EMULATION, item)
            .await?
            .map(|s| DriverStatus::parse(&s))
            .unwrap_or_default();

        for (query, class) in [
            (&queries::IS_BIOS, Classification::Bios),
            (&queries::IS_DEVICE, Classification::Device),
            (&queries::IS_MECHANICAL, Classification::Mechanical),
        ] {
            if self.value(query, item).await?.is_some() {
                record.classification.insert(class);
            }
        }
        let coin_operated = self
            .list(&queries::COIN_SLOTS, item)
            .await?
            .iter()
            .any(|c| c.parse::<u32>().is_ok_and(|n| n > 0));
        if coin_operated {
            record.classification.insert(Classification::CoinOperated);
        }

        record.device_refs = self.dumped_devices(item).await?;
        record.bios_chain = self.bios_chain(item).await?;
        record.parent = self.single_id(&queries::CLONEOF, item).await?;
        record.sample_parent = self.single_id(&queries::SAMPLEOF, item).await?;
        record.disks = self
            .list(&queries::DISKS, item)
            .await?
            .into_iter()
            .collect();

        Ok(record)
    }

    async fn is_dumped(&self, item: &ItemId) -> CatalogResult<bool> {
        Ok(matches!(
            self.cache.lookup(&queries::DUMPED, item).await?,
            QueryOutcome::Found(_)
        ))
    }

    /// Referenced devices that are themselves dumped
    async fn dumped_devices(&self, item: &ItemId) -> CatalogResult<BTreeSet<ItemId>> {
        let referenced: BTreeSet<ItemId> = self
            .list(&queries::DEVICE_REFS, item)
            .await?
            .into_iter()
            .filter_map(|name| to_id(item, &name))
            .collect();

        let mut devices = BTreeSet::new();
        for device in referenced {
            if self.is_dumped(&device).await? {
                devices.insert(device);
            } else {
                log::debug!("{}: device {} has no dumped ROMs, omitted", item, device);
            }
        }
        Ok(devices)
    }

    /// Follow `romof` links, keeping the dumped ones
    ///
    /// Undumped links are passed through, not recorded. The walk stops at a
    /// link without `romof`, a link the catalog does not know, or a cycle.
    async fn bios_chain(&self, item: &ItemId) -> CatalogResult<Vec<ItemId>> {
        let mut chain = Vec::new();
        let mut visited = BTreeSet::from([item.clone()]);
        let mut next = self.single_id(&queries::ROMOF, item).await?;

        while let Some(link) = next {
            if !visited.insert(link.clone()) {
                log::warn!("{}: romof cycle at {}", item, link);
                break;
            }
            if visited.len() > MAX_CHAIN_DEPTH {
                log::warn!("{}: romof chain longer than {} links, truncated", item, MAX_CHAIN_DEPTH);
                break;
            }

            if self.is_dumped(&link).await? {
                chain.push(link.clone());
            } else {
                log::debug!("{}: romof link {} is not dumped, skipped", item, link);
            }
            next = self.single_id(&queries::ROMOF, &link).await?;
        }
        Ok(chain)
    }

    /// Raw value, trimmed; `None` when nothing matched or it is blank
    async fn value(&self, query: &CatalogQuery, item: &ItemId) -> CatalogResult<Option<String>> {
        Ok(match self.cache.lookup(query, item).await? {
            QueryOutcome::Found(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
            _ => None,
        })
    }

    /// Free text with markup stripped and entities unescaped
    async fn text(&self, query: &CatalogQuery, item: &ItemId) -> CatalogResult<Option<String>> {
        Ok(self
            .value(query, item)
            .await?
            .and_then(|v| sanitize_text(&v)))
    }

    /// One value per line
    async fn list(&self, query: &CatalogQuery, item: &ItemId) -> CatalogResult<Vec<String>> {
        Ok(self
            .value(query, item)
            .await?
            .map(|v| {
                v.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn single_id(&self, query: &CatalogQuery, item: &ItemId) -> CatalogResult<Option<ItemId>> {
        Ok(self
            .value(query, item)
            .await?
            .and_then(|v| v.lines().next().and_then(|line| to_id(item, line.trim()))))
    }
}

fn to_id(item: &ItemId, name: &str) -> Option<ItemId> {
    match ItemId::new(name) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("{}: ignoring reference: {}", item, e);
            None
        }
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
