//! In-memory catalog for tests
//!
//! Answers the queries in [`crate::queries`] the way the xmlstarlet backend
//! would: a query that selects nothing is `NotRecognized`.

use crate::error::{CatalogError, CatalogResult};
use crate::queries;
use crate::traits::{Catalog, CatalogQuery, QueryOutcome};
use async_trait::async_trait;
use romtag_core::ItemId;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One catalog entry
#[derive(Debug, Clone, Default)]
pub struct FakeMachine {
    pub name: String,
    pub dumped: bool,
    pub description: Option<String>,
    pub manufacturer: Option<String>,
    pub year: Option<String>,
    pub status: Option<String>,
    pub emulation: Option<String>,
    pub is_bios: bool,
    pub is_device: bool,
    pub is_mechanical: bool,
    pub coins: Option<u32>,
    pub device_refs: Vec<String>,
    pub romof: Option<String>,
    pub cloneof: Option<String>,
    pub sampleof: Option<String>,
    /// (disk name, has sha1)
    pub disks: Vec<(String, bool)>,
}

impl FakeMachine {
    /// A dumped machine with nothing else set
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            dumped: true,
            ..Default::default()
        }
    }

    pub fn undumped(mut self) -> Self {
        self.dumped = false;
        self
    }

    pub fn description(mut self, s: &str) -> Self {
        self.description = Some(s.to_string());
        self
    }

    pub fn manufacturer(mut self, s: &str) -> Self {
        self.manufacturer = Some(s.to_string());
        self
    }

    pub fn year(mut self, s: &str) -> Self {
        self.year = Some(s.to_string());
        self
    }

    pub fn status(mut self, s: &str) -> Self {
        self.status = Some(s.to_string());
        self
    }

    pub fn emulation(mut self, s: &str) -> Self {
        self.emulation = Some(s.to_string());
        self
    }

    pub fn bios(mut self) -> Self {
        self.is_bios = true;
        self
    }

    pub fn device(mut self) -> Self {
        self.is_device = true;
        self
    }

    pub fn mechanical(mut self) -> Self {
        self.is_mechanical = true;
        self
    }

    pub fn coins(mut self, n: u32) -> Self {
        self.coins = Some(n);
        self
    }

    pub fn device_ref(mut self, s: &str) -> Self {
        self.device_refs.push(s.to_string());
        self
    }

    pub fn romof(mut self, s: &str) -> Self {
        self.romof = Some(s.to_string());
        self
    }

    pub fn cloneof(mut self, s: &str) -> Self {
        self.cloneof = Some(s.to_string());
        self
    }

    pub fn sampleof(mut self, s: &str) -> Self {
        self.sampleof = Some(s.to_string());
        self
    }

    pub fn disk(mut self, s: &str) -> Self {
        self.disks.push((s.to_string(), true));
        self
    }

    pub fn nodump_disk(mut self, s: &str) -> Self {
        self.disks.push((s.to_string(), false));
        self
    }
}

/// Catalog backed by a map of [`FakeMachine`]s
#[derive(Debug, Default)]
pub struct FakeCatalog {
    machines: BTreeMap<String, FakeMachine>,
    version: String,
    calls: AtomicUsize,
    failing: Mutex<BTreeSet<&'static str>>,
}

impl FakeCatalog {
    pub fn new(machines: impl IntoIterator<Item = FakeMachine>) -> Self {
        Self {
            machines: machines
                .into_iter()
                .map(|m| (m.name.clone(), m))
                .collect(),
            version: "0.999 (test)".to_string(),
            calls: AtomicUsize::new(0),
            failing: Mutex::new(BTreeSet::new()),
        }
    }

    /// Make every query with this name fail
    pub fn fail_query(&self, name: &'static str) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name);
    }

    /// Number of `query` calls answered so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(machine: &FakeMachine, query: &CatalogQuery) -> Option<Option<String>> {
        let flag = |set: bool| set.then(|| machine.name.clone());
        let list = |items: Vec<String>| (!items.is_empty()).then(|| items.join("\n"));

        let value = match query.name {
            n if n == queries::DUMPED.name => flag(machine.dumped),
            n if n == queries::DESCRIPTION.name => machine.description.clone(),
            n if n == queries::MANUFACTURER.name => machine.manufacturer.clone(),
            n if n == queries::YEAR.name => machine.year.clone(),
            n if n == queries::DRIVER_STATUS.name => machine.status.clone(),
            n if n == queries::EMULATION.name => machine.emulation.clone(),
            n if n == queries::IS_BIOS.name => flag(machine.is_bios),
            n if n == queries::IS_DEVICE.name => flag(machine.is_device),
            n if n == queries::IS_MECHANICAL.name => flag(machine.is_mechanical),
            n if n == queries::COIN_SLOTS.name => machine.coins.map(|c| c.to_string()),
            n if n == queries::DEVICE_REFS.name => list(machine.device_refs.clone()),
            n if n == queries::ROMOF.name => machine.romof.clone(),
            n if n == queries::CLONEOF.name => machine.cloneof.clone(),
            n if n == queries::SAMPLEOF.name => machine.sampleof.clone(),
            n if n == queries::DISKS.name => list(
                machine
                    .disks
                    .iter()
                    .filter(|(_, sha1)| *sha1)
                    .map(|(name, _)| name.clone())
                    .collect(),
            ),
            _ => return None,
        };
        Some(value)
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn query(&self, query: &CatalogQuery, subject: &ItemId) -> CatalogResult<QueryOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let failing = self
            .failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(query.name);
        let failure = || CatalogError::QueryFailed {
            query: query.name.to_string(),
            subject: subject.to_string(),
            status: "exit status: 2".to_string(),
            stderr: "simulated failure".to_string(),
        };
        if failing {
            return Err(failure());
        }

        let Some(machine) = self.machines.get(subject.as_str()) else {
            return Ok(QueryOutcome::NotRecognized);
        };
        match Self::answer(machine, query) {
            Some(Some(value)) => Ok(QueryOutcome::Found(value)),
            Some(None) => Ok(QueryOutcome::NotRecognized),
            None => Err(failure()),
        }
    }

    async fn items(&self) -> CatalogResult<Vec<ItemId>> {
        Ok(self
            .machines
            .keys()
            .filter_map(|k| ItemId::try_new(k.as_str()))
            .collect())
    }

    async fn version(&self) -> CatalogResult<String> {
        Ok(self.version.clone())
    }
}
