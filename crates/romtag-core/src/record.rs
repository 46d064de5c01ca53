//! Per-item metadata record and its `key:value` line format.
//!
//! A record is written once per catalog item and parsed once when it is read
//! back from the record store. Singleton keys are last-one-wins; repeatable
//! keys (`class`, `device`, `romof`, `disk`) accumulate.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::item_id::ItemId;

/// Driver status / emulation quality as reported by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    Good,
    Imperfect,
    Preliminary,
    #[default]
    Unknown,
}

impl DriverStatus {
    /// Parse a catalog status value; anything unrecognised is `Unknown`
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "good" => DriverStatus::Good,
            "imperfect" => DriverStatus::Imperfect,
            "preliminary" => DriverStatus::Preliminary,
            _ => DriverStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Good => "good",
            DriverStatus::Imperfect => "imperfect",
            DriverStatus::Preliminary => "preliminary",
            DriverStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent classification flags of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Bios,
    Device,
    Mechanical,
    /// Input descriptor declares coin slots. Tracked but never emitted as a tag.
    #[serde(rename = "coin")]
    CoinOperated,
}

impl Classification {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "bios" => Some(Classification::Bios),
            "device" => Some(Classification::Device),
            "mechanical" => Some(Classification::Mechanical),
            "coin" => Some(Classification::CoinOperated),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Bios => "bios",
            Classification::Device => "device",
            Classification::Mechanical => "mechanical",
            Classification::CoinOperated => "coin",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat metadata for one catalog item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    /// Driver status
    pub status: DriverStatus,

    /// Emulation quality
    pub emulation: DriverStatus,

    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub classification: BTreeSet<Classification>,

    /// Dumped device references only
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub device_refs: BTreeSet<ItemId>,

    /// Dumped `romof` links in traversal order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bios_chain: Vec<ItemId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ItemId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_parent: Option<ItemId>,

    /// Disk image names that carry a content hash
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub disks: BTreeSet<String>,
}

const KEY_DESCRIPTION: &str = "description";
const KEY_MANUFACTURER: &str = "manufacturer";
const KEY_YEAR: &str = "year";
const KEY_STATUS: &str = "status";
const KEY_EMULATION: &str = "emulation";
const KEY_CLASS: &str = "class";
const KEY_DEVICE: &str = "device";
const KEY_ROMOF: &str = "romof";
const KEY_CLONEOF: &str = "cloneof";
const KEY_SAMPLEOF: &str = "sampleof";
const KEY_DISK: &str = "disk";

impl MetadataRecord {
    /// Whether the item carries a classification flag
    pub fn is(&self, class: Classification) -> bool {
        self.classification.contains(&class)
    }

    /// Serialize to newline-delimited `key:value` lines.
    ///
    /// Empty values are omitted, as is an `unknown` status.
    pub fn to_lines(&self) -> String {
        let mut out = String::new();
        let mut push = |key: &str, value: &str| {
            let value = value.trim();
            if value.is_empty() {
                return;
            }
            out.push_str(key);
            out.push(':');
            out.push_str(value);
            out.push('\n');
        };

        for (key, value) in [
            (KEY_DESCRIPTION, &self.description),
            (KEY_MANUFACTURER, &self.manufacturer),
            (KEY_YEAR, &self.year),
        ] {
            if let Some(v) = value {
                push(key, &single_line(v));
            }
        }
        if self.status != DriverStatus::Unknown {
            push(KEY_STATUS, self.status.as_str());
        }
        if self.emulation != DriverStatus::Unknown {
            push(KEY_EMULATION, self.emulation.as_str());
        }
        for class in &self.classification {
            push(KEY_CLASS, class.as_str());
        }
        for device in &self.device_refs {
            push(KEY_DEVICE, device.as_str());
        }
        for link in &self.bios_chain {
            push(KEY_ROMOF, link.as_str());
        }
        if let Some(parent) = &self.parent {
            push(KEY_CLONEOF, parent.as_str());
        }
        if let Some(sample) = &self.sample_parent {
            push(KEY_SAMPLEOF, sample.as_str());
        }
        for disk in &self.disks {
            push(KEY_DISK, &single_line(disk));
        }
        out
    }

    /// Parse newline-delimited `key:value` lines.
    ///
    /// Unknown keys and malformed lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut record = MetadataRecord::default();

        for line in text.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.trim() {
                KEY_DESCRIPTION => record.description = Some(value.to_string()),
                KEY_MANUFACTURER => record.manufacturer = Some(value.to_string()),
                KEY_YEAR => record.year = Some(value.to_string()),
                KEY_STATUS => record.status = DriverStatus::parse(value),
                KEY_EMULATION => record.emulation = DriverStatus::parse(value),
                KEY_CLASS => match Classification::parse(value) {
                    Some(class) => {
                        record.classification.insert(class);
                    }
                    None => log::debug!("Ignoring unknown classification '{}'", value),
                },
                KEY_DEVICE => {
                    if let Some(id) = parse_id(key, value) {
                        record.device_refs.insert(id);
                    }
                }
                KEY_ROMOF => {
                    if let Some(id) = parse_id(key, value) {
                        if !record.bios_chain.contains(&id) {
                            record.bios_chain.push(id);
                        }
                    }
                }
                KEY_CLONEOF => record.parent = parse_id(key, value),
                KEY_SAMPLEOF => record.sample_parent = parse_id(key, value),
                KEY_DISK => {
                    record.disks.insert(value.to_string());
                }
                other => log::debug!("Ignoring unknown record key '{}'", other),
            }
        }

        record
    }
}

fn parse_id(key: &str, value: &str) -> Option<ItemId> {
    match ItemId::new(value) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("Skipping record line '{}:{}': {}", key, value, e);
            None
        }
    }
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
