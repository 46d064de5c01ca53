//! Tag computation
//!
//! Turns a record and its resolved dependencies into an ordered,
//! deduplicated [`TagSet`]. Tags stay typed until they reach the label
//! storage boundary, where [`Tag`]'s `Display` gives the wire form.

use std::collections::BTreeSet;
use std::fmt;

use crate::record::{Classification, DriverStatus, MetadataRecord};
use crate::resolver::{DependencyKind, Presence, ResolvedDependency};

/// Labels with a fixed spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FixedTag {
    Imperfect,
    Preliminary,
    Bios,
    Device,
    Mechanical,
    Incomplete,
}

impl FixedTag {
    pub const ALL: [FixedTag; 6] = [
        FixedTag::Imperfect,
        FixedTag::Preliminary,
        FixedTag::Bios,
        FixedTag::Device,
        FixedTag::Mechanical,
        FixedTag::Incomplete,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FixedTag::Imperfect => "Imperfect",
            FixedTag::Preliminary => "Preliminary",
            FixedTag::Bios => "BIOS",
            FixedTag::Device => "Device",
            FixedTag::Mechanical => "Mechanical",
            FixedTag::Incomplete => "Incomplete",
        }
    }
}

/// One descriptive tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Fixed(FixedTag),
    Dependency {
        kind: DependencyKind,
        id: String,
        presence: Presence,
    },
}

impl Tag {
    pub fn dependency(dep: &ResolvedDependency) -> Self {
        Tag::Dependency {
            kind: dep.kind,
            id: dep.id.clone(),
            presence: dep.presence,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Fixed(tag) => f.write_str(tag.label()),
            Tag::Dependency { kind, id, presence } => {
                let prefix = match presence {
                    Presence::Present | Presence::Assumed => "+",
                    Presence::Missing => "-",
                    Presence::Unchecked => "",
                };
                write!(f, "{}{}:{}", prefix, kind, id)
            }
        }
    }
}

/// Insertion-ordered set of tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag unless it is already present
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Wire-form labels, in tag order
    pub fn labels(&self) -> Vec<String> {
        self.tags.iter().map(Tag::to_string).collect()
    }

    /// Wire-form labels as a set, for diffing against stored labels
    pub fn label_set(&self) -> BTreeSet<String> {
        self.tags.iter().map(Tag::to_string).collect()
    }
}

/// Compute the tag set of an item
///
/// Order: status, classification, dependencies in resolver order, then
/// `Incomplete` when any dependency is missing.
pub fn compute(record: &MetadataRecord, resolved: &[ResolvedDependency]) -> TagSet {
    let mut tags = TagSet::new();

    match record.status {
        DriverStatus::Imperfect => {
            tags.insert(Tag::Fixed(FixedTag::Imperfect));
        }
        DriverStatus::Preliminary => {
            tags.insert(Tag::Fixed(FixedTag::Preliminary));
        }
        DriverStatus::Good | DriverStatus::Unknown => {}
    }

    for (class, tag) in [
        (Classification::Bios, FixedTag::Bios),
        (Classification::Device, FixedTag::Device),
        (Classification::Mechanical, FixedTag::Mechanical),
    ] {
        if record.is(class) {
            tags.insert(Tag::Fixed(tag));
        }
    }

    for dep in resolved {
        tags.insert(Tag::dependency(dep));
    }

    if resolved.iter().any(ResolvedDependency::is_missing) {
        tags.insert(Tag::Fixed(FixedTag::Incomplete));
    }

    tags
}

/// Labels this tool may add to or remove from a file holding `resolved`
///
/// Fixed labels plus every prefix variant of every dependency label.
pub fn managed_vocabulary(resolved: &[ResolvedDependency]) -> BTreeSet<String> {
    let mut vocabulary: BTreeSet<String> = FixedTag::ALL
        .iter()
        .map(|t| t.label().to_string())
        .collect();

    for dep in resolved {
        for presence in [Presence::Present, Presence::Missing, Presence::Unchecked] {
            let tag = Tag::Dependency {
                kind: dep.kind,
                id: dep.id.clone(),
                presence,
            };
            vocabulary.insert(tag.to_string());
        }
    }
    vocabulary
}

#[cfg(test)]
#[path = "tags_test.rs"]
mod tests;
