//! Strongly-typed catalog item identifier.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use crate::error::{CoreError, CoreResult};

/// Identifier of one catalog entry (a machine short name such as `pacman`).
///
/// Identifiers double as file names in the record store and as archive stems
/// in the scan directory, so they are non-empty, carry no path separators and
/// never name a hidden file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create a new `ItemId`, validating it.
    pub fn new(name: impl Into<String>) -> CoreResult<Self> {
        let s = name.into();
        let reason = if s.is_empty() {
            Some("must not be empty")
        } else if s.contains(['/', '\\', '\0']) {
            Some("must not contain path separators")
        } else if s.starts_with('.') {
            Some("must not start with a dot")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(CoreError::InvalidItemId {
                value: s,
                reason: reason.to_string(),
            }),
            None => Ok(Self(s)),
        }
    }

    /// Try to create a new `ItemId`, returning `None` if it is invalid.
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        Self::new(name).ok()
    }

    /// Return the underlying identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ItemId::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ItemId {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ItemId {
    type Error = CoreError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_item_id() {
        let id = ItemId::new("pacman").unwrap();
        assert_eq!(id, "pacman");
        assert_eq!(id.to_string(), "pacman");
    }

    #[test]
    fn test_rejects_empty_and_paths() {
        assert!(ItemId::try_new("").is_none());
        assert!(ItemId::try_new("../etc").is_none());
        assert!(ItemId::try_new("a\\b").is_none());
        assert!(ItemId::try_new("..").is_none());
    }

    #[test]
    fn test_temp_like_names_are_valid_but_hidden_names_are_not() {
        assert!(ItemId::try_new("notes.tmp").is_some());
        assert!(ItemId::try_new(".staging").is_none());
        assert!(ItemId::try_new(".DS_Store").is_none());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: ItemId = serde_json::from_str("\"neogeo\"").unwrap();
        assert_eq!(ok, "neogeo");
        assert!(serde_json::from_str::<ItemId>("\"\"").is_err());
    }
}
