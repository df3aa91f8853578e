// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A user-facing identifier for nodes, options and quests.
///
/// Ids are written alone on CFG header lines (`[id]`), and CFG lines are trimmed on import, so an
/// id must be non-empty, single-line and free of surrounding whitespace to survive a round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_id(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Wraps a value that is valid by construction (generated ids, built-in content).
    pub(crate) fn from_trusted(value: impl Into<String>) -> Self {
        let value = value.into();
        debug_assert!(validate_id(&value).is_ok(), "invalid built-in id {value:?}");
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("id must not be empty")]
    Empty,
    #[error("id must be a single line")]
    ContainsLineBreak,
    #[error("id must not start or end with whitespace")]
    SurroundingWhitespace,
}

fn validate_id(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains(['\n', '\r']) {
        return Err(IdError::ContainsLineBreak);
    }
    if value.trim() != value {
        return Err(IdError::SurroundingWhitespace);
    }
    Ok(())
}

/// Builds a time-based id (`<prefix>_<millis>`), suffixed with `_<n>` until `is_taken` is false.
pub(crate) fn timestamp_id<T>(prefix: &str, is_taken: impl Fn(&str) -> bool) -> Id<T> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let base = format!("{prefix}_{millis}");
    let mut candidate = base.clone();
    let mut suffix = 1u32;
    while is_taken(&candidate) {
        suffix = suffix.saturating_add(1);
        candidate = format!("{base}_{suffix}");
    }
    Id::from_trusted(candidate)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionIdTag {}
pub type OptionId = Id<OptionIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestIdTag {}
pub type QuestId = Id<QuestIdTag>;

#[cfg(test)]
mod tests {
    use super::{Id, IdError, NodeId};

    #[test]
    fn id_rejects_empty() {
        let result: Result<Id<()>, _> = Id::new("");
        assert_eq!(result, Err(IdError::Empty));
    }

    #[test]
    fn id_rejects_line_breaks() {
        let result: Result<Id<()>, _> = Id::new("a\nb");
        assert_eq!(result, Err(IdError::ContainsLineBreak));
    }

    #[test]
    fn id_rejects_whitespace_padding() {
        let result: Result<Id<()>, _> = Id::new(" shop");
        assert_eq!(result, Err(IdError::SurroundingWhitespace));

        let result: Result<Id<()>, _> = Id::new("   ");
        assert_eq!(result, Err(IdError::SurroundingWhitespace));
    }

    #[test]
    fn id_allows_brackets_and_colons() {
        let id = NodeId::new("shop:[night]").expect("node id");
        assert_eq!(id.as_str(), "shop:[night]");
    }

    #[test]
    fn timestamp_id_skips_taken_candidates() {
        let first: NodeId = super::timestamp_id("node", |_| false);
        assert!(first.as_str().starts_with("node_"));

        let taken = first.as_str().to_owned();
        let second: NodeId = super::timestamp_id("node", |candidate| {
            candidate.starts_with("node_") && !candidate.ends_with("_2")
        });
        assert!(second.as_str().ends_with("_2"));
        assert_ne!(second.as_str(), taken);
    }

    #[test]
    fn id_serializes_as_plain_string() {
        let id = NodeId::new("default").expect("node id");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"default\"");

        let back: NodeId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);

        let err = serde_json::from_str::<NodeId>("\"\"").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
