// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Conditions and commands attached to dialogue options (and reused for quest requirements).
//!
//! Both are a type tag plus positional string parameters. Known engine types get their own
//! variant; anything else is carried through untouched in `Other`.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Positional parameters. Values are opaque strings; an empty string means "unset".
pub type Params = SmallVec<[String; 3]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ConditionKind {
    HasItem,
    NotHasItem,
    SkillMore,
    QuestFinished,
    Other(String),
}

impl ConditionKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "HasItem" => Self::HasItem,
            "NotHasItem" => Self::NotHasItem,
            "SkillMore" => Self::SkillMore,
            "QuestFinished" => Self::QuestFinished,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::HasItem => "HasItem",
            Self::NotHasItem => "NotHasItem",
            Self::SkillMore => "SkillMore",
            Self::QuestFinished => "QuestFinished",
            Self::Other(name) => name,
        }
    }

    /// Labels for the expected parameters, for editor hints. Not enforced anywhere.
    pub fn param_labels(&self) -> &'static [&'static str] {
        match self {
            Self::HasItem | Self::NotHasItem => &["ItemPrefab", "Amount", "ItemLevel"],
            Self::SkillMore => &["SkillName", "MinLevel"],
            Self::QuestFinished => &["QuestName"],
            Self::Other(_) => &[],
        }
    }

    pub fn known() -> [Self; 4] {
        [
            Self::HasItem,
            Self::NotHasItem,
            Self::SkillMore,
            Self::QuestFinished,
        ]
    }
}

impl From<String> for ConditionKind {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ConditionKind> for String {
    fn from(value: ConditionKind) -> Self {
        match value {
            ConditionKind::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum CommandKind {
    GiveItem,
    RemoveItem,
    GiveQuest,
    FinishQuest,
    Other(String),
}

impl CommandKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "GiveItem" => Self::GiveItem,
            "RemoveItem" => Self::RemoveItem,
            "GiveQuest" => Self::GiveQuest,
            "FinishQuest" => Self::FinishQuest,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::GiveItem => "GiveItem",
            Self::RemoveItem => "RemoveItem",
            Self::GiveQuest => "GiveQuest",
            Self::FinishQuest => "FinishQuest",
            Self::Other(name) => name,
        }
    }

    pub fn param_labels(&self) -> &'static [&'static str] {
        match self {
            Self::GiveItem => &["ItemPrefab", "Amount", "Level"],
            Self::RemoveItem => &["ItemPrefab", "Amount"],
            Self::GiveQuest => &["QuestName"],
            Self::FinishQuest => &["QuestID"],
            Self::Other(_) => &[],
        }
    }

    pub fn known() -> [Self; 4] {
        [
            Self::GiveItem,
            Self::RemoveItem,
            Self::GiveQuest,
            Self::FinishQuest,
        ]
    }
}

impl From<String> for CommandKind {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<CommandKind> for String {
    fn from(value: CommandKind) -> Self {
        match value {
            CommandKind::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gate on an option, e.g. `HasItem, Hoe, 1`. Also the shape of a quest requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub kind: ConditionKind,
    #[serde(default)]
    pub params: Params,
}

impl Condition {
    pub fn new<I, S>(kind: ConditionKind, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

/// An effect run when an option is picked, e.g. `GiveItem, Coins, 100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub kind: CommandKind,
    #[serde(default)]
    pub params: Params,
}

impl Command {
    pub fn new<I, S>(kind: CommandKind, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandKind, Condition, ConditionKind};

    #[test]
    fn condition_kind_parses_known_names_and_keeps_unknown() {
        assert_eq!(ConditionKind::parse("HasItem"), ConditionKind::HasItem);
        assert_eq!(
            ConditionKind::parse("IsNight"),
            ConditionKind::Other("IsNight".to_owned())
        );
        assert_eq!(ConditionKind::parse("IsNight").as_str(), "IsNight");
    }

    #[test]
    fn known_kinds_round_trip_through_their_names() {
        for kind in ConditionKind::known() {
            assert_eq!(ConditionKind::parse(kind.as_str()), kind);
            assert!(!kind.param_labels().is_empty());
        }
        for kind in CommandKind::known() {
            assert_eq!(CommandKind::parse(kind.as_str()), kind);
            assert!(!kind.param_labels().is_empty());
        }
    }

    #[test]
    fn param_labels_follow_the_editor_table() {
        assert_eq!(
            ConditionKind::SkillMore.param_labels(),
            &["SkillName", "MinLevel"]
        );
        assert_eq!(
            CommandKind::RemoveItem.param_labels(),
            &["ItemPrefab", "Amount"]
        );
        assert!(CommandKind::Other("Teleport".to_owned())
            .param_labels()
            .is_empty());
    }

    #[test]
    fn condition_serializes_kind_as_name() {
        let condition = Condition::new(ConditionKind::HasItem, ["Hoe", "1"]);
        let json = serde_json::to_value(&condition).expect("serialize");
        assert_eq!(json["kind"], "HasItem");
        assert_eq!(json["params"][1], "1");

        let back: Condition = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, condition);
    }
}
