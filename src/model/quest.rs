// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::clause::Condition;
use super::error::{EditError, ListKind};
use super::ids::{timestamp_id, QuestId};

pub const DEFAULT_QUEST_NAME: &str = "New Quest";
pub const DEFAULT_QUEST_DESCRIPTION: &str = "Quest description";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum QuestKind {
    #[default]
    Kill,
    Collect,
    Harvest,
    Craft,
    Talk,
    Build,
    Move,
    Other(String),
}

impl QuestKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "Kill" => Self::Kill,
            "Collect" => Self::Collect,
            "Harvest" => Self::Harvest,
            "Craft" => Self::Craft,
            "Talk" => Self::Talk,
            "Build" => Self::Build,
            "Move" => Self::Move,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Kill => "Kill",
            Self::Collect => "Collect",
            Self::Harvest => "Harvest",
            Self::Craft => "Craft",
            Self::Talk => "Talk",
            Self::Build => "Build",
            Self::Move => "Move",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for QuestKind {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<QuestKind> for String {
    fn from(value: QuestKind) -> Self {
        match value {
            QuestKind::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for QuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum RewardKind {
    #[default]
    Item,
    Other(String),
}

impl RewardKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "Item" => Self::Item,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Item => "Item",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for RewardKind {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<RewardKind> for String {
    fn from(value: RewardKind) -> Self {
        match value {
            RewardKind::Other(name) => name,
            RewardKind::Item => "Item".to_owned(),
        }
    }
}

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One objective. `amount` and `level` are opaque; an empty string means unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestTarget {
    pub prefab: String,
    pub amount: String,
    #[serde(default)]
    pub level: String,
}

impl QuestTarget {
    pub fn new(
        prefab: impl Into<String>,
        amount: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        Self {
            prefab: prefab.into(),
            amount: amount.into(),
            level: level.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestReward {
    pub kind: RewardKind,
    pub target: String,
    pub amount: String,
    #[serde(default)]
    pub level: String,
}

impl QuestReward {
    pub fn new(
        kind: RewardKind,
        target: impl Into<String>,
        amount: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            target: target.into(),
            amount: amount.into(),
            level: level.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    id: QuestId,
    #[serde(default)]
    pub kind: QuestKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub targets: Vec<QuestTarget>,
    #[serde(default)]
    pub rewards: Vec<QuestReward>,
    /// Game days.
    #[serde(default)]
    pub cooldown: String,
    /// Seconds.
    #[serde(default)]
    pub time_limit: String,
    #[serde(default)]
    pub requirements: Vec<Condition>,
    #[serde(default)]
    pub autocomplete: bool,
}

impl Quest {
    pub fn new(id: QuestId) -> Self {
        Self {
            id,
            kind: QuestKind::Kill,
            name: DEFAULT_QUEST_NAME.to_owned(),
            description: DEFAULT_QUEST_DESCRIPTION.to_owned(),
            targets: Vec::new(),
            rewards: Vec::new(),
            cooldown: String::new(),
            time_limit: String::new(),
            requirements: Vec::new(),
            autocomplete: false,
        }
    }

    /// A quest with every field blank, the starting point for CFG import.
    pub fn blank(id: QuestId) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            kind: QuestKind::Other(String::new()),
            ..Self::new(id)
        }
    }

    pub fn id(&self) -> &QuestId {
        &self.id
    }
}

/// A single scalar quest field update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "property", content = "value", rename_all = "snake_case")]
pub enum QuestProperty {
    Kind(QuestKind),
    Name(String),
    Description(String),
    Cooldown(String),
    TimeLimit(String),
    Autocomplete(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestBook {
    quests: IndexMap<QuestId, Quest>,
}

impl QuestBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quests(&self) -> &IndexMap<QuestId, Quest> {
        &self.quests
    }

    pub fn quest(&self, quest_id: &QuestId) -> Option<&Quest> {
        self.quests.get(quest_id)
    }

    pub fn contains_quest(&self, quest_id: &QuestId) -> bool {
        self.quests.contains_key(quest_id)
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    pub fn add_quest(&mut self, quest_id: Option<QuestId>) -> Result<&mut Quest, EditError> {
        let quest_id = match quest_id {
            Some(quest_id) => {
                if self.quests.contains_key(&quest_id) {
                    return Err(EditError::QuestExists(quest_id));
                }
                quest_id
            }
            None => timestamp_id("Quest", |candidate| self.quests.contains_key(candidate)),
        };
        let entry = self.quests.entry(quest_id.clone());
        Ok(entry.or_insert_with(|| Quest::new(quest_id)))
    }

    /// Inserts `quest`, replacing (in place) any quest with the same id.
    pub fn insert_quest(&mut self, quest: Quest) -> Option<Quest> {
        self.quests.insert(quest.id().clone(), quest)
    }

    pub fn rename_quest(&mut self, old_id: &QuestId, new_id: QuestId) -> Result<(), EditError> {
        let Some(index) = self.quests.get_index_of(old_id) else {
            return Err(EditError::QuestNotFound(old_id.clone()));
        };
        if &new_id == old_id {
            return Ok(());
        }
        if self.quests.contains_key(&new_id) {
            return Err(EditError::QuestExists(new_id));
        }
        let Some((_, mut quest)) = self.quests.shift_remove_index(index) else {
            return Err(EditError::QuestNotFound(old_id.clone()));
        };
        quest.id = new_id.clone();
        self.quests.shift_insert(index, new_id, quest);
        Ok(())
    }

    pub fn update_property(
        &mut self,
        quest_id: &QuestId,
        property: QuestProperty,
    ) -> Result<(), EditError> {
        let quest = self.quest_mut(quest_id)?;
        match property {
            QuestProperty::Kind(kind) => quest.kind = kind,
            QuestProperty::Name(name) => quest.name = name,
            QuestProperty::Description(description) => quest.description = description,
            QuestProperty::Cooldown(cooldown) => quest.cooldown = cooldown,
            QuestProperty::TimeLimit(time_limit) => quest.time_limit = time_limit,
            QuestProperty::Autocomplete(autocomplete) => quest.autocomplete = autocomplete,
        }
        Ok(())
    }

    pub fn push_target(&mut self, quest_id: &QuestId, target: QuestTarget) -> Result<(), EditError> {
        self.quest_mut(quest_id)?.targets.push(target);
        Ok(())
    }

    pub fn remove_target(
        &mut self,
        quest_id: &QuestId,
        index: usize,
    ) -> Result<QuestTarget, EditError> {
        let quest = self.quest_mut(quest_id)?;
        remove_at(&mut quest.targets, ListKind::Targets, index)
    }

    pub fn push_reward(&mut self, quest_id: &QuestId, reward: QuestReward) -> Result<(), EditError> {
        self.quest_mut(quest_id)?.rewards.push(reward);
        Ok(())
    }

    pub fn remove_reward(
        &mut self,
        quest_id: &QuestId,
        index: usize,
    ) -> Result<QuestReward, EditError> {
        let quest = self.quest_mut(quest_id)?;
        remove_at(&mut quest.rewards, ListKind::Rewards, index)
    }

    pub fn push_requirement(
        &mut self,
        quest_id: &QuestId,
        requirement: Condition,
    ) -> Result<(), EditError> {
        self.quest_mut(quest_id)?.requirements.push(requirement);
        Ok(())
    }

    pub fn remove_requirement(
        &mut self,
        quest_id: &QuestId,
        index: usize,
    ) -> Result<Condition, EditError> {
        let quest = self.quest_mut(quest_id)?;
        remove_at(&mut quest.requirements, ListKind::Requirements, index)
    }

    pub fn delete_quest(&mut self, quest_id: &QuestId) -> Result<Quest, EditError> {
        self.quests
            .shift_remove(quest_id)
            .ok_or_else(|| EditError::QuestNotFound(quest_id.clone()))
    }

    fn quest_mut(&mut self, quest_id: &QuestId) -> Result<&mut Quest, EditError> {
        self.quests
            .get_mut(quest_id)
            .ok_or_else(|| EditError::QuestNotFound(quest_id.clone()))
    }
}

fn remove_at<T>(items: &mut Vec<T>, list: ListKind, index: usize) -> Result<T, EditError> {
    if index >= items.len() {
        return Err(EditError::IndexOutOfRange {
            list,
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}
