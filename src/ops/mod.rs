// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for a project.
//!
//! Operations are applied with optimistic concurrency (revision checks) and produce a minimal
//! delta that a front end can use to refresh derived state.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::model::{
    Color, Command, Condition, DialogueGraph, EditError, NodeId, OptionId, Position, Project,
    QuestBook, QuestId, QuestProperty, QuestReward, QuestTarget, Transition,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Dialogue(DialogueOp),
    Quest(QuestOp),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogueOp {
    /// Without `node_id` a time-based id is generated; without `text` the placeholder is used.
    AddNode {
        node_id: Option<NodeId>,
        position: Position,
        text: Option<String>,
    },
    RenameNode {
        node_id: NodeId,
        new_id: NodeId,
    },
    UpdateNode {
        node_id: NodeId,
        patch: NodePatch,
    },
    DeleteNode {
        node_id: NodeId,
    },
    AddOption {
        node_id: NodeId,
        text: Option<String>,
    },
    UpdateOption {
        node_id: NodeId,
        option_id: OptionId,
        patch: OptionPatch,
    },
    DeleteOption {
        node_id: NodeId,
        option_id: OptionId,
    },
    AddCondition {
        node_id: NodeId,
        option_id: OptionId,
        condition: Condition,
    },
    RemoveCondition {
        node_id: NodeId,
        option_id: OptionId,
        index: usize,
    },
    AddCommand {
        node_id: NodeId,
        option_id: OptionId,
        command: Command,
    },
    RemoveCommand {
        node_id: NodeId,
        option_id: OptionId,
        index: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub text: Option<String>,
    pub position: Option<Position>,
    pub collapsed: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionPatch {
    pub text: Option<String>,
    pub transition: Option<Transition>,
    pub icon: Option<String>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestOp {
    AddQuest { quest_id: Option<QuestId> },
    RenameQuest { quest_id: QuestId, new_id: QuestId },
    UpdateProperty { quest_id: QuestId, property: QuestProperty },
    AddTarget { quest_id: QuestId, target: QuestTarget },
    RemoveTarget { quest_id: QuestId, index: usize },
    AddReward { quest_id: QuestId, reward: QuestReward },
    RemoveReward { quest_id: QuestId, index: usize },
    AddRequirement { quest_id: QuestId, requirement: Condition },
    RemoveRequirement { quest_id: QuestId, index: usize },
    DeleteQuest { quest_id: QuestId },
}

/// Addresses one object touched by an op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectRef {
    Node { node_id: NodeId },
    DialogueOption { node_id: NodeId, option_id: OptionId },
    Quest { quest_id: QuestId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Minimal delta describing which objects changed as the result of applying ops.
///
/// This is intentionally coarse: it reports only added/removed/updated `ObjectRef`s.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Delta {
    pub added: Vec<ObjectRef>,
    pub removed: Vec<ObjectRef>,
    pub updated: Vec<ObjectRef>,
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<ObjectRef>,
    removed: HashSet<ObjectRef>,
    updated: HashSet<ObjectRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, object_ref: ObjectRef) {
        self.removed.remove(&object_ref);
        self.updated.remove(&object_ref);
        self.added.insert(object_ref);
    }

    fn record_removed(&mut self, object_ref: ObjectRef) {
        // Added and removed within one batch nets out to nothing.
        if self.added.remove(&object_ref) {
            self.updated.remove(&object_ref);
            return;
        }
        self.updated.remove(&object_ref);
        self.removed.insert(object_ref);
    }

    fn record_updated(&mut self, object_ref: ObjectRef) {
        if self.added.contains(&object_ref) || self.removed.contains(&object_ref) {
            return;
        }
        self.updated.insert(object_ref);
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort();
        removed.sort();
        updated.sort();

        Delta {
            added,
            removed,
            updated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("stale base_rev (base_rev={base_rev}, current_rev={current_rev})")]
    Conflict { base_rev: u64, current_rev: u64 },
    #[error("op {index} failed: {source}")]
    Edit {
        index: usize,
        #[source]
        source: EditError,
    },
}

impl ApplyError {
    /// The underlying edit failure, if any.
    pub fn edit_error(&self) -> Option<&EditError> {
        match self {
            Self::Edit { source, .. } => Some(source),
            Self::Conflict { .. } => None,
        }
    }
}

/// Applies `ops` in order. Either all of them apply and `rev` advances by one, or none do.
pub fn apply_ops(
    project: &mut Project,
    base_rev: u64,
    ops: &[Op],
) -> Result<ApplyResult, ApplyError> {
    let current_rev = project.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict {
            base_rev,
            current_rev,
        });
    }

    if ops.is_empty() {
        return Ok(ApplyResult {
            new_rev: current_rev,
            applied: 0,
            delta: Delta::default(),
        });
    }

    let mut next = project.clone();
    let mut delta = DeltaBuilder::default();

    for (index, op) in ops.iter().enumerate() {
        let result = match op {
            Op::Dialogue(dialogue_op) => {
                apply_dialogue_op(next.dialogue_mut(), dialogue_op, &mut delta)
            }
            Op::Quest(quest_op) => apply_quest_op(next.quests_mut(), quest_op, &mut delta),
        };
        result.map_err(|source| ApplyError::Edit { index, source })?;
    }

    next.bump_rev();
    *project = next;
    let new_rev = project.rev();
    debug!(new_rev, applied = ops.len(), "ops applied");

    Ok(ApplyResult {
        new_rev,
        applied: ops.len(),
        delta: delta.finish(),
    })
}

// Extracted op-application implementation for dialogue/quest mutations.
include!("ops_impl.rs");
