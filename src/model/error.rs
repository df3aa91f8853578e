// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use thiserror::Error;

use super::ids::{NodeId, OptionId, QuestId};

/// Which ordered list an index-based edit addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Conditions,
    Commands,
    Targets,
    Rewards,
    Requirements,
}

/// A rejected edit. Edits that fail leave the model untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("node not found (id={0})")]
    NodeNotFound(NodeId),
    #[error("node id is already used (id={0})")]
    NodeExists(NodeId),
    #[error("option not found (node={node_id}, option={option_id})")]
    OptionNotFound { node_id: NodeId, option_id: OptionId },
    #[error("quest not found (id={0})")]
    QuestNotFound(QuestId),
    #[error("quest id is already used (id={0})")]
    QuestExists(QuestId),
    #[error("{list:?} index {index} is out of range (len={len})")]
    IndexOutOfRange {
        list: ListKind,
        index: usize,
        len: usize,
    },
}
