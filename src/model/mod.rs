// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A project holds one dialogue graph (nodes with player options) and one quest book.

pub mod clause;
pub mod color;
pub mod demo;
pub mod dialogue;
pub mod error;
pub mod ids;
pub mod markup;
pub mod project;
pub mod quest;

pub use clause::{Command, CommandKind, Condition, ConditionKind, Params};
pub use color::{Color, ColorError};
pub use dialogue::{
    DeletedNode, DialogueGraph, DialogueNode, DialogueOption, Position, Transition,
    DEFAULT_NODE_TEXT, DEFAULT_OPTION_TEXT,
};
pub use error::{EditError, ListKind};
pub use ids::{Id, IdError, NodeId, OptionId, QuestId};
pub use markup::{parse_markup, strip_markup, Span};
pub use project::Project;
pub use quest::{
    Quest, QuestBook, QuestKind, QuestProperty, QuestReward, QuestTarget, RewardKind,
};
