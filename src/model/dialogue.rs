// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The dialogue graph: NPC lines (nodes) and the player options that link them.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::clause::{Command, Condition};
use super::color::Color;
use super::error::{EditError, ListKind};
use super::ids::{timestamp_id, IdError, NodeId, OptionId, QuestId};

pub const DEFAULT_NODE_TEXT: &str = "NPC line goes here...";
pub const DEFAULT_OPTION_TEXT: &str = "New option";

const QUEST_PREFIX: &str = "quest:";
const EXTERNAL_PREFIX: &str = "ext:";

/// Canvas position. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where picking an option leads.
///
/// The CFG file folds all of these into one string (`quest:`/`ext:` prefixes); the model keeps
/// them apart so node references can be checked without string sniffing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Transition {
    #[default]
    None,
    Node(NodeId),
    Quest(QuestId),
    External(String),
}

impl Transition {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            Self::Node(node_id) => Some(node_id),
            _ => None,
        }
    }

    /// Decodes the CFG representation. An empty string means no transition.
    pub fn from_wire(raw: &str) -> Result<Self, IdError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::None);
        }
        if let Some(quest) = raw.strip_prefix(QUEST_PREFIX) {
            return QuestId::new(quest.trim()).map(Self::Quest);
        }
        if let Some(external) = raw.strip_prefix(EXTERNAL_PREFIX) {
            let external = external.trim();
            if external.is_empty() {
                return Err(IdError::Empty);
            }
            return Ok(Self::External(external.to_owned()));
        }
        NodeId::new(raw).map(Self::Node)
    }

    pub fn to_wire(&self) -> Cow<'_, str> {
        match self {
            Self::None => Cow::Borrowed(""),
            Self::Node(node_id) => Cow::Borrowed(node_id.as_str()),
            Self::Quest(quest_id) => Cow::Owned(format!("{QUEST_PREFIX}{quest_id}")),
            Self::External(target) => Cow::Owned(format!("{EXTERNAL_PREFIX}{target}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueOption {
    id: OptionId,
    pub text: String,
    #[serde(default)]
    pub transition: Transition,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl DialogueOption {
    pub fn new(id: OptionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            transition: Transition::None,
            icon: String::new(),
            color: Color::default(),
            conditions: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn id(&self) -> &OptionId {
        &self.id
    }

    pub fn push_condition(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn remove_condition(&mut self, index: usize) -> Result<Condition, EditError> {
        if index >= self.conditions.len() {
            return Err(EditError::IndexOutOfRange {
                list: ListKind::Conditions,
                index,
                len: self.conditions.len(),
            });
        }
        Ok(self.conditions.remove(index))
    }

    pub fn push_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn remove_command(&mut self, index: usize) -> Result<Command, EditError> {
        if index >= self.commands.len() {
            return Err(EditError::IndexOutOfRange {
                list: ListKind::Commands,
                index,
                len: self.commands.len(),
            });
        }
        Ok(self.commands.remove(index))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueNode {
    id: NodeId,
    pub text: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub options: Vec<DialogueOption>,
}

impl DialogueNode {
    pub fn new(id: NodeId, text: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            text: text.into(),
            position,
            collapsed: false,
            options: Vec::new(),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn option(&self, option_id: &OptionId) -> Option<&DialogueOption> {
        self.options.iter().find(|option| option.id() == option_id)
    }

    pub fn option_mut(&mut self, option_id: &OptionId) -> Option<&mut DialogueOption> {
        self.options.iter_mut().find(|option| option.id() == option_id)
    }
}

/// What `delete_node` removed, plus the options whose transition was cleared as a consequence.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedNode {
    pub node: DialogueNode,
    pub cleared: Vec<(NodeId, OptionId)>,
}

/// All dialogue nodes of a project, in insertion order.
///
/// Order matters: it is the CFG export order and the first node is where a conversation starts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DialogueGraph {
    nodes: IndexMap<NodeId, DialogueNode>,
    #[serde(default)]
    next_option_seq: u64,
}

impl DialogueGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &IndexMap<NodeId, DialogueNode> {
        &self.nodes
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&DialogueNode> {
        self.nodes.get(node_id)
    }

    pub fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut DialogueNode> {
        self.nodes.get_mut(node_id)
    }

    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    pub fn first_node(&self) -> Option<&DialogueNode> {
        self.nodes.first().map(|(_, node)| node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates a node with placeholder text and no options.
    ///
    /// Without an explicit id a time-based one is generated.
    pub fn add_node(
        &mut self,
        node_id: Option<NodeId>,
        position: Position,
    ) -> Result<&mut DialogueNode, EditError> {
        let node_id = match node_id {
            Some(node_id) => {
                if self.nodes.contains_key(&node_id) {
                    return Err(EditError::NodeExists(node_id));
                }
                node_id
            }
            None => timestamp_id("node", |candidate| self.nodes.contains_key(candidate)),
        };

        let entry = self.nodes.entry(node_id.clone());
        Ok(entry.or_insert_with(|| DialogueNode::new(node_id, DEFAULT_NODE_TEXT, position)))
    }

    /// Inserts `node`, replacing (in place) any node with the same id.
    pub fn insert_node(&mut self, node: DialogueNode) -> Option<DialogueNode> {
        self.nodes.insert(node.id().clone(), node)
    }

    /// Re-keys a node, keeping its place in the ordering.
    ///
    /// Transitions that point at the old id are left as they are; the validator reports them.
    pub fn rename_node(&mut self, old_id: &NodeId, new_id: NodeId) -> Result<(), EditError> {
        let Some(index) = self.nodes.get_index_of(old_id) else {
            return Err(EditError::NodeNotFound(old_id.clone()));
        };
        if &new_id == old_id {
            return Ok(());
        }
        if self.nodes.contains_key(&new_id) {
            return Err(EditError::NodeExists(new_id));
        }

        let Some((_, mut node)) = self.nodes.shift_remove_index(index) else {
            return Err(EditError::NodeNotFound(old_id.clone()));
        };
        node.id = new_id.clone();
        self.nodes.shift_insert(index, new_id, node);
        Ok(())
    }

    /// Removes a node and clears every transition that targeted it.
    pub fn delete_node(&mut self, node_id: &NodeId) -> Result<DeletedNode, EditError> {
        let Some(node) = self.nodes.shift_remove(node_id) else {
            return Err(EditError::NodeNotFound(node_id.clone()));
        };

        let mut cleared = Vec::new();
        for (other_id, other) in &mut self.nodes {
            for option in &mut other.options {
                if option.transition.node_id() == Some(node_id) {
                    option.transition = Transition::None;
                    cleared.push((other_id.clone(), option.id.clone()));
                }
            }
        }

        Ok(DeletedNode { node, cleared })
    }

    pub fn add_option(
        &mut self,
        node_id: &NodeId,
        text: impl Into<String>,
    ) -> Result<&mut DialogueOption, EditError> {
        if !self.nodes.contains_key(node_id) {
            return Err(EditError::NodeNotFound(node_id.clone()));
        }
        let option_id = self.next_option_id();
        let Some(node) = self.nodes.get_mut(node_id) else {
            return Err(EditError::NodeNotFound(node_id.clone()));
        };
        node.options.push(DialogueOption::new(option_id, text));
        let index = node.options.len() - 1;
        Ok(&mut node.options[index])
    }

    pub fn delete_option(
        &mut self,
        node_id: &NodeId,
        option_id: &OptionId,
    ) -> Result<DialogueOption, EditError> {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return Err(EditError::NodeNotFound(node_id.clone()));
        };
        let Some(index) = node.options.iter().position(|o| o.id() == option_id) else {
            return Err(EditError::OptionNotFound {
                node_id: node_id.clone(),
                option_id: option_id.clone(),
            });
        };
        Ok(node.options.remove(index))
    }

    pub fn option_mut(
        &mut self,
        node_id: &NodeId,
        option_id: &OptionId,
    ) -> Result<&mut DialogueOption, EditError> {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return Err(EditError::NodeNotFound(node_id.clone()));
        };
        node.option_mut(option_id)
            .ok_or_else(|| EditError::OptionNotFound {
                node_id: node_id.clone(),
                option_id: option_id.clone(),
            })
    }

    fn next_option_id(&mut self) -> OptionId {
        loop {
            self.next_option_seq = self.next_option_seq.saturating_add(1);
            let candidate = format!("opt_{}", self.next_option_seq);
            let taken = self
                .nodes
                .values()
                .flat_map(|node| node.options.iter())
                .any(|option| option.id().as_str() == candidate);
            if !taken {
                return OptionId::from_trusted(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DialogueGraph, Position, Transition, DEFAULT_NODE_TEXT};
    use crate::model::{EditError, NodeId, QuestId};

    fn node_id(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    fn fixture_graph() -> DialogueGraph {
        let mut graph = DialogueGraph::new();
        for id in ["a", "b", "c"] {
            graph
                .add_node(Some(node_id(id)), Position::default())
                .expect("add node");
        }
        graph
            .add_option(&node_id("b"), "to a")
            .expect("option")
            .transition = Transition::Node(node_id("a"));
        graph
            .add_option(&node_id("c"), "also to a")
            .expect("option")
            .transition = Transition::Node(node_id("a"));
        graph
            .add_option(&node_id("c"), "to b")
            .expect("option")
            .transition = Transition::Node(node_id("b"));
        graph
    }

    #[test]
    fn add_node_uses_placeholder_text_and_rejects_duplicates() {
        let mut graph = DialogueGraph::new();
        let node = graph
            .add_node(Some(node_id("default")), Position::new(200.0, 200.0))
            .expect("add node");
        assert_eq!(node.text, DEFAULT_NODE_TEXT);
        assert!(node.options.is_empty());

        let err = graph
            .add_node(Some(node_id("default")), Position::default())
            .unwrap_err();
        assert_eq!(err, EditError::NodeExists(node_id("default")));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn add_node_generates_unique_ids() {
        let mut graph = DialogueGraph::new();
        let first = graph
            .add_node(None, Position::default())
            .expect("add")
            .id()
            .clone();
        let second = graph
            .add_node(None, Position::default())
            .expect("add")
            .id()
            .clone();
        assert_ne!(first, second);
        assert!(first.as_str().starts_with("node_"));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn rename_keeps_order_and_leaves_transitions_stale() {
        let mut graph = fixture_graph();
        graph.rename_node(&node_id("a"), node_id("start")).expect("rename");

        let order: Vec<&str> = graph.nodes().keys().map(|id| id.as_str()).collect();
        assert_eq!(order, vec!["start", "b", "c"]);
        assert_eq!(graph.node(&node_id("start")).expect("node").id().as_str(), "start");

        let b = graph.node(&node_id("b")).expect("b");
        assert_eq!(b.options[0].transition, Transition::Node(node_id("a")));
    }

    #[test]
    fn rename_refuses_taken_id_without_mutating() {
        let mut graph = fixture_graph();
        let before = graph.clone();
        let err = graph.rename_node(&node_id("a"), node_id("b")).unwrap_err();
        assert_eq!(err, EditError::NodeExists(node_id("b")));
        assert_eq!(graph, before);

        let err = graph.rename_node(&node_id("zzz"), node_id("y")).unwrap_err();
        assert_eq!(err, EditError::NodeNotFound(node_id("zzz")));
    }

    #[test]
    fn delete_node_clears_incoming_transitions() {
        let mut graph = fixture_graph();
        let deleted = graph.delete_node(&node_id("a")).expect("delete");
        assert_eq!(deleted.node.id(), &node_id("a"));
        assert_eq!(deleted.cleared.len(), 2);

        let b = graph.node(&node_id("b")).expect("b");
        assert_eq!(b.options.len(), 1);
        assert_eq!(b.options[0].transition, Transition::None);

        let c = graph.node(&node_id("c")).expect("c");
        assert_eq!(c.options[0].transition, Transition::None);
        assert_eq!(c.options[1].transition, Transition::Node(node_id("b")));
    }

    #[test]
    fn add_option_on_missing_node_fails() {
        let mut graph = DialogueGraph::new();
        let err = graph.add_option(&node_id("ghost"), "hi").unwrap_err();
        assert_eq!(err, EditError::NodeNotFound(node_id("ghost")));
    }

    #[test]
    fn option_ids_stay_unique_after_delete() {
        let mut graph = fixture_graph();
        let c = node_id("c");
        let first = graph.node(&c).expect("c").options[0].id().clone();
        graph.delete_option(&c, &first).expect("delete option");
        let added = graph.add_option(&c, "new").expect("option").id().clone();
        assert_ne!(added, first);

        let err = graph.delete_option(&c, &first).unwrap_err();
        assert!(matches!(err, EditError::OptionNotFound { .. }));
    }

    #[test]
    fn transition_wire_format_uses_prefixes() {
        assert_eq!(Transition::from_wire(""), Ok(Transition::None));
        assert_eq!(
            Transition::from_wire("quest:MyTestQuest1"),
            Ok(Transition::Quest(QuestId::new("MyTestQuest1").expect("quest id")))
        );
        assert_eq!(
            Transition::from_wire("ext:OpenTrader"),
            Ok(Transition::External("OpenTrader".to_owned()))
        );
        assert_eq!(Transition::from_wire("shop"), Ok(Transition::Node(node_id("shop"))));
        assert!(Transition::from_wire("quest:").is_err());
        assert!(Transition::from_wire("ext:  ").is_err());

        for raw in ["shop", "quest:Q1", "ext:Trader"] {
            let transition = Transition::from_wire(raw).expect("transition");
            assert_eq!(transition.to_wire(), raw);
        }
    }
}
