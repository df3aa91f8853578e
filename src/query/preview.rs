// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Walks a dialogue the way a player would: pick options, follow transitions, step back.

use thiserror::Error;

use crate::model::{DialogueGraph, DialogueNode, NodeId, Transition};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("dialogue has no nodes")]
    Empty,
    #[error("node not found (id={0})")]
    NodeNotFound(NodeId),
    #[error("conversation has ended")]
    Ended,
    #[error("option {index} is out of range (node has {len} options)")]
    OptionOutOfRange { index: usize, len: usize },
    #[error("option leads to missing node (id={0})")]
    DanglingTransition(NodeId),
}

/// What picking an option did.
#[derive(Debug, Clone, PartialEq)]
pub enum Choice<'a> {
    Moved(&'a DialogueNode),
    /// The option had no node transition. A quest or external target is reported as-is.
    Ended(&'a Transition),
}

#[derive(Debug, Clone)]
pub struct Preview<'a> {
    graph: &'a DialogueGraph,
    current: Option<&'a DialogueNode>,
    history: Vec<&'a DialogueNode>,
}

impl<'a> Preview<'a> {
    /// Starts at the first node of the graph.
    pub fn new(graph: &'a DialogueGraph) -> Result<Self, PreviewError> {
        let start = graph.first_node().ok_or(PreviewError::Empty)?;
        Ok(Self {
            graph,
            current: Some(start),
            history: Vec::new(),
        })
    }

    pub fn starting_at(graph: &'a DialogueGraph, node_id: &NodeId) -> Result<Self, PreviewError> {
        let start = graph
            .node(node_id)
            .ok_or_else(|| PreviewError::NodeNotFound(node_id.clone()))?;
        Ok(Self {
            graph,
            current: Some(start),
            history: Vec::new(),
        })
    }

    /// `None` once the conversation has ended.
    pub fn current(&self) -> Option<&'a DialogueNode> {
        self.current
    }

    pub fn is_ended(&self) -> bool {
        self.current.is_none()
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Picks the option at `index` (0-based) on the current node.
    pub fn choose(&mut self, index: usize) -> Result<Choice<'a>, PreviewError> {
        let node = self.current.ok_or(PreviewError::Ended)?;
        let option = node
            .options
            .get(index)
            .ok_or(PreviewError::OptionOutOfRange {
                index,
                len: node.options.len(),
            })?;

        match &option.transition {
            Transition::Node(target) => {
                let next = self
                    .graph
                    .node(target)
                    .ok_or_else(|| PreviewError::DanglingTransition(target.clone()))?;
                self.history.push(node);
                self.current = Some(next);
                Ok(Choice::Moved(next))
            }
            other => {
                self.history.push(node);
                self.current = None;
                Ok(Choice::Ended(other))
            }
        }
    }

    /// Returns to the previous node. `None` at the start of the conversation.
    pub fn back(&mut self) -> Option<&'a DialogueNode> {
        let previous = self.history.pop()?;
        self.current = Some(previous);
        Some(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::{Choice, Preview, PreviewError};
    use crate::model::demo::demo_dialogue;
    use crate::model::{DialogueGraph, NodeId, Transition};

    fn node_id(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    #[test]
    fn walks_forward_and_back() {
        let graph = demo_dialogue();
        let mut preview = Preview::new(&graph).expect("preview");
        assert_eq!(preview.current().map(|n| n.id().as_str()), Some("default"));

        let Choice::Moved(node) = preview.choose(2).expect("choose") else {
            panic!("expected to move");
        };
        assert_eq!(node.id().as_str(), "JobOptions");
        assert_eq!(preview.depth(), 1);

        let back = preview.back().expect("back");
        assert_eq!(back.id().as_str(), "default");
        assert!(preview.back().is_none());
    }

    #[test]
    fn option_without_transition_ends_conversation() {
        let graph = demo_dialogue();
        let mut preview = Preview::new(&graph).expect("preview");
        assert_eq!(
            preview.choose(0).expect("choose"),
            Choice::Ended(&Transition::None)
        );
        assert!(preview.is_ended());
        assert_eq!(preview.choose(0).unwrap_err(), PreviewError::Ended);

        assert_eq!(
            preview.back().map(|n| n.id().as_str()),
            Some("default")
        );
        assert!(!preview.is_ended());
    }

    #[test]
    fn errors_do_not_move() {
        let graph = demo_dialogue();
        let mut preview =
            Preview::starting_at(&graph, &node_id("Shop")).expect("preview");
        assert_eq!(
            preview.choose(9).unwrap_err(),
            PreviewError::OptionOutOfRange { index: 9, len: 2 }
        );
        assert_eq!(preview.current().map(|n| n.id().as_str()), Some("Shop"));

        assert_eq!(
            Preview::new(&DialogueGraph::new()).unwrap_err(),
            PreviewError::Empty
        );
        assert!(Preview::starting_at(&graph, &node_id("nope")).is_err());
    }
}
