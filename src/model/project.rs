// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::dialogue::DialogueGraph;
use super::quest::QuestBook;

/// The editing session: one dialogue graph, one quest book and a revision counter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    dialogue: DialogueGraph,
    quests: QuestBook,
    #[serde(default)]
    rev: u64,
}

impl Project {
    pub fn new(dialogue: DialogueGraph, quests: QuestBook) -> Self {
        Self {
            dialogue,
            quests,
            rev: 0,
        }
    }

    pub fn dialogue(&self) -> &DialogueGraph {
        &self.dialogue
    }

    pub fn dialogue_mut(&mut self) -> &mut DialogueGraph {
        &mut self.dialogue
    }

    pub fn quests(&self) -> &QuestBook {
        &self.quests
    }

    pub fn quests_mut(&mut self) -> &mut QuestBook {
        &mut self.quests
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    /// Swaps in a freshly imported dialogue graph and returns the old one.
    pub fn replace_dialogue(&mut self, dialogue: DialogueGraph) -> DialogueGraph {
        let previous = std::mem::replace(&mut self.dialogue, dialogue);
        self.bump_rev();
        previous
    }

    pub fn replace_quests(&mut self, quests: QuestBook) -> QuestBook {
        let previous = std::mem::replace(&mut self.quests, quests);
        self.bump_rev();
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::Project;
    use crate::model::{DialogueGraph, NodeId, Position, QuestBook};

    #[test]
    fn replacing_content_bumps_rev() {
        let mut project = Project::default();
        assert_eq!(project.rev(), 0);

        let mut graph = DialogueGraph::new();
        graph
            .add_node(Some(NodeId::new("default").expect("id")), Position::default())
            .expect("add");
        let previous = project.replace_dialogue(graph);
        assert!(previous.is_empty());
        assert_eq!(project.dialogue().len(), 1);
        assert_eq!(project.rev(), 1);

        project.replace_quests(QuestBook::new());
        assert_eq!(project.rev(), 2);
    }

    #[test]
    fn snapshot_json_keeps_rev_and_order() {
        let mut project = crate::model::demo::demo_project();
        project.bump_rev();
        let json = serde_json::to_string(&project).expect("serialize");
        let back: Project = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, project);
        assert_eq!(
            back.dialogue().first_node().map(|n| n.id().as_str()),
            Some("default")
        );
    }
}
