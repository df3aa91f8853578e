// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use palaver::model::{
    Color, Command, CommandKind, Condition, ConditionKind, DialogueGraph, NodeId, Position,
    QuestBook, QuestId, QuestReward, QuestTarget, RewardKind, Transition,
};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    LargeLongText,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::LargeLongText => "large_long_text",
        }
    }

    fn shape(self) -> (usize, usize, usize) {
        // (nodes, options per node, text length)
        match self {
            Self::Small => (12, 3, 24),
            Self::Medium => (200, 4, 48),
            Self::LargeLongText => (1_000, 5, 240),
        }
    }
}

fn ascii_repeat_to_len(prefix: &str, fill: char, target_len: usize) -> String {
    let mut out = String::with_capacity(target_len.max(prefix.len()));
    out.push_str(prefix);
    while out.len() < target_len {
        out.push(fill);
    }
    out
}

fn node_id(index: usize) -> NodeId {
    NodeId::new(format!("node_{index:04}")).expect("valid node id")
}

pub fn dialogue(case: Case) -> DialogueGraph {
    let (nodes, options, text_len) = case.shape();
    let mut graph = DialogueGraph::new();

    for index in 0..nodes {
        let node = graph
            .add_node(Some(node_id(index)), Position::new(index as f64, 0.0))
            .expect("add node");
        node.text = ascii_repeat_to_len(&format!("Line {index}\nsecond line "), 'a', text_len);
    }

    for index in 0..nodes {
        for slot in 0..options {
            let option = graph
                .add_option(&node_id(index), ascii_repeat_to_len("Answer ", 'b', text_len / 2))
                .expect("add option");
            option.transition = match slot % 4 {
                0 => Transition::Node(node_id((index + 1) % nodes)),
                1 => Transition::Node(node_id((index * 7 + slot) % nodes)),
                2 => Transition::Quest(QuestId::new(format!("Quest{index}")).expect("quest id")),
                _ => Transition::None,
            };
            if slot == 1 {
                option.icon = "Hoe".to_owned();
                option.color = Color::rgb(0xff, 0x99, 0x00);
                option
                    .conditions
                    .push(Condition::new(ConditionKind::HasItem, ["Coins", "10"]));
                option
                    .commands
                    .push(Command::new(CommandKind::RemoveItem, ["Coins", "10"]));
            }
        }
    }

    graph
}

pub fn quests(case: Case) -> QuestBook {
    let (count, targets, text_len) = case.shape();
    let mut book = QuestBook::new();
    for index in 0..count {
        let quest_id = QuestId::new(format!("Quest{index}")).expect("quest id");
        let quest = book.add_quest(Some(quest_id)).expect("add quest");
        quest.name = format!("Quest number {index}");
        quest.description = ascii_repeat_to_len("Do the thing ", 'c', text_len);
        quest.targets = (0..targets)
            .map(|slot| QuestTarget::new(format!("Prefab{slot}"), "5", ""))
            .collect();
        quest.rewards = vec![QuestReward::new(RewardKind::Item, "Coins", "100", "")];
        quest.cooldown = "10".to_owned();
        quest
            .requirements
            .push(Condition::new(ConditionKind::SkillMore, ["Run", "10"]));
    }
    book
}

pub fn checksum_dialogue(graph: &DialogueGraph) -> u64 {
    let mut acc = 0u64;
    for (node_id, node) in graph.nodes() {
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(node_id.as_str().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(node.text.len() as u64);
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(node.options.len() as u64);
    }
    acc
}

pub fn checksum_quests(book: &QuestBook) -> u64 {
    let mut acc = 0u64;
    for (quest_id, quest) in book.quests() {
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(quest_id.as_str().len() as u64);
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(quest.targets.len() as u64);
    }
    acc
}
