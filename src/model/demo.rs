// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sample content seeded into a fresh project.

use super::clause::{Condition, ConditionKind};
use super::color::Color;
use super::dialogue::{DialogueGraph, DialogueNode, DialogueOption, Position, Transition};
use super::ids::{NodeId, OptionId, QuestId};
use super::project::Project;
use super::quest::{Quest, QuestBook, QuestKind, QuestReward, QuestTarget, RewardKind};

fn node_id(value: &'static str) -> NodeId {
    NodeId::from_trusted(value)
}

pub fn demo_dialogue() -> DialogueGraph {
    let default = node_id("default");
    let jobs = node_id("JobOptions");
    let shop = node_id("Shop");

    let mut seq = 0u32;
    let mut option = |text: &str| {
        seq += 1;
        DialogueOption::new(OptionId::from_trusted(format!("opt_demo_{seq}")), text)
    };

    let mut start = DialogueNode::new(
        default.clone(),
        "Hey, Viking!\nNot expecting any letters, are you?",
        Position::new(100.0, 100.0),
    );
    start.options.push(option("A talking fish?"));
    start.options.push(option("Not today..."));
    let mut work = option("Any work for me?");
    work.transition = Transition::Node(jobs.clone());
    start.options.push(work);
    let mut trade = option("Let me talk to the trader");
    trade.transition = Transition::Node(shop.clone());
    trade.color = Color::rgb(0xff, 0x99, 0x00);
    start.options.push(trade);

    let mut job_node = DialogueNode::new(
        jobs,
        "Here is what I can offer you:",
        Position::new(400.0, 100.0),
    );
    job_node
        .options
        .push(option("Fly, little petal,\nwest and east,\nnorth and south..."));
    let mut farm = option("Tend the fields for 300 coins");
    farm.icon = "Hoe".to_owned();
    farm.conditions
        .push(Condition::new(ConditionKind::HasItem, ["Hoe", "1"]));
    job_node.options.push(farm);

    let mut shop_node = DialogueNode::new(
        shop,
        "I love my tea brewed on the right herbs!\nTrading is a joy again!",
        Position::new(400.0, 300.0),
    );
    shop_node.options.push(option("Show me your wares"));
    shop_node
        .options
        .push(option("Need <color=#ff6666>more apples!</color>"));

    let mut graph = DialogueGraph::new();
    graph.insert_node(start);
    graph.insert_node(job_node);
    graph.insert_node(shop_node);
    graph
}

pub fn demo_quests() -> QuestBook {
    let mut quest = Quest::new(QuestId::from_trusted("MyTestQuest1"));
    quest.kind = QuestKind::Kill;
    quest.name = "Shopping list".to_owned();
    quest.description = "Time to clear the road. Here is what needs doing:".to_owned();
    quest.targets = vec![
        QuestTarget::new("Wolf", "10", ""),
        QuestTarget::new("Skeleton", "5", ""),
    ];
    quest.rewards = vec![
        QuestReward::new(RewardKind::Item, "SwordIron", "1", "3"),
        QuestReward::new(RewardKind::Item, "Coins", "100", ""),
    ];
    quest.cooldown = "10".to_owned();
    quest.time_limit = "1800".to_owned();

    let mut book = QuestBook::new();
    book.insert_quest(quest);
    book
}

pub fn demo_project() -> Project {
    Project::new(demo_dialogue(), demo_quests())
}

#[cfg(test)]
mod tests {
    use super::{demo_dialogue, demo_quests};
    use crate::query::validate::{validate, ValidateOptions};

    #[test]
    fn demo_content_is_valid() {
        let graph = demo_dialogue();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.first_node().map(|n| n.options.len()), Some(4));

        let report = validate(&graph, &ValidateOptions::default());
        assert!(report.is_clean(), "{report}");
        assert_eq!(demo_quests().len(), 1);
    }
}
