// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Dialogue/quest mutation helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_dialogue_op(
    graph: &mut DialogueGraph,
    op: &DialogueOp,
    delta: &mut DeltaBuilder,
) -> Result<(), EditError> {
    match op {
        DialogueOp::AddNode {
            node_id,
            position,
            text,
        } => {
            let node = graph.add_node(node_id.clone(), *position)?;
            if let Some(text) = text {
                node.text = text.clone();
            }
            delta.record_added(node_ref(node.id()));
            Ok(())
        }
        DialogueOp::RenameNode { node_id, new_id } => {
            graph.rename_node(node_id, new_id.clone())?;
            if node_id != new_id {
                delta.record_removed(node_ref(node_id));
                delta.record_added(node_ref(new_id));
            }
            Ok(())
        }
        DialogueOp::UpdateNode { node_id, patch } => {
            let node = graph
                .node_mut(node_id)
                .ok_or_else(|| EditError::NodeNotFound(node_id.clone()))?;
            if let Some(text) = &patch.text {
                node.text = text.clone();
            }
            if let Some(position) = patch.position {
                node.position = position;
            }
            if let Some(collapsed) = patch.collapsed {
                node.collapsed = collapsed;
            }
            delta.record_updated(node_ref(node_id));
            Ok(())
        }
        DialogueOp::DeleteNode { node_id } => {
            let deleted = graph.delete_node(node_id)?;
            for option in &deleted.node.options {
                delta.record_removed(option_ref(node_id, option.id()));
            }
            delta.record_removed(node_ref(node_id));
            for (other_id, option_id) in &deleted.cleared {
                delta.record_updated(option_ref(other_id, option_id));
            }
            Ok(())
        }
        DialogueOp::AddOption { node_id, text } => {
            let text = text.as_deref().unwrap_or(crate::model::DEFAULT_OPTION_TEXT);
            let option = graph.add_option(node_id, text)?;
            delta.record_added(option_ref(node_id, option.id()));
            Ok(())
        }
        DialogueOp::UpdateOption {
            node_id,
            option_id,
            patch,
        } => {
            let option = graph.option_mut(node_id, option_id)?;
            if let Some(text) = &patch.text {
                option.text = text.clone();
            }
            if let Some(transition) = &patch.transition {
                option.transition = transition.clone();
            }
            if let Some(icon) = &patch.icon {
                option.icon = icon.clone();
            }
            if let Some(color) = patch.color {
                option.color = color;
            }
            delta.record_updated(option_ref(node_id, option_id));
            Ok(())
        }
        DialogueOp::DeleteOption { node_id, option_id } => {
            graph.delete_option(node_id, option_id)?;
            delta.record_removed(option_ref(node_id, option_id));
            Ok(())
        }
        DialogueOp::AddCondition {
            node_id,
            option_id,
            condition,
        } => {
            graph
                .option_mut(node_id, option_id)?
                .push_condition(condition.clone());
            delta.record_updated(option_ref(node_id, option_id));
            Ok(())
        }
        DialogueOp::RemoveCondition {
            node_id,
            option_id,
            index,
        } => {
            graph
                .option_mut(node_id, option_id)?
                .remove_condition(*index)?;
            delta.record_updated(option_ref(node_id, option_id));
            Ok(())
        }
        DialogueOp::AddCommand {
            node_id,
            option_id,
            command,
        } => {
            graph
                .option_mut(node_id, option_id)?
                .push_command(command.clone());
            delta.record_updated(option_ref(node_id, option_id));
            Ok(())
        }
        DialogueOp::RemoveCommand {
            node_id,
            option_id,
            index,
        } => {
            graph
                .option_mut(node_id, option_id)?
                .remove_command(*index)?;
            delta.record_updated(option_ref(node_id, option_id));
            Ok(())
        }
    }
}

fn apply_quest_op(
    book: &mut QuestBook,
    op: &QuestOp,
    delta: &mut DeltaBuilder,
) -> Result<(), EditError> {
    match op {
        QuestOp::AddQuest { quest_id } => {
            let quest = book.add_quest(quest_id.clone())?;
            delta.record_added(quest_ref(quest.id()));
        }
        QuestOp::RenameQuest { quest_id, new_id } => {
            book.rename_quest(quest_id, new_id.clone())?;
            if quest_id != new_id {
                delta.record_removed(quest_ref(quest_id));
                delta.record_added(quest_ref(new_id));
            }
        }
        QuestOp::UpdateProperty { quest_id, property } => {
            book.update_property(quest_id, property.clone())?;
            delta.record_updated(quest_ref(quest_id));
        }
        QuestOp::AddTarget { quest_id, target } => {
            book.push_target(quest_id, target.clone())?;
            delta.record_updated(quest_ref(quest_id));
        }
        QuestOp::RemoveTarget { quest_id, index } => {
            book.remove_target(quest_id, *index)?;
            delta.record_updated(quest_ref(quest_id));
        }
        QuestOp::AddReward { quest_id, reward } => {
            book.push_reward(quest_id, reward.clone())?;
            delta.record_updated(quest_ref(quest_id));
        }
        QuestOp::RemoveReward { quest_id, index } => {
            book.remove_reward(quest_id, *index)?;
            delta.record_updated(quest_ref(quest_id));
        }
        QuestOp::AddRequirement {
            quest_id,
            requirement,
        } => {
            book.push_requirement(quest_id, requirement.clone())?;
            delta.record_updated(quest_ref(quest_id));
        }
        QuestOp::RemoveRequirement { quest_id, index } => {
            book.remove_requirement(quest_id, *index)?;
            delta.record_updated(quest_ref(quest_id));
        }
        QuestOp::DeleteQuest { quest_id } => {
            book.delete_quest(quest_id)?;
            delta.record_removed(quest_ref(quest_id));
        }
    }
    Ok(())
}

fn node_ref(node_id: &NodeId) -> ObjectRef {
    ObjectRef::Node {
        node_id: node_id.clone(),
    }
}

fn option_ref(node_id: &NodeId, option_id: &OptionId) -> ObjectRef {
    ObjectRef::DialogueOption {
        node_id: node_id.clone(),
        option_id: option_id.clone(),
    }
}

fn quest_ref(quest_id: &QuestId) -> ObjectRef {
    ObjectRef::Quest {
        quest_id: quest_id.clone(),
    }
}
