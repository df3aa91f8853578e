// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use crate::model::{DialogueGraph, NodeId, OptionId};

/// One drawn arrow: an option whose transition targets an existing node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub from: NodeId,
    pub option_id: OptionId,
    pub option_index: usize,
    pub to: NodeId,
}

/// Node-to-node connections in graph and option order.
///
/// Quest and external transitions, and transitions to missing nodes, are not connections.
pub fn connections(graph: &DialogueGraph) -> Vec<Connection> {
    let mut out = Vec::new();
    for node in graph.nodes().values() {
        for (option_index, option) in node.options.iter().enumerate() {
            let Some(target) = option.transition.node_id() else {
                continue;
            };
            if !graph.contains_node(target) {
                continue;
            }
            out.push(Connection {
                from: node.id().clone(),
                option_id: option.id().clone(),
                option_index,
                to: target.clone(),
            });
        }
    }
    out
}

/// Connections that lead into `node_id`.
pub fn incoming(graph: &DialogueGraph, node_id: &NodeId) -> Vec<Connection> {
    connections(graph)
        .into_iter()
        .filter(|connection| &connection.to == node_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{connections, incoming};
    use crate::model::{DialogueGraph, NodeId, Position, QuestId, Transition};

    fn node_id(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    fn fixture_graph() -> DialogueGraph {
        let mut graph = DialogueGraph::new();
        for id in ["start", "jobs", "shop", "farewell", "orphan"] {
            graph
                .add_node(Some(node_id(id)), Position::default())
                .expect("add node");
        }
        let mut link = |from: &str, transition: Transition| {
            graph
                .add_option(&node_id(from), "go")
                .expect("option")
                .transition = transition;
        };
        link("start", Transition::Node(node_id("jobs")));
        link("start", Transition::Node(node_id("shop")));
        link("jobs", Transition::Node(node_id("shop")));
        link("jobs", Transition::Quest(QuestId::new("Q1").expect("quest id")));
        link("shop", Transition::Node(node_id("farewell")));
        link("shop", Transition::Node(node_id("gone")));
        link("orphan", Transition::External("OpenTrader".to_owned()));
        graph
    }

    #[test]
    fn connections_skip_quest_external_and_dangling() {
        let graph = fixture_graph();
        let all = connections(&graph);
        let pairs: Vec<(&str, &str)> = all
            .iter()
            .map(|c| (c.from.as_str(), c.to.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("start", "jobs"),
                ("start", "shop"),
                ("jobs", "shop"),
                ("shop", "farewell"),
            ]
        );
    }

    #[test]
    fn incoming_lists_sources() {
        let graph = fixture_graph();
        let sources: Vec<String> = incoming(&graph, &node_id("shop"))
            .into_iter()
            .map(|c| c.from.into_string())
            .collect();
        assert_eq!(sources, vec!["start", "jobs"]);
        assert!(incoming(&graph, &node_id("start")).is_empty());
    }
}
