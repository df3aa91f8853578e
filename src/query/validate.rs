// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural checks over a dialogue graph.
//!
//! Findings are collected, never thrown. Missing text and dangling references are errors;
//! cycles are warnings because conversations may loop on purpose.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::model::{DialogueGraph, NodeId, Project, QuestId, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// `option_index` is 0-based; `Display` shows it 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    MissingNpcText {
        node_id: NodeId,
    },
    MissingOptionText {
        node_id: NodeId,
        option_index: usize,
    },
    DanglingTransition {
        node_id: NodeId,
        option_index: usize,
        target: NodeId,
    },
    DanglingQuestTransition {
        node_id: NodeId,
        option_index: usize,
        quest_id: QuestId,
    },
    Cycle {
        path: Vec<NodeId>,
    },
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Cycle { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNpcText { node_id } => write!(f, "node \"{node_id}\": missing NPC text"),
            Self::MissingOptionText {
                node_id,
                option_index,
            } => write!(
                f,
                "node \"{node_id}\", option {}: missing text",
                option_index + 1
            ),
            Self::DanglingTransition {
                node_id,
                option_index,
                target,
            } => write!(
                f,
                "node \"{node_id}\", option {}: transition leads to missing node \"{target}\"",
                option_index + 1
            ),
            Self::DanglingQuestTransition {
                node_id,
                option_index,
                quest_id,
            } => write!(
                f,
                "node \"{node_id}\", option {}: transition leads to missing quest \"{quest_id}\"",
                option_index + 1
            ),
            Self::Cycle { path } => {
                f.write_str("cycle: ")?;
                for (i, node_id) in path.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" -> ")?;
                    }
                    write!(f, "{node_id}")?;
                }
                if let Some(first) = path.first() {
                    write!(f, " -> {first}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Collapse cycles that are rotations of one already reported.
    pub dedupe_cycles: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            dedupe_cycles: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.severity() == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for finding in &self.findings {
            let label = match finding.severity() {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            writeln!(f, "{label}: {finding}")?;
        }
        Ok(())
    }
}

pub fn validate(graph: &DialogueGraph, options: &ValidateOptions) -> ValidationReport {
    let mut findings = Vec::new();
    check_nodes(graph, &mut findings);
    findings.extend(
        find_cycles(graph, options.dedupe_cycles)
            .into_iter()
            .map(|path| Finding::Cycle { path }),
    );
    ValidationReport { findings }
}

/// [`validate`] plus quest transitions checked against the project's quest book.
pub fn validate_project(project: &Project, options: &ValidateOptions) -> ValidationReport {
    let graph = project.dialogue();
    let mut findings = Vec::new();
    check_nodes(graph, &mut findings);

    for node in graph.nodes().values() {
        for (option_index, option) in node.options.iter().enumerate() {
            if let Transition::Quest(quest_id) = &option.transition {
                if !project.quests().contains_quest(quest_id) {
                    findings.push(Finding::DanglingQuestTransition {
                        node_id: node.id().clone(),
                        option_index,
                        quest_id: quest_id.clone(),
                    });
                }
            }
        }
    }

    findings.extend(
        find_cycles(graph, options.dedupe_cycles)
            .into_iter()
            .map(|path| Finding::Cycle { path }),
    );
    ValidationReport { findings }
}

fn check_nodes(graph: &DialogueGraph, findings: &mut Vec<Finding>) {
    for node in graph.nodes().values() {
        if node.text.trim().is_empty() {
            findings.push(Finding::MissingNpcText {
                node_id: node.id().clone(),
            });
        }
        for (option_index, option) in node.options.iter().enumerate() {
            if option.text.trim().is_empty() {
                findings.push(Finding::MissingOptionText {
                    node_id: node.id().clone(),
                    option_index,
                });
            }
            if let Transition::Node(target) = &option.transition {
                if !graph.contains_node(target) {
                    findings.push(Finding::DanglingTransition {
                        node_id: node.id().clone(),
                        option_index,
                        target: target.clone(),
                    });
                }
            }
        }
    }
}

/// Node-to-node edges by graph index, in option order. Dangling targets are dropped.
fn adjacency(graph: &DialogueGraph) -> Vec<Vec<usize>> {
    graph
        .nodes()
        .values()
        .map(|node| {
            node.options
                .iter()
                .filter_map(|option| option.transition.node_id())
                .filter_map(|target| graph.nodes().get_index_of(target))
                .collect()
        })
        .collect()
}

/// Depth-first search from every unvisited node in graph order. Reaching a node that is still
/// on the current path reports the path slice from that node onward.
pub fn find_cycles(graph: &DialogueGraph, dedupe: bool) -> Vec<Vec<NodeId>> {
    let adjacency = adjacency(graph);
    let node_count = adjacency.len();
    let mut visited = vec![false; node_count];
    let mut on_path = vec![false; node_count];
    let mut cycles: Vec<Vec<usize>> = Vec::new();
    let mut seen: HashSet<Vec<usize>> = HashSet::new();

    for root in 0..node_count {
        if visited[root] {
            continue;
        }
        // (node, next neighbor to look at)
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        let mut path: Vec<usize> = vec![root];
        visited[root] = true;
        on_path[root] = true;

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            let Some(&next) = adjacency[node].get(cursor) else {
                stack.pop();
                path.pop();
                on_path[node] = false;
                continue;
            };
            frame.1 += 1;

            if on_path[next] {
                if let Some(start) = path.iter().position(|&n| n == next) {
                    let cycle = path[start..].to_vec();
                    if !dedupe || seen.insert(rotate_to_min(&cycle)) {
                        cycles.push(cycle);
                    }
                }
                continue;
            }
            if visited[next] {
                continue;
            }
            visited[next] = true;
            on_path[next] = true;
            path.push(next);
            stack.push((next, 0));
        }
    }

    cycles
        .into_iter()
        .map(|cycle| {
            cycle
                .into_iter()
                .filter_map(|index| graph.nodes().get_index(index))
                .map(|(node_id, _)| node_id.clone())
                .collect()
        })
        .collect()
}

fn rotate_to_min(cycle: &[usize]) -> Vec<usize> {
    let start = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, index)| **index)
        .map(|(pos, _)| pos)
        .unwrap_or(0);
    cycle[start..].iter().chain(&cycle[..start]).copied().collect()
}
