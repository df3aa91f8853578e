// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::RegexBuilder;

use crate::model::{DialogueGraph, DialogueNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Substring,
    Regex,
}

/// Nodes whose id, NPC text or any option text matches `needle`, in graph order.
///
/// A blank needle matches every node.
pub fn node_search<'a>(
    graph: &'a DialogueGraph,
    needle: &str,
    mode: SearchMode,
    case_insensitive: bool,
) -> Result<Vec<&'a DialogueNode>, regex::Error> {
    if needle.trim().is_empty() {
        return Ok(graph.nodes().values().collect());
    }

    let nodes = graph.nodes().values();
    match mode {
        SearchMode::Substring => {
            if case_insensitive {
                let needle_lower = needle.to_lowercase();
                Ok(nodes
                    .filter(|node| node_matches(node, |s| s.to_lowercase().contains(&needle_lower)))
                    .collect())
            } else {
                Ok(nodes
                    .filter(|node| node_matches(node, |s| s.contains(needle)))
                    .collect())
            }
        }
        SearchMode::Regex => {
            let regex = RegexBuilder::new(needle)
                .case_insensitive(case_insensitive)
                .build()?;
            Ok(nodes
                .filter(|node| node_matches(node, |s| regex.is_match(s)))
                .collect())
        }
    }
}

fn node_matches(node: &DialogueNode, is_match: impl Fn(&str) -> bool) -> bool {
    is_match(node.id().as_str())
        || is_match(&node.text)
        || node.options.iter().any(|option| is_match(&option.text))
}

#[cfg(test)]
mod tests {
    use super::{node_search, SearchMode};
    use crate::model::demo::demo_dialogue;

    fn ids(nodes: &[&crate::model::DialogueNode]) -> Vec<String> {
        nodes.iter().map(|node| node.id().to_string()).collect()
    }

    #[test]
    fn substring_matches_id_text_and_options() {
        let graph = demo_dialogue();
        let hits = node_search(&graph, "shop", SearchMode::Substring, true).expect("search");
        assert_eq!(ids(&hits), vec!["Shop"]);

        let hits = node_search(&graph, "VIKING", SearchMode::Substring, true).expect("search");
        assert_eq!(ids(&hits), vec!["default"]);

        let hits = node_search(&graph, "300 coins", SearchMode::Substring, false).expect("search");
        assert_eq!(ids(&hits), vec!["JobOptions"]);
    }

    #[test]
    fn case_sensitive_substring_can_miss() {
        let graph = demo_dialogue();
        let hits = node_search(&graph, "VIKING", SearchMode::Substring, false).expect("search");
        assert!(hits.is_empty());
    }

    #[test]
    fn blank_needle_matches_everything() {
        let graph = demo_dialogue();
        let hits = node_search(&graph, "  ", SearchMode::Substring, true).expect("search");
        assert_eq!(hits.len(), graph.len());
    }

    #[test]
    fn regex_mode_and_errors() {
        let graph = demo_dialogue();
        let hits = node_search(&graph, "^(job|shop)", SearchMode::Regex, true).expect("search");
        assert_eq!(ids(&hits), vec!["JobOptions", "Shop"]);

        let err = node_search(&graph, "(", SearchMode::Regex, true).expect_err("invalid regex");
        assert!(err.to_string().to_lowercase().contains("regex"));
    }
}
