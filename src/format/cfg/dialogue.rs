// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dialogue CFG blocks:
//!
//! ```text
//! [default]
//! Hello!
//! Text: Bye | Transition: shop | Condition: HasItem, Hoe, 1 | Color: 255, 153, 0
//! ```

use std::fmt::Write as _;

use tracing::{debug, warn};

use super::{
    color_warning, escape_text, find_reserved, header_id, id_warning, is_padded, split_fields,
    unescape_text, CfgExportError, ParseWarning, ParseWarningKind, Parsed,
};
use crate::model::{
    Color, Command, CommandKind, Condition, ConditionKind, DialogueGraph, DialogueNode,
    DialogueOption, NodeId, Params, Position, Transition,
};

const TEXT: &str = "Text:";
const TRANSITION: &str = "Transition:";
const COMMAND: &str = "Command:";
const CONDITION: &str = "Condition:";
const ICON: &str = "Icon:";
const COLOR: &str = "Color:";

const GRID_COLUMNS: usize = 4;
const GRID_ORIGIN: (f64, f64) = (100.0, 100.0);
const GRID_STEP: (f64, f64) = (300.0, 200.0);

/// Deterministic canvas slot for the `index`-th imported node.
pub fn grid_position(index: usize) -> Position {
    let column = (index % GRID_COLUMNS) as f64;
    let row = (index / GRID_COLUMNS) as f64;
    Position::new(
        GRID_ORIGIN.0 + column * GRID_STEP.0,
        GRID_ORIGIN.1 + row * GRID_STEP.1,
    )
}

pub fn export_dialogue(graph: &DialogueGraph) -> Result<String, CfgExportError> {
    let mut out = String::new();
    for node in graph.nodes().values() {
        let text = escape_text(&node.text);
        if is_padded(&text) {
            return Err(CfgExportError::AmbiguousNodeText {
                node_id: node.id().clone(),
                value: node.text.clone(),
            });
        }
        out.push('[');
        out.push_str(node.id().as_str());
        out.push_str("]\n");
        out.push_str(&text);
        out.push('\n');
        for (option_index, option) in node.options.iter().enumerate() {
            write_option_line(&mut out, node, option_index, option)?;
        }
        out.push('\n');
    }
    Ok(out)
}

fn write_option_line(
    out: &mut String,
    node: &DialogueNode,
    option_index: usize,
    option: &DialogueOption,
) -> Result<(), CfgExportError> {
    let ambiguous = |field: &'static str, value: &str| CfgExportError::AmbiguousOptionValue {
        node_id: node.id().clone(),
        option_index,
        field,
        value: value.to_owned(),
    };
    let check = |field: &'static str, value: &str, reserved: &[char]| {
        if let Some(ch) = find_reserved(value, reserved) {
            return Err(CfgExportError::OptionField {
                node_id: node.id().clone(),
                option_index,
                field,
                value: value.to_owned(),
                ch,
            });
        }
        if is_padded(value) {
            return Err(ambiguous(field, value));
        }
        Ok(())
    };
    let check_kind = |field: &'static str, kind: &str| {
        check(field, kind, &['|', ',', '\n', '\r'])?;
        if kind.is_empty() {
            return Err(ambiguous(field, kind));
        }
        Ok(())
    };

    let text = escape_text(&option.text);
    check("text", &text, &['|'])?;
    let _ = write!(out, "{TEXT} {text}");

    if !option.transition.is_none() {
        let wire = option.transition.to_wire();
        check("transition", &wire, &['|', '\n', '\r'])?;
        // A node id spelled like `quest:x` would come back as a quest transition.
        if Transition::from_wire(&wire).ok().as_ref() != Some(&option.transition) {
            return Err(ambiguous("transition", &wire));
        }
        let _ = write!(out, " | {TRANSITION} {wire}");
    }
    for command in &option.commands {
        check_kind("command type", command.kind.as_str())?;
        let _ = write!(out, " | {COMMAND} {}", command.kind);
        write_params(out, &command.params, |value| {
            check("command parameter", value, &['|', ',', '\n', '\r'])
        })?;
    }
    for condition in &option.conditions {
        check_kind("condition type", condition.kind.as_str())?;
        let _ = write!(out, " | {CONDITION} {}", condition.kind);
        write_params(out, &condition.params, |value| {
            check("condition parameter", value, &['|', ',', '\n', '\r'])
        })?;
    }
    if !option.icon.is_empty() {
        check("icon", &option.icon, &['|', '\n', '\r'])?;
        let _ = write!(out, " | {ICON} {}", option.icon);
    }
    if !option.color.is_default() {
        let _ = write!(out, " | {COLOR} {}", option.color.to_triple());
    }
    out.push('\n');
    Ok(())
}

fn write_params(
    out: &mut String,
    params: &Params,
    check: impl Fn(&str) -> Result<(), CfgExportError>,
) -> Result<(), CfgExportError> {
    for param in params {
        check(param)?;
        out.push_str(", ");
        out.push_str(param);
    }
    Ok(())
}

/// Parses dialogue CFG text into a fresh graph.
///
/// A `[id]` line opens a node and the line right after it is taken verbatim as the NPC text.
/// `Text:` lines add options to the open node. Blank lines separate blocks; anything else is
/// skipped with a warning.
pub fn parse_dialogue(input: &str) -> Parsed<DialogueGraph> {
    let mut graph = DialogueGraph::new();
    let mut warnings = Vec::new();
    let mut current: Option<NodeId> = None;

    let mut lines = input.lines().enumerate();
    while let Some((index, raw)) = lines.next() {
        let line_no = index + 1;
        let line = raw.trim();
        let mut warn_line = |kind: ParseWarningKind| {
            warn!(line_no, %kind, "dialogue cfg: skipped input");
            warnings.push(ParseWarning {
                line_no,
                line: line.to_owned(),
                kind,
            });
        };

        if let Some(raw_id) = header_id(line) {
            let node_id = match NodeId::new(raw_id) {
                Ok(node_id) => node_id,
                Err(err) => {
                    warn_line(id_warning(&err));
                    current = None;
                    // The text line still belongs to the rejected block.
                    lines.next();
                    continue;
                }
            };

            let text = match lines.next() {
                Some((_, text_line)) => unescape_text(text_line.trim()).into_owned(),
                None => {
                    warn_line(ParseWarningKind::MissingTextLine);
                    String::new()
                }
            };

            if graph.contains_node(&node_id) {
                warn_line(ParseWarningKind::DuplicateHeader {
                    id: node_id.to_string(),
                });
            }
            let slot = graph
                .nodes()
                .get_index_of(&node_id)
                .unwrap_or_else(|| graph.len());
            graph.insert_node(DialogueNode::new(node_id.clone(), text, grid_position(slot)));
            current = Some(node_id);
            continue;
        }

        if line.starts_with(TEXT) {
            let Some(node_id) = current.as_ref() else {
                warn_line(ParseWarningKind::OptionBeforeHeader);
                continue;
            };
            for kind in parse_option_line(&mut graph, node_id, line) {
                warn_line(kind);
            }
            continue;
        }

        if !line.is_empty() {
            warn_line(ParseWarningKind::UnrecognizedLine);
        }
    }

    debug!(
        nodes = graph.len(),
        warnings = warnings.len(),
        "dialogue cfg parsed"
    );
    Parsed {
        value: graph,
        warnings,
    }
}

fn parse_option_line(
    graph: &mut DialogueGraph,
    node_id: &NodeId,
    line: &str,
) -> Vec<ParseWarningKind> {
    let mut warnings = Vec::new();
    let mut segments = line.split('|').map(str::trim);
    let text = segments
        .next()
        .and_then(|first| first.strip_prefix(TEXT))
        .map(|text| unescape_text(text.trim()).into_owned())
        .unwrap_or_default();

    let Ok(option) = graph.add_option(node_id, text) else {
        return warnings;
    };

    for segment in segments {
        if segment.is_empty() {
            continue;
        }
        if let Some(raw) = segment.strip_prefix(TRANSITION) {
            match Transition::from_wire(raw) {
                Ok(transition) => option.transition = transition,
                Err(err) => warnings.push(ParseWarningKind::MalformedTransition {
                    reason: err.to_string(),
                }),
            }
        } else if let Some(raw) = segment.strip_prefix(COMMAND) {
            match parse_clause(raw) {
                Some((kind, params)) => option.commands.push(Command {
                    kind: CommandKind::parse(kind),
                    params,
                }),
                None => warnings.push(ParseWarningKind::EmptyClauseType),
            }
        } else if let Some(raw) = segment.strip_prefix(CONDITION) {
            match parse_clause(raw) {
                Some((kind, params)) => option.conditions.push(Condition {
                    kind: ConditionKind::parse(kind),
                    params,
                }),
                None => warnings.push(ParseWarningKind::EmptyClauseType),
            }
        } else if let Some(raw) = segment.strip_prefix(ICON) {
            option.icon = raw.trim().to_owned();
        } else if let Some(raw) = segment.strip_prefix(COLOR) {
            match Color::parse_lenient(raw.trim()) {
                Ok(color) => option.color = color,
                Err(err) => warnings.push(color_warning(&err)),
            }
        } else {
            warnings.push(ParseWarningKind::UnknownSegment {
                segment: segment.to_owned(),
            });
        }
    }
    warnings
}

/// `HasItem, Hoe, 1` into the type name and its positional params.
fn parse_clause(raw: &str) -> Option<(&str, Params)> {
    let fields = split_fields(raw);
    let (kind, params) = fields.split_first()?;
    if kind.is_empty() {
        return None;
    }
    Some((kind, params.iter().map(|p| (*p).to_owned()).collect()))
}
