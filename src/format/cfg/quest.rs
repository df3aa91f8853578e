// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Quest CFG blocks: a header followed by seven positional lines.
//!
//! ```text
//! [MyTestQuest1=autocomplete]
//! Kill
//! Shopping list
//! Clear the road.
//! Wolf, 10 | Skeleton, 5
//! Item: SwordIron, 1, 3 | Item: Coins, 100
//! 10, 1800
//! QuestFinished: Intro
//! ```

use tracing::{debug, warn};

use super::{
    escape_text, find_reserved, header_id, id_warning, is_padded, split_fields, unescape_text,
    CfgExportError, ParseWarning, ParseWarningKind, Parsed,
};
use crate::model::{
    Condition, ConditionKind, Quest, QuestBook, QuestId, QuestKind, QuestReward, QuestTarget,
    RewardKind,
};

const NONE: &str = "None";
const AUTOCOMPLETE_SUFFIX: &str = "=autocomplete";
const DEFAULT_AMOUNT: &str = "1";

const FIELD_LINES: [&str; 7] = [
    "type",
    "name",
    "description",
    "targets",
    "rewards",
    "time",
    "requirements",
];

pub fn export_quests(book: &QuestBook) -> Result<String, CfgExportError> {
    let mut out = String::new();
    for quest in book.quests().values() {
        if quest.id().as_str().ends_with(AUTOCOMPLETE_SUFFIX) {
            return Err(CfgExportError::AmbiguousQuestLine {
                quest_id: quest.id().clone(),
                field: "id",
                value: quest.id().to_string(),
            });
        }
        out.push('[');
        out.push_str(quest.id().as_str());
        if quest.autocomplete {
            out.push_str(AUTOCOMPLETE_SUFFIX);
        }
        out.push_str("]\n");

        for line in quest_lines(quest)? {
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');
    }
    Ok(out)
}

fn quest_lines(quest: &Quest) -> Result<[String; 7], CfgExportError> {
    let field_error = |field: &'static str, value: &str, ch: char| CfgExportError::QuestField {
        quest_id: quest.id().clone(),
        field,
        value: value.to_owned(),
        ch,
    };
    let ambiguous = |field: &'static str, value: &str| CfgExportError::AmbiguousQuestLine {
        quest_id: quest.id().clone(),
        field,
        value: value.to_owned(),
    };
    let check = |field: &'static str, value: &str, reserved: &[char]| {
        if let Some(ch) = find_reserved(value, reserved) {
            return Err(field_error(field, value, ch));
        }
        if is_padded(value) {
            return Err(ambiguous(field, value));
        }
        Ok(())
    };
    let positional = |field: &'static str, value: String| {
        if is_padded(&value) || header_id(&value).is_some() {
            return Err(ambiguous(field, &value));
        }
        Ok(value)
    };
    const LIST: &[char] = &['|', ',', '\n', '\r'];

    check("type", quest.kind.as_str(), &['\n', '\r'])?;
    let kind = positional("type", quest.kind.as_str().to_owned())?;
    let name = positional("name", escape_text(&quest.name).into_owned())?;
    let description = positional("description", escape_text(&quest.description).into_owned())?;

    let mut targets = Vec::with_capacity(quest.targets.len());
    for target in &quest.targets {
        check("target prefab", &target.prefab, LIST)?;
        check("target amount", &target.amount, LIST)?;
        check("target level", &target.level, LIST)?;
        targets.push(join_fields(&[&target.prefab, &target.amount, &target.level]));
    }

    let mut rewards = Vec::with_capacity(quest.rewards.len());
    for reward in &quest.rewards {
        check("reward type", reward.kind.as_str(), &['|', ':', ',', '\n', '\r'])?;
        check("reward target", &reward.target, LIST)?;
        check("reward amount", &reward.amount, LIST)?;
        check("reward level", &reward.level, LIST)?;
        rewards.push(format!(
            "{}: {}",
            reward.kind,
            join_fields(&[&reward.target, &reward.amount, &reward.level])
        ));
    }

    check("cooldown", &quest.cooldown, LIST)?;
    check("time limit", &quest.time_limit, LIST)?;
    let time = if quest.cooldown.is_empty() && quest.time_limit.is_empty() {
        NONE.to_owned()
    } else {
        let joined = format!("{}, {}", quest.cooldown, quest.time_limit);
        positional("time", joined.trim_end().to_owned())?
    };

    let mut requirements = Vec::with_capacity(quest.requirements.len());
    for requirement in &quest.requirements {
        check("requirement type", requirement.kind.as_str(), &['|', ':', ',', '\n', '\r'])?;
        if requirement.kind.as_str().is_empty() {
            return Err(ambiguous("requirement type", ""));
        }
        for param in &requirement.params {
            check("requirement parameter", param, LIST)?;
        }
        if requirement.params.is_empty() {
            requirements.push(requirement.kind.as_str().to_owned());
        } else {
            requirements.push(format!("{}: {}", requirement.kind, requirement.params.join(", ")));
        }
    }

    let targets = list_line("targets", targets, quest)?;
    let rewards = list_line("rewards", rewards, quest)?;
    let requirements = list_line("requirements", requirements, quest)?;

    Ok([kind, name, description, targets, rewards, time, requirements])
}

fn list_line(
    field: &'static str,
    items: Vec<String>,
    quest: &Quest,
) -> Result<String, CfgExportError> {
    if items.is_empty() {
        return Ok(NONE.to_owned());
    }
    let line = items.join(" | ");
    if line == NONE || header_id(&line).is_some() {
        return Err(CfgExportError::AmbiguousQuestLine {
            quest_id: quest.id().clone(),
            field,
            value: line,
        });
    }
    Ok(line)
}

/// `a, b, c`, leaving off an empty trailing level so the common case reads `Wolf, 10`.
fn join_fields(fields: &[&str; 3]) -> String {
    if fields[2].is_empty() {
        format!("{}, {}", fields[0], fields[1])
    } else {
        fields.join(", ")
    }
}

/// Parses quest CFG text into a fresh quest book.
///
/// After a header the next seven lines are read positionally. A line that is itself a header
/// ends the block early and starts the next one.
pub fn parse_quests(input: &str) -> Parsed<QuestBook> {
    let mut book = QuestBook::new();
    let mut warnings = Vec::new();
    let lines: Vec<&str> = input.lines().collect();

    let mut index = 0;
    while index < lines.len() {
        let line_no = index + 1;
        let line = lines[index].trim();
        index += 1;

        let Some(raw_id) = header_id(line) else {
            if !line.is_empty() {
                push_warning(&mut warnings, line_no, line, ParseWarningKind::UnrecognizedLine);
            }
            continue;
        };

        let (raw_id, autocomplete) = match raw_id.strip_suffix(AUTOCOMPLETE_SUFFIX) {
            Some(stripped) => (stripped, true),
            None => (raw_id, false),
        };
        let quest_id = match QuestId::new(raw_id) {
            Ok(quest_id) => quest_id,
            Err(err) => {
                push_warning(&mut warnings, line_no, line, id_warning(&err));
                continue;
            }
        };

        let mut quest = Quest::blank(quest_id.clone());
        quest.autocomplete = autocomplete;

        for (field_index, field_name) in FIELD_LINES.into_iter().enumerate() {
            let Some(value) = lines
                .get(index)
                .map(|next| next.trim())
                .filter(|next| header_id(next).is_none())
            else {
                push_warning(
                    &mut warnings,
                    line_no,
                    line,
                    ParseWarningKind::TruncatedQuest {
                        quest_id: quest_id.to_string(),
                        missing: field_name,
                    },
                );
                break;
            };
            let value_line_no = index + 1;
            index += 1;

            match field_index {
                0 => quest.kind = QuestKind::parse(value),
                1 => quest.name = unescape_text(value).into_owned(),
                2 => quest.description = unescape_text(value).into_owned(),
                3 => quest.targets = parse_targets(value),
                4 => {
                    let (rewards, skipped) = parse_rewards(value);
                    quest.rewards = rewards;
                    for segment in skipped {
                        push_warning(
                            &mut warnings,
                            value_line_no,
                            value,
                            ParseWarningKind::MalformedReward { segment },
                        );
                    }
                }
                5 => {
                    let (cooldown, time_limit) = parse_time(value);
                    quest.cooldown = cooldown;
                    quest.time_limit = time_limit;
                }
                _ => {
                    let (requirements, empty_types) = parse_requirements(value);
                    quest.requirements = requirements;
                    for _ in 0..empty_types {
                        push_warning(
                            &mut warnings,
                            value_line_no,
                            value,
                            ParseWarningKind::EmptyClauseType,
                        );
                    }
                }
            }
        }

        if book.insert_quest(quest).is_some() {
            push_warning(
                &mut warnings,
                line_no,
                line,
                ParseWarningKind::DuplicateHeader {
                    id: quest_id.to_string(),
                },
            );
        }
    }

    debug!(
        quests = book.len(),
        warnings = warnings.len(),
        "quest cfg parsed"
    );
    Parsed {
        value: book,
        warnings,
    }
}

fn push_warning(
    warnings: &mut Vec<ParseWarning>,
    line_no: usize,
    line: &str,
    kind: ParseWarningKind,
) {
    warn!(line_no, %kind, "quest cfg: skipped input");
    warnings.push(ParseWarning {
        line_no,
        line: line.to_owned(),
        kind,
    });
}

fn is_none_line(value: &str) -> bool {
    value.is_empty() || value == NONE
}

fn segments(value: &str) -> impl Iterator<Item = &str> {
    value.split('|').map(str::trim).filter(|s| !s.is_empty())
}

fn field(fields: &[&str], index: usize, missing: &str) -> String {
    fields.get(index).copied().unwrap_or(missing).to_owned()
}

fn parse_targets(value: &str) -> Vec<QuestTarget> {
    if is_none_line(value) {
        return Vec::new();
    }
    segments(value)
        .map(|segment| {
            let fields = split_fields(segment);
            QuestTarget {
                prefab: field(&fields, 0, ""),
                amount: field(&fields, 1, DEFAULT_AMOUNT),
                level: field(&fields, 2, ""),
            }
        })
        .collect()
}

fn parse_rewards(value: &str) -> (Vec<QuestReward>, Vec<String>) {
    let mut rewards = Vec::new();
    let mut skipped = Vec::new();
    if is_none_line(value) {
        return (rewards, skipped);
    }
    for segment in segments(value) {
        let Some((kind, params)) = segment.split_once(':') else {
            skipped.push(segment.to_owned());
            continue;
        };
        let fields = split_fields(params);
        rewards.push(QuestReward {
            kind: RewardKind::parse(kind.trim()),
            target: field(&fields, 0, ""),
            amount: field(&fields, 1, DEFAULT_AMOUNT),
            level: field(&fields, 2, ""),
        });
    }
    (rewards, skipped)
}

fn parse_time(value: &str) -> (String, String) {
    if is_none_line(value) {
        return (String::new(), String::new());
    }
    let fields = split_fields(value);
    (field(&fields, 0, ""), field(&fields, 1, ""))
}

/// `type: p1, p2 | ...`. A segment without `:` is a bare type (or legacy free text).
fn parse_requirements(value: &str) -> (Vec<Condition>, usize) {
    let mut requirements = Vec::new();
    let mut empty_types = 0;
    if is_none_line(value) {
        return (requirements, empty_types);
    }
    for segment in segments(value) {
        let (kind, params) = match segment.split_once(':') {
            Some((kind, params)) => (kind.trim(), split_fields(params)),
            None => (segment, Vec::new()),
        };
        if kind.is_empty() {
            empty_types += 1;
            continue;
        }
        requirements.push(Condition::new(ConditionKind::parse(kind), params));
    }
    (requirements, empty_types)
}
