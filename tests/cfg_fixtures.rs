// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use palaver::format::cfg::{
    export_dialogue, export_quests, parse_dialogue, parse_quests, ParseWarningKind,
};
use palaver::model::{
    CommandKind, ConditionKind, NodeId, Project, QuestBook, QuestId, QuestKind, Transition,
};
use palaver::query::flow::connections;
use palaver::query::validate::{validate, validate_project, Finding, ValidateOptions};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"))
}

fn node_id(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

#[test]
fn village_dialogue_parses_and_exports_byte_for_byte() {
    let src = read_fixture("village.cfg");
    let parsed = parse_dialogue(&src);
    assert!(parsed.is_clean(), "{:?}", parsed.warnings);

    let graph = parsed.value;
    let ids: Vec<&str> = graph.nodes().keys().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["default", "Jobs", "Shop"]);

    let start = graph.node(&node_id("default")).expect("default");
    assert_eq!(start.text, "Hey, Viking!\nNot expecting any letters, are you?");
    assert_eq!(start.options[2].color.to_hex(), "#ff9900");

    let jobs = graph.node(&node_id("Jobs")).expect("jobs");
    let farm = &jobs.options[0];
    assert_eq!(
        farm.transition,
        Transition::Quest(QuestId::new("Harvest").expect("quest id"))
    );
    assert_eq!(farm.icon, "Hoe");
    assert_eq!(farm.conditions[0].kind, ConditionKind::HasItem);
    assert_eq!(farm.conditions[0].params.as_slice(), ["Hoe", "1"]);
    assert_eq!(farm.commands[0].kind, CommandKind::RemoveItem);

    let shop = graph.node(&node_id("Shop")).expect("shop");
    assert_eq!(
        shop.options[0].transition,
        Transition::External("OpenTrader".to_owned())
    );

    assert_eq!(export_dialogue(&graph).expect("export"), src);
}

#[test]
fn village_connections_and_validation() {
    let graph = parse_dialogue(&read_fixture("village.cfg")).value;

    let pairs: Vec<(String, String)> = connections(&graph)
        .into_iter()
        .map(|c| (c.from.into_string(), c.to.into_string()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("default".to_owned(), "Jobs".to_owned()),
            ("default".to_owned(), "Shop".to_owned()),
            ("Jobs".to_owned(), "default".to_owned()),
        ]
    );

    let report = validate(&graph, &ValidateOptions::default());
    assert!(!report.has_errors(), "{report}");
    let [Finding::Cycle { path }] = report.findings() else {
        panic!("expected exactly one cycle, got {report}");
    };
    let members: BTreeSet<&str> = path.iter().map(|id| id.as_str()).collect();
    assert_eq!(members, BTreeSet::from(["Jobs", "default"]));

    // Without a quest book the quest transition has nothing to land on.
    let project = Project::new(graph.clone(), QuestBook::new());
    let report = validate_project(&project, &ValidateOptions::default());
    assert!(report
        .errors()
        .any(|f| matches!(f, Finding::DanglingQuestTransition { .. })));

    let quests = parse_quests(&read_fixture("quests.cfg")).value;
    let report = validate_project(&Project::new(graph, quests), &ValidateOptions::default());
    assert!(!report.has_errors(), "{report}");
}

#[test]
fn messy_dialogue_reports_every_skip() {
    let parsed = parse_dialogue(&read_fixture("messy.cfg"));

    let kinds: Vec<(usize, &ParseWarningKind)> = parsed
        .warnings
        .iter()
        .map(|warning| (warning.line_no, &warning.kind))
        .collect();
    assert_eq!(kinds.len(), 7, "{:#?}", parsed.warnings);
    assert!(matches!(kinds[0], (1, ParseWarningKind::OptionBeforeHeader)));
    assert!(matches!(
        kinds[1],
        (4, ParseWarningKind::UnknownSegment { segment }) if segment == "Mood: grumpy"
    ));
    assert!(matches!(kinds[2], (5, ParseWarningKind::UnrecognizedLine)));
    assert!(matches!(kinds[3], (6, ParseWarningKind::InvalidColor { .. })));
    assert!(matches!(
        kinds[4],
        (7, ParseWarningKind::DuplicateHeader { id }) if id == "default"
    ));
    assert!(matches!(kinds[5], (10, ParseWarningKind::InvalidId { .. })));
    assert!(matches!(kinds[6], (12, ParseWarningKind::MissingTextLine)));

    let graph = parsed.value;
    let ids: Vec<&str> = graph.nodes().keys().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["default", "Tail"]);

    let start = graph.node(&node_id("default")).expect("default");
    assert_eq!(start.text, "Second copy wins.");
    assert_eq!(start.options.len(), 1);
    assert_eq!(start.options[0].text, "Only option");

    let report = validate(&graph, &ValidateOptions::default());
    assert_eq!(report.len(), 1, "{report}");
    assert!(matches!(
        report.findings()[0],
        Finding::MissingNpcText { ref node_id } if node_id.as_str() == "Tail"
    ));
}

#[test]
fn quest_fixture_parses_and_exports_byte_for_byte() {
    let src = read_fixture("quests.cfg");
    let parsed = parse_quests(&src);
    assert!(parsed.is_clean(), "{:?}", parsed.warnings);

    let book = parsed.value;
    assert_eq!(book.len(), 2);

    let harvest = book
        .quest(&QuestId::new("Harvest").expect("quest id"))
        .expect("harvest");
    assert!(harvest.autocomplete);
    assert_eq!(harvest.kind, QuestKind::Harvest);
    assert_eq!(harvest.description, "Bring in the barley.\nThen rest.");
    assert_eq!(harvest.targets[1].level, "2");
    assert_eq!(harvest.rewards[1].target, "Hoe");
    assert_eq!(harvest.cooldown, "5");
    assert_eq!(harvest.time_limit, "3600");
    assert_eq!(harvest.requirements.len(), 2);

    let intro = book
        .quest(&QuestId::new("Intro").expect("quest id"))
        .expect("intro");
    assert!(!intro.autocomplete);
    assert_eq!(intro.kind, QuestKind::Talk);
    assert!(intro.targets.is_empty() && intro.rewards.is_empty());

    assert_eq!(export_quests(&book).expect("export"), src);
}

#[test]
fn export_is_idempotent_for_messy_input() {
    let first = export_dialogue(&parse_dialogue(&read_fixture("messy.cfg")).value)
        .expect("first export");
    let second = export_dialogue(&parse_dialogue(&first).value).expect("second export");
    assert_eq!(first, second);
}
