// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Palaver CLI entrypoint.
//!
//! Commands work on the project snapshot in the configured store directory unless a CFG file is
//! given explicitly.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use palaver::config::EditorConfig;
use palaver::format::cfg::{
    export_dialogue, export_quests, parse_dialogue, parse_quests, ParseWarning,
};
use palaver::model::demo::{demo_dialogue, demo_project, demo_quests};
use palaver::model::{strip_markup, DialogueGraph, NodeId, Position, Project};
use palaver::ops::{apply_ops, ObjectRef};
use palaver::query::preview::{Choice, Preview};
use palaver::query::search::{node_search, SearchMode};
use palaver::query::validate::{validate, validate_project};
use palaver::store::{
    read_dialogue_cfg, read_quest_cfg, write_dialogue_cfg, write_quest_cfg, WriteDurability,
};

#[derive(Debug, Parser)]
#[command(name = "palaver", version, about = "Dialogue tree and side-quest authoring tool")]
struct Cli {
    /// Settings file (defaults to ./palaver.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum CfgKind {
    #[default]
    Dialogue,
    Quests,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate CFG files, or the stored project when no file is given.
    Check {
        #[arg(long)]
        dialogue: Option<PathBuf>,
        #[arg(long)]
        quests: Option<PathBuf>,
    },
    /// Re-export a CFG file in canonical form.
    Fmt {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t)]
        kind: CfgKind,
        /// Overwrite the file instead of printing.
        #[arg(long)]
        write: bool,
    },
    /// List nodes whose id, NPC text or option text matches.
    Search {
        needle: String,
        #[arg(long)]
        regex: bool,
        #[arg(long)]
        case_sensitive: bool,
        #[arg(long)]
        dialogue: Option<PathBuf>,
    },
    /// Walk a conversation by picking options (1-based) in order.
    Preview {
        #[arg(value_name = "CHOICE")]
        choices: Vec<usize>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        dialogue: Option<PathBuf>,
    },
    /// Replace the stored dialogue and/or quests with CFG files.
    Import {
        #[arg(long)]
        dialogue: Option<PathBuf>,
        #[arg(long)]
        quests: Option<PathBuf>,
    },
    /// Write the stored dialogue and/or quests as CFG files.
    Export {
        #[arg(long)]
        dialogue: Option<PathBuf>,
        #[arg(long)]
        quests: Option<PathBuf>,
    },
    /// Add a node to the stored dialogue.
    AddNode {
        #[arg(long)]
        id: Option<String>,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        y: f64,
    },
    /// Append an option to a stored node.
    AddOption {
        node: String,
        #[arg(long)]
        text: Option<String>,
    },
    /// Print the sample content as CFG, or reset the store to it.
    Demo {
        #[arg(long, value_enum, default_value_t)]
        kind: CfgKind,
        #[arg(long)]
        reset: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("palaver={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let config = EditorConfig::discover(cli.config.as_deref(), &cwd)?;
    run(cli.command, &config)
}

fn run(command: Command, config: &EditorConfig) -> anyhow::Result<ExitCode> {
    match command {
        Command::Check { dialogue, quests } => check(config, dialogue, quests),
        Command::Fmt { file, kind, write } => {
            if write {
                fmt_in_place(&file, kind, config.durability())?;
                info!(path = %file.display(), "formatted");
            } else {
                print!("{}", fmt_cfg(&file, kind)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Search {
            needle,
            regex,
            case_sensitive,
            dialogue,
        } => {
            let graph = dialogue_source(config, dialogue.as_deref())?;
            let mode = if regex {
                SearchMode::Regex
            } else {
                SearchMode::Substring
            };
            let hits = node_search(&graph, &needle, mode, !case_sensitive)?;
            for node in &hits {
                println!("{}\t{}", node.id(), first_line(&strip_markup(&node.text)));
            }
            Ok(if hits.is_empty() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Preview {
            choices,
            start,
            dialogue,
        } => {
            let graph = dialogue_source(config, dialogue.as_deref())?;
            print!("{}", preview_transcript(&graph, start.as_deref(), &choices)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Import { dialogue, quests } => {
            if dialogue.is_none() && quests.is_none() {
                bail!("nothing to import: pass --dialogue and/or --quests");
            }
            let store = config.project_store();
            let mut project = store.load_or_init()?;

            // Both files are read before the project changes.
            let graph = dialogue.as_deref().map(read_dialogue_cfg).transpose()?;
            let book = quests.as_deref().map(read_quest_cfg).transpose()?;
            if let Some(parsed) = graph {
                report_warnings(&parsed.warnings);
                info!(nodes = parsed.value.len(), "dialogue imported");
                project.replace_dialogue(parsed.value);
            }
            if let Some(parsed) = book {
                report_warnings(&parsed.warnings);
                info!(quests = parsed.value.len(), "quests imported");
                project.replace_quests(parsed.value);
            }
            store.save(&project)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Export { dialogue, quests } => {
            if dialogue.is_none() && quests.is_none() {
                bail!("nothing to export: pass --dialogue and/or --quests");
            }
            let project = config.project_store().load_or_demo()?;
            if let Some(path) = dialogue {
                write_dialogue_cfg(&path, project.dialogue(), config.durability())?;
                info!(path = %path.display(), "dialogue exported");
            }
            if let Some(path) = quests {
                write_quest_cfg(&path, project.quests(), config.durability())?;
                info!(path = %path.display(), "quests exported");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::AddNode { id, x, y } => {
            let node_id = id.map(NodeId::new).transpose()?;
            let op = config.add_node_op(node_id, Position::new(x, y));
            let added = edit_stored(config, op)?;
            println!("{added}");
            Ok(ExitCode::SUCCESS)
        }
        Command::AddOption { node, text } => {
            let op = config.add_option_op(NodeId::new(node)?, text);
            let added = edit_stored(config, op)?;
            println!("{added}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Demo { kind, reset } => {
            if reset {
                let store = config.project_store();
                store.save(&demo_project())?;
                info!(path = %store.snapshot_path().display(), "store reset to demo project");
                return Ok(ExitCode::SUCCESS);
            }
            let text = match kind {
                CfgKind::Dialogue => export_dialogue(&demo_dialogue())?,
                CfgKind::Quests => export_quests(&demo_quests())?,
            };
            print!("{text}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check(
    config: &EditorConfig,
    dialogue: Option<PathBuf>,
    quests: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let options = config.validate_options();
    let report = match (dialogue, quests) {
        (None, None) => {
            let project = config.project_store().load_or_demo()?;
            validate_project(&project, &options)
        }
        (Some(dialogue), None) => {
            let parsed = read_dialogue_cfg(&dialogue)?;
            report_warnings(&parsed.warnings);
            validate(&parsed.value, &options)
        }
        (dialogue, Some(quests)) => {
            let book = read_quest_cfg(&quests)?;
            report_warnings(&book.warnings);
            let graph = match dialogue {
                Some(path) => {
                    let parsed = read_dialogue_cfg(&path)?;
                    report_warnings(&parsed.warnings);
                    parsed.value
                }
                None => config.project_store().load_or_demo()?.dialogue().clone(),
            };
            validate_project(&Project::new(graph, book.value), &options)
        }
    };

    print!("{report}");
    if report.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        if report.is_empty() {
            println!("ok");
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn fmt_cfg(path: &Path, kind: CfgKind) -> anyhow::Result<String> {
    let raw = fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let text = match kind {
        CfgKind::Dialogue => {
            let parsed = parse_dialogue(&raw);
            report_warnings(&parsed.warnings);
            export_dialogue(&parsed.value)?
        }
        CfgKind::Quests => {
            let parsed = parse_quests(&raw);
            report_warnings(&parsed.warnings);
            export_quests(&parsed.value)?
        }
    };
    Ok(text)
}

/// Rewrites `path` in canonical form through the atomic CFG writers.
fn fmt_in_place(path: &Path, kind: CfgKind, durability: WriteDurability) -> anyhow::Result<()> {
    match kind {
        CfgKind::Dialogue => {
            let parsed = read_dialogue_cfg(path)?;
            report_warnings(&parsed.warnings);
            write_dialogue_cfg(path, &parsed.value, durability)?;
        }
        CfgKind::Quests => {
            let parsed = read_quest_cfg(path)?;
            report_warnings(&parsed.warnings);
            write_quest_cfg(path, &parsed.value, durability)?;
        }
    }
    Ok(())
}

fn dialogue_source(config: &EditorConfig, path: Option<&Path>) -> anyhow::Result<DialogueGraph> {
    match path {
        Some(path) => {
            let parsed = read_dialogue_cfg(path)?;
            report_warnings(&parsed.warnings);
            Ok(parsed.value)
        }
        None => Ok(config.project_store().load_or_demo()?.dialogue().clone()),
    }
}

/// Applies one op to the stored project and returns the id it added.
fn edit_stored(config: &EditorConfig, op: palaver::ops::Op) -> anyhow::Result<String> {
    let store = config.project_store();
    let mut project = store.load_or_init()?;
    let base_rev = project.rev();
    let result = apply_ops(&mut project, base_rev, &[op])?;
    store.save(&project)?;

    let added = result
        .delta
        .added
        .into_iter()
        .map(|object_ref| match object_ref {
            ObjectRef::Node { node_id } => node_id.into_string(),
            ObjectRef::DialogueOption { option_id, .. } => option_id.into_string(),
            ObjectRef::Quest { quest_id } => quest_id.into_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    Ok(added)
}

fn preview_transcript(
    graph: &DialogueGraph,
    start: Option<&str>,
    choices: &[usize],
) -> anyhow::Result<String> {
    let mut preview = match start {
        Some(start) => Preview::starting_at(graph, &NodeId::new(start)?)?,
        None => Preview::new(graph)?,
    };

    let mut out = String::new();
    if let Some(node) = preview.current() {
        write_node(&mut out, node);
    }
    for &choice in choices {
        let Some(index) = choice.checked_sub(1) else {
            bail!("choices are 1-based");
        };
        match preview.choose(index)? {
            Choice::Moved(node) => {
                let _ = writeln!(out, "> {choice}");
                write_node(&mut out, node);
            }
            Choice::Ended(transition) => {
                let _ = writeln!(out, "> {choice}");
                if transition.is_none() {
                    let _ = writeln!(out, "(conversation ends)");
                } else {
                    let _ = writeln!(out, "(conversation ends: {})", transition.to_wire());
                }
            }
        }
    }
    Ok(out)
}

fn write_node(out: &mut String, node: &palaver::model::DialogueNode) {
    let _ = writeln!(out, "[{}]", node.id());
    for line in strip_markup(&node.text).lines() {
        let _ = writeln!(out, "  {line}");
    }
    for (index, option) in node.options.iter().enumerate() {
        let text = strip_markup(&option.text);
        let _ = writeln!(out, "  {}. {}", index + 1, first_line(&text));
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

fn report_warnings(warnings: &[ParseWarning]) {
    for warning in warnings {
        warn!("{warning}");
    }
}
