// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The CFG block format for dialogue and quests.
//!
//! Both grammars open a block with a `[id]` header line. Parsing is lenient: lines that do not
//! fit the grammar are skipped, and every skip is reported as a [`ParseWarning`] next to the
//! parsed value. Export is strict and fails with [`CfgExportError`] instead of writing a file
//! that would read back differently.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::model::{ColorError, IdError, NodeId, QuestId};

pub mod dialogue;
pub mod quest;

pub use dialogue::{export_dialogue, parse_dialogue};
pub use quest::{export_quests, parse_quests};

/// A parsed value plus everything the parser had to skip or guess.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<ParseWarning>,
}

impl<T> Parsed<T> {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// 1-based.
    pub line_no: usize,
    pub line: String,
    pub kind: ParseWarningKind,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line_no, self.kind, self.line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarningKind {
    OptionBeforeHeader,
    UnrecognizedLine,
    UnknownSegment { segment: String },
    InvalidId { reason: String },
    DuplicateHeader { id: String },
    MissingTextLine,
    InvalidColor { reason: String },
    MalformedTransition { reason: String },
    EmptyClauseType,
    MalformedReward { segment: String },
    TruncatedQuest { quest_id: String, missing: &'static str },
}

impl fmt::Display for ParseWarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OptionBeforeHeader => f.write_str("option line before any [id] header, skipped"),
            Self::UnrecognizedLine => f.write_str("unrecognized line, skipped"),
            Self::UnknownSegment { segment } => write!(f, "unknown segment {segment:?}, skipped"),
            Self::InvalidId { reason } => write!(f, "invalid id: {reason}, block skipped"),
            Self::DuplicateHeader { id } => {
                write!(f, "duplicate id {id}, later block replaces the earlier one")
            }
            Self::MissingTextLine => f.write_str("header at end of input, text left empty"),
            Self::InvalidColor { reason } => write!(f, "{reason}, color left at default"),
            Self::MalformedTransition { reason } => {
                write!(f, "malformed transition: {reason}, transition left empty")
            }
            Self::EmptyClauseType => f.write_str("condition/command without a type, skipped"),
            Self::MalformedReward { segment } => {
                write!(f, "reward {segment:?} has no '<type>:' prefix, skipped")
            }
            Self::TruncatedQuest { quest_id, missing } => {
                write!(f, "quest {quest_id} ends before its {missing} line")
            }
        }
    }
}

/// Values that cannot be written without changing how the file reads back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CfgExportError {
    #[error("node {node_id}, option {option_index}: {field} {value:?} contains reserved {ch:?}")]
    OptionField {
        node_id: NodeId,
        option_index: usize,
        field: &'static str,
        value: String,
        ch: char,
    },
    #[error("node {node_id}, option {option_index}: {field} {value:?} would not read back unchanged")]
    AmbiguousOptionValue {
        node_id: NodeId,
        option_index: usize,
        field: &'static str,
        value: String,
    },
    #[error("node {node_id}: NPC text {value:?} would not read back unchanged")]
    AmbiguousNodeText { node_id: NodeId, value: String },
    #[error("quest {quest_id}: {field} {value:?} contains reserved {ch:?}")]
    QuestField {
        quest_id: QuestId,
        field: &'static str,
        value: String,
        ch: char,
    },
    #[error("quest {quest_id}: {field} {value:?} would not read back unchanged")]
    AmbiguousQuestLine {
        quest_id: QuestId,
        field: &'static str,
        value: String,
    },
}

pub(crate) fn header_id(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() {
        return None;
    }
    Some(inner)
}

pub(crate) fn id_warning(error: &IdError) -> ParseWarningKind {
    ParseWarningKind::InvalidId {
        reason: error.to_string(),
    }
}

pub(crate) fn color_warning(error: &ColorError) -> ParseWarningKind {
    ParseWarningKind::InvalidColor {
        reason: error.to_string(),
    }
}

/// Folds line breaks into the two-character `\n` sequence; backslashes are doubled.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '\n', '\r']) {
        return Cow::Borrowed(text);
    }
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(normalized.len() + 8);
    for ch in normalized.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Reverses [`escape_text`]. Unknown escapes are kept as written.
pub fn unescape_text(text: &str) -> Cow<'_, str> {
    if !text.contains('\\') {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('n') => {
                out.push('\n');
                chars.next();
            }
            Some('\\') => {
                out.push('\\');
                chars.next();
            }
            _ => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

pub(crate) fn find_reserved(value: &str, reserved: &[char]) -> Option<char> {
    value.chars().find(|ch| reserved.contains(ch))
}

/// Lines and segments are trimmed on import, so surrounding whitespace cannot survive a round trip.
pub(crate) fn is_padded(value: &str) -> bool {
    value.trim() != value
}

/// Splits `a, b, c` into trimmed fields, keeping empty ones.
pub(crate) fn split_fields(raw: &str) -> Vec<&str> {
    raw.split(',').map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::{escape_text, header_id, is_padded, unescape_text};

    #[test]
    fn escape_folds_line_breaks() {
        assert_eq!(escape_text("plain"), "plain");
        assert_eq!(escape_text("a\nb"), "a\\nb");
        assert_eq!(escape_text("a\r\nb\rc"), "a\\nb\\nc");
        assert_eq!(escape_text(r"C:\n"), r"C:\\n");
    }

    #[test]
    fn unescape_reverses_escape() {
        for text in ["two\nlines", r"back\slash", "\\n literal", "trail\\"] {
            assert_eq!(unescape_text(&escape_text(text)), text);
        }
        assert_eq!(unescape_text(r"keep \t as is"), r"keep \t as is");
    }

    #[test]
    fn padding_is_detected_after_escaping() {
        assert!(is_padded(" lead"));
        assert!(is_padded("trail\t"));
        assert!(!is_padded(""));
        assert!(!is_padded(&escape_text("ends with a break\n")));
    }

    #[test]
    fn header_requires_brackets_and_content() {
        assert_eq!(header_id("[default]"), Some("default"));
        assert_eq!(header_id("[[nested]]"), Some("[nested]"));
        assert_eq!(header_id("[]"), None);
        assert_eq!(header_id("default"), None);
    }
}
