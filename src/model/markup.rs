// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Inline `<color=VALUE>text</color>` markup used in NPC lines and quest descriptions.
//!
//! Tags do not nest. An opening tag without a matching close stays literal text.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub color: Option<String>,
}

impl Span {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            color: None,
        }
    }
}

fn color_tag() -> Option<&'static Regex> {
    static COLOR_TAG: OnceLock<Option<Regex>> = OnceLock::new();
    COLOR_TAG
        .get_or_init(|| Regex::new(r"<color=([^>]+)>([^<]*)</color>").ok())
        .as_ref()
}

pub fn parse_markup(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    let Some(tag) = color_tag() else {
        if !text.is_empty() {
            spans.push(Span::plain(text));
        }
        return spans;
    };
    for caps in tag.captures_iter(text) {
        let (Some(whole), Some(color), Some(inner)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        if whole.start() > cursor {
            spans.push(Span::plain(&text[cursor..whole.start()]));
        }
        spans.push(Span {
            text: inner.as_str().to_owned(),
            color: Some(color.as_str().trim().to_owned()),
        });
        cursor = whole.end();
    }
    if cursor < text.len() {
        spans.push(Span::plain(&text[cursor..]));
    }
    spans
}

pub fn strip_markup(text: &str) -> String {
    match color_tag() {
        Some(tag) => tag.replace_all(text, "$2").into_owned(),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_markup, strip_markup, Span};

    #[test]
    fn splits_colored_runs() {
        let spans = parse_markup("Need <color=#ff6666>more apples!</color> now");
        assert_eq!(
            spans,
            vec![
                Span {
                    text: "Need ".to_owned(),
                    color: None
                },
                Span {
                    text: "more apples!".to_owned(),
                    color: Some("#ff6666".to_owned())
                },
                Span {
                    text: " now".to_owned(),
                    color: None
                },
            ]
        );
    }

    #[test]
    fn unclosed_tag_stays_literal() {
        let text = "Careful <color=red>this never closes";
        let spans = parse_markup(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, text);
        assert_eq!(strip_markup(text), text);
    }

    #[test]
    fn strip_keeps_inner_text() {
        assert_eq!(
            strip_markup("<color=yellow>Gold</color> and <color=#00ff00>grass</color>"),
            "Gold and grass"
        );
        assert!(parse_markup("").is_empty());
    }
}
