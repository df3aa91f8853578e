// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor settings read from `palaver.toml`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::model::{NodeId, Position, DEFAULT_NODE_TEXT, DEFAULT_OPTION_TEXT};
use crate::ops::{DialogueOp, Op};
use crate::query::validate::ValidateOptions;
use crate::store::{ProjectStore, WriteDurability, DEFAULT_APP_KEY};

pub const DEFAULT_CONFIG_FILE: &str = "palaver.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid config {path:?}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Snapshot file stem inside `store_dir`.
    pub app_key: String,
    pub store_dir: PathBuf,
    pub durable_writes: bool,
    pub new_node_text: String,
    pub new_option_text: String,
    pub dedupe_cycles: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            app_key: DEFAULT_APP_KEY.to_owned(),
            store_dir: PathBuf::from("."),
            durable_writes: false,
            new_node_text: DEFAULT_NODE_TEXT.to_owned(),
            new_option_text: DEFAULT_OPTION_TEXT.to_owned(),
            dedupe_cycles: true,
        }
    }
}

impl EditorConfig {
    pub fn from_toml_str(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw, path)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// An explicit path must exist; otherwise `palaver.toml` in `cwd` is used when present.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = cwd.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn durability(&self) -> WriteDurability {
        if self.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        }
    }

    pub fn project_store(&self) -> ProjectStore {
        ProjectStore::new(&self.store_dir)
            .with_app_key(&self.app_key)
            .with_durability(self.durability())
    }

    pub fn validate_options(&self) -> ValidateOptions {
        ValidateOptions {
            dedupe_cycles: self.dedupe_cycles,
        }
    }

    /// An `AddNode` op carrying the configured placeholder text.
    pub fn add_node_op(&self, node_id: Option<NodeId>, position: Position) -> Op {
        Op::Dialogue(DialogueOp::AddNode {
            node_id,
            position,
            text: Some(self.new_node_text.clone()),
        })
    }

    pub fn add_option_op(&self, node_id: NodeId, text: Option<String>) -> Op {
        Op::Dialogue(DialogueOp::AddOption {
            node_id,
            text: Some(text.unwrap_or_else(|| self.new_option_text.clone())),
        })
    }
}
