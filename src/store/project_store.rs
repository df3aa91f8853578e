// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::format::cfg::{
    export_dialogue, export_quests, parse_dialogue, parse_quests, CfgExportError, Parsed,
};
use crate::model::demo::demo_project;
use crate::model::{DialogueGraph, Project, QuestBook};

pub const DEFAULT_APP_KEY: &str = "valheimDialogueEditor";
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Writes a temp file and renames it into place, without fsync.
    #[default]
    BestEffort,

    /// Also syncs the file contents and (on unix) the parent directory.
    ///
    /// Exact guarantees are platform/filesystem-dependent.
    Durable,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(
        "unsupported snapshot version {version} at {path:?} (expected {expected})",
        expected = SNAPSHOT_VERSION
    )]
    UnsupportedVersion { path: PathBuf, version: u32 },
    #[error("cannot export CFG to {path:?}: {source}")]
    Export {
        path: PathBuf,
        source: CfgExportError,
    },
}

impl StoreError {
    /// True when the error is a missing file at `path`.
    pub fn is_not_found_at(&self, expected: &Path) -> bool {
        matches!(
            self,
            Self::Io { path, source } if source.kind() == io::ErrorKind::NotFound && path == expected
        )
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    project: &'a Project,
}

#[derive(Deserialize)]
struct SnapshotHeader {
    version: u32,
}

#[derive(Deserialize)]
struct Snapshot {
    project: Project,
}

/// Whole-project JSON snapshots kept under one directory.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    root: PathBuf,
    app_key: String,
    durability: WriteDurability,
}

impl ProjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            app_key: DEFAULT_APP_KEY.to_owned(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = app_key.into();
        self
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.app_key))
    }

    pub fn load(&self) -> Result<Project, StoreError> {
        let path = self.snapshot_path();
        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        let header: SnapshotHeader =
            serde_json::from_str(&raw).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?;
        if header.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                path,
                version: header.version,
            });
        }

        let snapshot: Snapshot = serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        let project = snapshot.project;
        debug!(
            path = %path.display(),
            nodes = project.dialogue().len(),
            quests = project.quests().len(),
            rev = project.rev(),
            "project loaded"
        );
        Ok(project)
    }

    pub fn save(&self, project: &Project) -> Result<(), StoreError> {
        let path = self.snapshot_path();
        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            project,
        };
        let mut json = serde_json::to_string_pretty(&snapshot).map_err(|source| {
            StoreError::Json {
                path: path.clone(),
                source,
            }
        })?;
        json.push('\n');

        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;
        write_atomic(&path, json.as_bytes(), self.durability)?;
        debug!(path = %path.display(), rev = project.rev(), "project saved");
        Ok(())
    }

    /// Loads the snapshot, or seeds and saves the demo project when none exists yet.
    pub fn load_or_init(&self) -> Result<Project, StoreError> {
        match self.load() {
            Ok(project) => Ok(project),
            Err(err) if err.is_not_found_at(&self.snapshot_path()) => {
                let project = demo_project();
                self.save(&project)?;
                info!(path = %self.snapshot_path().display(), "initialized new project");
                Ok(project)
            }
            Err(err) => Err(err),
        }
    }

    /// Loads the snapshot, or returns the demo project without writing anything.
    pub fn load_or_demo(&self) -> Result<Project, StoreError> {
        match self.load() {
            Ok(project) => Ok(project),
            Err(err) if err.is_not_found_at(&self.snapshot_path()) => {
                debug!(path = %self.snapshot_path().display(), "no snapshot, using demo project");
                Ok(demo_project())
            }
            Err(err) => Err(err),
        }
    }
}

pub fn read_dialogue_cfg(path: &Path) -> Result<Parsed<DialogueGraph>, StoreError> {
    let raw = read_text(path)?;
    Ok(parse_dialogue(&raw))
}

pub fn read_quest_cfg(path: &Path) -> Result<Parsed<QuestBook>, StoreError> {
    let raw = read_text(path)?;
    Ok(parse_quests(&raw))
}

pub fn write_dialogue_cfg(
    path: &Path,
    graph: &DialogueGraph,
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let text = export_dialogue(graph).map_err(|source| StoreError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, text.as_bytes(), durability)
}

pub fn write_quest_cfg(
    path: &Path,
    book: &QuestBook,
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let text = export_quests(book).map_err(|source| StoreError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, text.as_bytes(), durability)
}

fn read_text(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".palaver.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    if let Err(source) = file.write_all(contents) {
        drop(file);
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: tmp_path,
            source,
        });
    }

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}
