// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence on disk.
//!
//! A project lives in one JSON snapshot file; CFG files are read and written on explicit
//! import/export.

pub mod project_store;

pub use project_store::{
    read_dialogue_cfg, read_quest_cfg, write_dialogue_cfg, write_quest_cfg, ProjectStore,
    StoreError, WriteDurability, DEFAULT_APP_KEY,
};
