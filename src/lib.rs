// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Palaver: an authoring core for NPC dialogue trees and side quests.
//!
//! The model lives in [`model`], the CFG text format in [`format::cfg`], edits go through
//! [`ops::apply_ops`] and projects are persisted by [`store::ProjectStore`].

pub mod config;
pub mod format;
pub mod model;
pub mod ops;
pub mod query;
pub mod store;
