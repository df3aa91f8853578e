// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text formats read and written by the editor.
//!
//! The game's content pipeline consumes the line-oriented CFG format; see [`cfg`].

pub mod cfg;
