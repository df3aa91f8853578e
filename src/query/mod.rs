// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over the dialogue graph.
//!
//! Validation, connection lookups, search and the preview walker all borrow the model and never
//! mutate it.

pub mod flow;
pub mod preview;
pub mod search;
pub mod validate;
