// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A [`Document`] holds the participant roster, the deactivated set and the tune log.

pub mod document;
pub mod tune;

pub use document::Document;
pub use tune::{local_offset, now_in, Tune, MANUAL_PROVIDER};
