// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tunesday: a weekly terminal ritual that picks who brings the tune.
//!
//! The roster and tune log live in one JSON document (`store`), mutated only through `ops`.
//! `session` drives the menus in `tui` on top of that document.

pub mod ceremony;
pub mod interrupt;
pub mod link;
pub mod model;
pub mod ops;
pub mod session;
pub mod store;
pub mod tui;

#[cfg(test)]
pub(crate) mod test_utils;
