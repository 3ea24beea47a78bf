// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for the roster and tune log.
//!
//! The whole [`crate::model::Document`] lives in one pretty-printed JSON file that is replaced
//! atomically on every save.

pub mod data_file;

pub use data_file::{DataFile, StoreError, WriteDurability, DEFAULT_DATA_FILENAME};
