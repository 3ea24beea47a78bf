// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::model::{Document, Tune};

pub const DEFAULT_DATA_FILENAME: &str = "tunesday.json";

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidDocument {
        path: PathBuf,
        reason: String,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::InvalidDocument { path, reason } => {
                write!(f, "invalid data file {path:?}: {reason}")
            }
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidDocument { .. } => None,
            Self::SymlinkRefused { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not fsync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Syncs the temp file before the rename and the parent directory after it. Exact guarantees
    /// are platform/filesystem-dependent.
    Durable,
}

/// The single JSON file holding a [`Document`].
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
    durability: WriteDurability,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, or returns an empty one when the file does not exist yet.
    ///
    /// Any other failure (unreadable file, malformed JSON, broken invariants) is an error: the
    /// caller must not continue with an empty document and overwrite the user's data.
    pub fn load(&self) -> Result<Document, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let doc_json: DocumentJson =
            serde_json::from_str(&raw).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;

        document_from_json(&self.path, doc_json)
    }

    /// Writes the whole document atomically (temp file + rename).
    pub fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let doc_json = document_to_json(doc);
        let mut contents =
            serde_json::to_string_pretty(&doc_json).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        contents.push('\n');

        write_atomic(&self.path, contents.as_bytes(), self.durability)
    }
}

// JSON representation and filesystem helpers.
include!("data_file/helpers.rs");
