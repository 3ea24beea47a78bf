// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for the roster and tune log.
//!
//! Every change to a [`Document`] made by the session goes through [`apply_op`], which keeps the
//! roster invariants and reports what changed so screens can describe it.

use std::fmt;

use crate::model::{Document, Tune, MANUAL_PROVIDER};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    AddParticipant { name: String },
    RemoveParticipant { name: String },
    ToggleParticipant { name: String },
    RecordContribution { name: String },
    AddTune { tune: Tune },
}

/// What an applied op did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    ParticipantAdded { name: String },
    ParticipantRemoved { name: String, removed_tunes: usize },
    ParticipantToggled { name: String, active: bool },
    ContributionRecorded { name: String, count: u32 },
    TuneAdded { index: usize },
}

impl fmt::Display for Applied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParticipantAdded { name } => write!(f, "{name} added."),
            Self::ParticipantRemoved { name, removed_tunes: 0 } => write!(f, "{name} removed."),
            Self::ParticipantRemoved { name, removed_tunes } => {
                write!(f, "{name} removed together with {removed_tunes} tune(s).")
            }
            Self::ParticipantToggled { name, active: true } => write!(f, "{name} activated."),
            Self::ParticipantToggled { name, active: false } => write!(f, "{name} deactivated."),
            Self::ContributionRecorded { name, count } => {
                write!(f, "{name} now has {count} tune(s).")
            }
            Self::TuneAdded { .. } => f.write_str("Tune added."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    EmptyName,
    /// The name is the provider sentinel of manually added tunes.
    ReservedName { name: String },
    AlreadyExists { name: String },
    NotFound { name: String },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => f.write_str("participant name must not be empty"),
            Self::ReservedName { name } => write!(f, "participant name is reserved ({name})"),
            Self::AlreadyExists { name } => write!(f, "participant already exists ({name})"),
            Self::NotFound { name } => write!(f, "participant not found ({name})"),
        }
    }
}

impl std::error::Error for ApplyError {}

pub fn apply_op(doc: &mut Document, op: Op) -> Result<Applied, ApplyError> {
    match op {
        Op::AddParticipant { name } => add_participant(doc, name),
        Op::RemoveParticipant { name } => remove_participant(doc, name),
        Op::ToggleParticipant { name } => toggle_participant(doc, name),
        Op::RecordContribution { name } => record_contribution(doc, name),
        Op::AddTune { tune } => {
            doc.tunes_mut().push(tune);
            Ok(Applied::TuneAdded { index: doc.tunes().len() - 1 })
        }
    }
}

// Per-op helpers used by `apply_op`.
include!("ops_impl.rs");
