// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use super::tune::Tune;

/// The roster plus the tune log; the single unit of persistence.
///
/// Mutations that must keep the roster invariants (non-empty unique names, `disabled` being a
/// subset of the roster, cascading tune removal) go through [`crate::ops::apply_op`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    participants: BTreeMap<String, u32>,
    disabled: BTreeSet<String>,
    tunes: Vec<Tune>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn participants(&self) -> &BTreeMap<String, u32> {
        &self.participants
    }

    pub(crate) fn participants_mut(&mut self) -> &mut BTreeMap<String, u32> {
        &mut self.participants
    }

    pub fn disabled(&self) -> &BTreeSet<String> {
        &self.disabled
    }

    pub(crate) fn disabled_mut(&mut self) -> &mut BTreeSet<String> {
        &mut self.disabled
    }

    pub fn tunes(&self) -> &[Tune] {
        &self.tunes
    }

    pub(crate) fn tunes_mut(&mut self) -> &mut Vec<Tune> {
        &mut self.tunes
    }

    pub fn has_participant(&self, name: &str) -> bool {
        self.participants.contains_key(name)
    }

    pub fn contributions(&self, name: &str) -> Option<u32> {
        self.participants.get(name).copied()
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.has_participant(name) && !self.disabled.contains(name)
    }

    /// Participant names in lexicographic order.
    pub fn participant_names(&self) -> Vec<String> {
        self.participants.keys().cloned().collect()
    }

    /// Names eligible for the ceremony (roster minus `disabled`), in lexicographic order.
    pub fn eligible_names(&self) -> Vec<String> {
        self.participants
            .keys()
            .filter(|name| !self.disabled.contains(name.as_str()))
            .cloned()
            .collect()
    }

    /// Tunes in display order: newest first, undated entries last (ordered by lowercase name).
    pub fn tunes_for_display(&self) -> Vec<&Tune> {
        let mut tunes = self.tunes.iter().collect::<Vec<_>>();
        tunes.sort_by(|a, b| match (a.added_at(), b.added_at()) {
            (Some(left), Some(right)) => right.cmp(&left),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        });
        tunes
    }

    /// Video ids of all tunes that carry one, in insertion order.
    pub fn video_ids(&self) -> Vec<&str> {
        self.tunes
            .iter()
            .map(Tune::id)
            .filter(|id| !id.is_empty())
            .collect()
    }
}
