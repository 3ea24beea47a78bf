// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The selection ceremony: a uniform draw among eligible participants plus the plan for the
//! cosmetic "spinning" animation shown before the reveal.
//!
//! The winner is decided before any frame is planned; the animation only ever reads it.

use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;

use crate::model::Document;
use crate::ops::{apply_op, Applied, ApplyError, Op};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CeremonyTiming {
    /// Total animation length, in milliseconds.
    pub total_ms: RangeInclusive<u64>,
    /// How long each highlighted frame stays up, in milliseconds.
    pub frame_ms: RangeInclusive<u64>,
    /// Pause on the winner's highlighted frame before the banner.
    pub reveal_pause: Duration,
}

impl Default for CeremonyTiming {
    fn default() -> Self {
        Self {
            total_ms: 1500..=3000,
            frame_ms: 40..=100,
            reveal_pause: Duration::from_millis(1200),
        }
    }
}

impl CeremonyTiming {
    /// No animation at all; used by tests and scripted runs.
    pub fn instant() -> Self {
        Self {
            total_ms: 0..=0,
            frame_ms: 0..=0,
            reveal_pause: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoEligible {
    NoParticipants,
    AllDeactivated,
}

impl fmt::Display for NoEligible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoParticipants => f.write_str("No participants available. Add one first."),
            Self::AllDeactivated => f.write_str(
                "All participants are deactivated. Activate at least one to select a provider.",
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub highlight: usize,
    pub hold: Duration,
}

/// The outcome of a draw, before it is committed to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    names: Vec<String>,
    winner: usize,
    frames: Vec<Frame>,
    reveal_pause: Duration,
}

impl Draw {
    /// Eligible names in lexicographic order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn winner_index(&self) -> usize {
        self.winner
    }

    pub fn winner(&self) -> &str {
        &self.names[self.winner]
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn reveal_pause(&self) -> Duration {
        self.reveal_pause
    }

    pub fn animation_length(&self) -> Duration {
        self.frames.iter().map(|frame| frame.hold).sum()
    }
}

/// Picks a winner uniformly among the eligible participants and plans the animation.
///
/// Contribution counts play no part in the draw. The document is not touched; see [`commit`].
pub fn draw<R: Rng + ?Sized>(
    doc: &Document,
    rng: &mut R,
    timing: &CeremonyTiming,
) -> Result<Draw, NoEligible> {
    if doc.participants().is_empty() {
        return Err(NoEligible::NoParticipants);
    }
    let names = doc.eligible_names();
    if names.is_empty() {
        return Err(NoEligible::AllDeactivated);
    }

    let winner = rng.gen_range(0..names.len());

    let total = Duration::from_millis(rng.gen_range(timing.total_ms.clone()));
    let mut frames = Vec::new();
    let mut planned = Duration::ZERO;
    while planned < total {
        let hold = Duration::from_millis(rng.gen_range(timing.frame_ms.clone()).max(1));
        frames.push(Frame {
            highlight: rng.gen_range(0..names.len()),
            hold,
        });
        planned += hold;
    }

    Ok(Draw {
        names,
        winner,
        frames,
        reveal_pause: timing.reveal_pause,
    })
}

/// Credits the winner with one more contribution.
pub fn commit(doc: &mut Document, draw: &Draw) -> Result<Applied, ApplyError> {
    apply_op(
        doc,
        Op::RecordContribution {
            name: draw.winner().to_owned(),
        },
    )
}
