// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use time::{OffsetDateTime, UtcOffset};

/// Provider recorded for tunes added outside the ceremony.
pub const MANUAL_PROVIDER: &str = "manual";

/// One recorded link contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tune {
    name: String,
    link: String,
    id: String,
    provider: String,
    added_at: Option<OffsetDateTime>,
}

impl Tune {
    pub fn new(
        name: impl Into<String>,
        link: impl Into<String>,
        id: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
            id: id.into(),
            provider: provider.into(),
            added_at: None,
        }
    }

    pub fn with_added_at(mut self, added_at: Option<OffsetDateTime>) -> Self {
        self.added_at = added_at;
        self
    }

    /// Display title; empty when the lookup failed or the link is not a video.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The link as submitted.
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Normalized video id; empty for non-video links.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn added_at(&self) -> Option<OffsetDateTime> {
        self.added_at
    }

    pub fn is_manual(&self) -> bool {
        self.provider == MANUAL_PROVIDER
    }
}

/// The local UTC offset, or UTC when it cannot be determined.
///
/// On unix `time` only reports the local offset while the process is single-threaded, so call
/// this at startup before any runtime threads exist and pass the result along.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Current wall-clock time expressed in `offset`.
pub fn now_in(offset: UtcOffset) -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(offset)
}

#[cfg(test)]
mod tests {
    use time::macros::offset;

    use super::now_in;

    #[test]
    fn now_in_keeps_the_given_offset() {
        assert_eq!(now_in(offset!(+2)).offset(), offset!(+2));
        assert_eq!(now_in(offset!(-5:30)).offset(), offset!(-5:30));
    }
}
