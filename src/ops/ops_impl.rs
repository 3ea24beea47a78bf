// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Roster mutation helpers used by `apply_op`.
/// Keeps `ops::mod` focused on public op types and dispatch.
fn add_participant(doc: &mut Document, name: String) -> Result<Applied, ApplyError> {
    let name = name.trim().to_owned();
    if name.is_empty() {
        return Err(ApplyError::EmptyName);
    }
    if name == MANUAL_PROVIDER {
        return Err(ApplyError::ReservedName { name });
    }
    if doc.has_participant(&name) {
        return Err(ApplyError::AlreadyExists { name });
    }

    doc.participants_mut().insert(name.clone(), 0);
    Ok(Applied::ParticipantAdded { name })
}

fn remove_participant(doc: &mut Document, name: String) -> Result<Applied, ApplyError> {
    if doc.participants_mut().remove(&name).is_none() {
        return Err(ApplyError::NotFound { name });
    }
    doc.disabled_mut().remove(&name);

    // A legacy `manual` participant never owns the manually added tunes.
    let before = doc.tunes().len();
    if name != MANUAL_PROVIDER {
        doc.tunes_mut().retain(|tune| tune.provider() != name);
    }
    let removed_tunes = before - doc.tunes().len();

    Ok(Applied::ParticipantRemoved { name, removed_tunes })
}

fn toggle_participant(doc: &mut Document, name: String) -> Result<Applied, ApplyError> {
    if !doc.has_participant(&name) {
        return Err(ApplyError::NotFound { name });
    }

    let active = if doc.disabled().contains(&name) {
        doc.disabled_mut().remove(&name);
        true
    } else {
        doc.disabled_mut().insert(name.clone());
        false
    };
    Ok(Applied::ParticipantToggled { name, active })
}

fn record_contribution(doc: &mut Document, name: String) -> Result<Applied, ApplyError> {
    let Some(count) = doc.participants_mut().get_mut(&name) else {
        return Err(ApplyError::NotFound { name });
    };
    *count = count.saturating_add(1);
    let count = *count;
    Ok(Applied::ContributionRecorded { name, count })
}
