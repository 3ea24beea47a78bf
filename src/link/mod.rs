// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Link handling: video id normalization, tracking-parameter stripping, playlist links and the
//! title lookup capability.

use url::Url;

pub mod title;

pub use title::{FixedTitle, LookupError, TitleLookup, YouTubeTitles};

const PLAYLIST_BASE_URL: &str = "https://www.youtube.com/watch_videos?video_ids=";

/// Extracts the video id from an `https` YouTube link.
///
/// Recognized hosts (an optional `www.` and then `m.` prefix is ignored):
/// - `youtube.com` / `music.youtube.com`: `/watch?v=<id>` and `/shorts/<id>[/...]`
/// - `youtu.be`: `/<id>`
///
/// Returns `None` for anything else, including `http` links and strings that are not URLs.
pub fn normalize_video_id(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    if url.scheme() != "https" {
        return None;
    }

    let host = url.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let host = host.strip_prefix("m.").unwrap_or(host);

    let id = match host {
        "youtube.com" | "music.youtube.com" => {
            if url.path() == "/watch" {
                url.query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())
            } else {
                url.path()
                    .strip_prefix("/shorts/")
                    .and_then(|rest| rest.split('/').next())
                    .map(ToOwned::to_owned)
            }
        }
        "youtu.be" => Some(url.path().trim_matches('/').to_owned()),
        _ => None,
    }?;

    (!id.is_empty()).then_some(id)
}

/// Drops everything from the first `&` onward.
///
/// This is deliberately naive: a pasted `watch?v=<id>&list=...&si=...` link keeps only its first
/// query parameter, and links without `&` come back unchanged.
pub fn strip_tracking_params(raw: &str) -> &str {
    match raw.find('&') {
        Some(idx) => &raw[..idx],
        None => raw,
    }
}

/// Builds an ad-hoc playlist link from video ids, or `None` when there are none.
pub fn playlist_url<'a>(ids: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let ids = ids
        .into_iter()
        .filter(|id| !id.is_empty())
        .collect::<Vec<_>>();
    if ids.is_empty() {
        return None;
    }
    Some(format!("{PLAYLIST_BASE_URL}{}", ids.join(",")))
}

/// Short form of a link for narrow table cells: `youtu.be/<id>` for videos, host + path
/// otherwise.
pub fn display_link(link: &str) -> String {
    if let Some(id) = normalize_video_id(link) {
        return format!("youtu.be/{id}");
    }
    match Url::parse(link) {
        Ok(url) => match url.host_str() {
            Some(host) => {
                let host = host.strip_prefix("www.").unwrap_or(host);
                let host = host.strip_prefix("m.").unwrap_or(host);
                format!("{host}{}", url.path().trim_end_matches('/'))
            }
            None => link.to_owned(),
        },
        Err(_) => link.to_owned(),
    }
}
