// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::io;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";
const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Looks up the display title of a video.
///
/// Callers treat every failure as non-fatal and record the tune with an empty title.
pub trait TitleLookup {
    fn fetch_title(&self, video_id: &str) -> Result<String, LookupError>;
}

#[derive(Debug)]
pub enum LookupError {
    InvalidRequest { video_id: String, source: url::ParseError },
    Http { video_id: String, source: Box<ureq::Error> },
    Decode { video_id: String, source: io::Error },
    EmptyTitle { video_id: String },
    Unavailable,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest { video_id, source } => {
                write!(f, "cannot build title request for {video_id}: {source}")
            }
            Self::Http { video_id, source } => {
                write!(f, "title request for {video_id} failed: {source}")
            }
            Self::Decode { video_id, source } => {
                write!(f, "cannot decode title response for {video_id}: {source}")
            }
            Self::EmptyTitle { video_id } => write!(f, "no title returned for {video_id}"),
            Self::Unavailable => f.write_str("title lookup unavailable"),
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRequest { source, .. } => Some(source),
            Self::Http { source, .. } => Some(source.as_ref()),
            Self::Decode { source, .. } => Some(source),
            Self::EmptyTitle { .. } | Self::Unavailable => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OEmbedJson {
    #[serde(default)]
    title: String,
}

/// Fetches titles from YouTube's public oEmbed endpoint (one request, no retries).
#[derive(Debug, Clone)]
pub struct YouTubeTitles {
    agent: ureq::Agent,
    endpoint: String,
}

impl Default for YouTubeTitles {
    fn default() -> Self {
        Self::new()
    }
}

impl YouTubeTitles {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(DEFAULT_TIMEOUT)
            .timeout_read(DEFAULT_TIMEOUT)
            .user_agent(concat!("tunesday/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            endpoint: OEMBED_ENDPOINT.to_owned(),
        }
    }

    fn request_url(&self, video_id: &str) -> Result<Url, LookupError> {
        let watch_url = format!("{WATCH_URL_PREFIX}{video_id}");
        Url::parse_with_params(&self.endpoint, [("url", watch_url.as_str()), ("format", "json")])
            .map_err(|source| LookupError::InvalidRequest {
                video_id: video_id.to_owned(),
                source,
            })
    }
}

impl TitleLookup for YouTubeTitles {
    fn fetch_title(&self, video_id: &str) -> Result<String, LookupError> {
        let url = self.request_url(video_id)?;
        let response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|source| LookupError::Http {
                video_id: video_id.to_owned(),
                source: Box::new(source),
            })?;
        let body: OEmbedJson = response.into_json().map_err(|source| LookupError::Decode {
            video_id: video_id.to_owned(),
            source,
        })?;

        let title = body.title.trim();
        if title.is_empty() {
            return Err(LookupError::EmptyTitle {
                video_id: video_id.to_owned(),
            });
        }
        Ok(title.to_owned())
    }
}

/// Answers every lookup with the same result, without I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTitle {
    title: Option<String>,
}

impl FixedTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    /// A lookup that always fails with [`LookupError::Unavailable`].
    pub fn failing() -> Self {
        Self { title: None }
    }
}

impl TitleLookup for FixedTitle {
    fn fetch_title(&self, _video_id: &str) -> Result<String, LookupError> {
        self.title.clone().ok_or(LookupError::Unavailable)
    }
}
