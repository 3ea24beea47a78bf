// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The interactive session: owns the document for the lifetime of the process, drives the menus
//! and writes the document back after every change and once more when the session ends.

use std::{fmt, io};

use rand::Rng;
use ratatui::{backend::Backend, layout::Constraint};
use time::UtcOffset;
use tracing::{debug, error, info, warn};

use crate::ceremony::{self, CeremonyTiming};
use crate::link::{self, LookupError, TitleLookup};
use crate::model::{now_in, Document, Tune, MANUAL_PROVIDER};
use crate::ops::{apply_op, Applied, ApplyError, Op};
use crate::store::{DataFile, StoreError};
use crate::tui::{Ack, Body, Column, KeySource, MenuOutcome, PromptOutcome, Tui};

const MAIN_TITLE: &str = "Tunesday Menu";
const PARTICIPANTS_TITLE: &str = "Manage Tunesday participants";
const NO_PARTICIPANTS: &str = "No participants.";
const NO_TUNES: &str = "No tunes yet.";

const TUNE_COLUMNS: &[Column] = &[
    Column {
        header: "#",
        width: Constraint::Length(3),
    },
    Column {
        header: "Title",
        width: Constraint::Fill(1),
    },
    Column {
        header: "Provided by",
        width: Constraint::Length(12),
    },
    Column {
        header: "Date",
        width: Constraint::Length(16),
    },
    Column {
        header: "Link",
        width: Constraint::Length(24),
    },
];

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    SelectProvider,
    AddTune,
    ListTunes,
    ManageParticipants,
    PlaylistLink,
    Exit,
}

impl MainAction {
    pub const ALL: [Self; 6] = [
        Self::SelectProvider,
        Self::AddTune,
        Self::ListTunes,
        Self::ManageParticipants,
        Self::PlaylistLink,
        Self::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SelectProvider => "Select today's tune provider",
            Self::AddTune => "Manually add a tune to list",
            Self::ListTunes => "Get complete list of tunes",
            Self::ManageParticipants => "Manage Tunesday participants",
            Self::PlaylistLink => "Get YouTube playlist link",
            Self::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParticipantAction {
    Add,
    Remove,
    List,
    Toggle,
    Back,
}

impl ParticipantAction {
    const ALL: [Self; 5] = [Self::Add, Self::Remove, Self::List, Self::Toggle, Self::Back];

    fn label(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Remove => "Remove",
            Self::List => "List",
            Self::Toggle => "Activate/Deactivate",
            Self::Back => "Back",
        }
    }
}

/// Whether the user asked to stop while a screen was up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Interrupted,
}

impl From<Ack> for Flow {
    fn from(ack: Ack) -> Self {
        match ack {
            Ack::Continue => Self::Continue,
            Ack::Interrupted => Self::Interrupted,
        }
    }
}

/// How a session ended. Both endings have already saved the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Exited,
    Interrupted,
}

#[derive(Debug)]
pub enum SessionError {
    Terminal(io::Error),
    Store(StoreError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(err) => write!(f, "terminal error: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Terminal(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub struct Session<B: Backend, K: KeySource, L: TitleLookup, R: Rng> {
    tui: Tui<B, K>,
    store: DataFile,
    doc: Document,
    titles: L,
    rng: R,
    timing: CeremonyTiming,
    offset: UtcOffset,
    dirty: bool,
    playlist: Option<String>,
}

impl<B: Backend, K: KeySource, L: TitleLookup, R: Rng> Session<B, K, L, R> {
    /// Loads the document from `store` and prepares a session around it.
    pub fn open(tui: Tui<B, K>, store: DataFile, titles: L, rng: R) -> Result<Self, StoreError> {
        let doc = store.load()?;
        info!(
            path = %store.path().display(),
            participants = doc.participants().len(),
            tunes = doc.tunes().len(),
            "data file loaded"
        );
        Ok(Self::new(tui, store, doc, titles, rng))
    }

    pub fn new(tui: Tui<B, K>, store: DataFile, doc: Document, titles: L, rng: R) -> Self {
        Self {
            tui,
            store,
            doc,
            titles,
            rng,
            timing: CeremonyTiming::default(),
            offset: UtcOffset::UTC,
            dirty: false,
            playlist: None,
        }
    }

    pub fn with_timing(mut self, timing: CeremonyTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Offset used to timestamp new tunes.
    pub fn with_offset(mut self, offset: UtcOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn tui(&self) -> &Tui<B, K> {
        &self.tui
    }

    /// The last playlist view, for printing once the terminal is restored. The alternate screen
    /// cuts the playlist URL into rows, so copying it from there breaks the link.
    pub fn take_playlist(&mut self) -> Option<String> {
        self.playlist.take()
    }

    /// Runs the main menu until the user exits or the session is interrupted, then saves.
    ///
    /// The final save is fatal only on a normal exit; after an interrupt it is logged.
    pub fn run(&mut self) -> Result<SessionEnd, SessionError> {
        match self.main_loop() {
            Ok(SessionEnd::Exited) => {
                self.save()?;
                Ok(SessionEnd::Exited)
            }
            Ok(SessionEnd::Interrupted) => {
                info!("session interrupted");
                if let Err(err) = self.save() {
                    error!(error = %err, "save after interrupt failed");
                }
                Ok(SessionEnd::Interrupted)
            }
            Err(err) => {
                if let Err(save_err) = self.save() {
                    error!(error = %save_err, "save after terminal error failed");
                }
                Err(SessionError::Terminal(err))
            }
        }
    }

    fn main_loop(&mut self) -> io::Result<SessionEnd> {
        let labels = MainAction::ALL.map(MainAction::label);
        loop {
            let action = match self.tui.show_menu(MAIN_TITLE, &labels)? {
                MenuOutcome::Selected(idx) => match MainAction::ALL.get(idx) {
                    Some(action) => *action,
                    None => continue,
                },
                MenuOutcome::Cancelled => MainAction::Exit,
                MenuOutcome::Interrupted => return Ok(SessionEnd::Interrupted),
            };
            debug!(?action, "main menu");

            let flow = match action {
                MainAction::SelectProvider => self.select_provider()?,
                MainAction::AddTune => self.add_tune_manually()?,
                MainAction::ListTunes => self.list_tunes()?,
                MainAction::ManageParticipants => self.manage_participants()?,
                MainAction::PlaylistLink => self.playlist_link()?,
                MainAction::Exit => return Ok(SessionEnd::Exited),
            };
            if flow == Flow::Interrupted {
                return Ok(SessionEnd::Interrupted);
            }
            self.persist_if_dirty();
        }
    }

    fn select_provider(&mut self) -> io::Result<Flow> {
        let title = MainAction::SelectProvider.label();
        let drawn = match ceremony::draw(&self.doc, &mut self.rng, &self.timing) {
            Ok(drawn) => drawn,
            Err(reason) => return self.message(title, &reason.to_string()),
        };

        self.tui.play_ceremony(&drawn)?;
        let winner = drawn.winner().to_owned();
        debug!(winner = %winner, candidates = drawn.names().len(), "provider drawn");
        let committed = ceremony::commit(&mut self.doc, &drawn);
        self.record(committed);

        let text = format!(
            "Today's tune provider is: {winner}\n\nPaste the tune link (YouTube https://…) or press Enter to skip:"
        );
        let outcome = self.tui.prompt(
            title,
            Body::Winner {
                name: &winner,
                text: &text,
            },
            "> ",
        )?;
        match outcome {
            PromptOutcome::Submitted(raw) if raw.is_empty() => Ok(Flow::Continue),
            PromptOutcome::Submitted(raw) => self.record_provider_tune(&winner, &raw),
            PromptOutcome::Cancelled => Ok(Flow::Continue),
            PromptOutcome::Interrupted => Ok(Flow::Interrupted),
        }
    }

    fn record_provider_tune(&mut self, provider: &str, raw: &str) -> io::Result<Flow> {
        let title = MainAction::SelectProvider.label();
        let Some(id) = link::normalize_video_id(link::strip_tracking_params(raw)) else {
            return self.message(
                title,
                "Only https:// YouTube links are supported. No tune was recorded.",
            );
        };

        let lookup = self.lookup_title(&id);
        let name = lookup.as_ref().map(String::as_str).unwrap_or_default();
        let tune = Tune::new(name, raw, id.as_str(), provider)
            .with_added_at(Some(now_in(self.offset)));
        if let Err(err) = self.apply(Op::AddTune { tune }) {
            return self.message(title, &format!("Nothing changed: {err}."));
        }

        match lookup {
            Ok(name) => self.message(title, &format!("Added: {name}")),
            Err(err) => self.message(
                title,
                &format!("Added without a title (title lookup failed: {err})."),
            ),
        }
    }

    fn add_tune_manually(&mut self) -> io::Result<Flow> {
        let title = MainAction::AddTune.label();
        let outcome = self.tui.prompt(
            title,
            Body::Text(
                "Paste any link. YouTube links get their title looked up; other links are listed \
                 by host and path.",
            ),
            "Link: ",
        )?;
        let raw = match outcome {
            PromptOutcome::Submitted(raw) if raw.is_empty() => return Ok(Flow::Continue),
            PromptOutcome::Submitted(raw) => raw,
            PromptOutcome::Cancelled => return Ok(Flow::Continue),
            PromptOutcome::Interrupted => return Ok(Flow::Interrupted),
        };

        let id = link::normalize_video_id(link::strip_tracking_params(&raw)).unwrap_or_default();
        let lookup = if id.is_empty() {
            None
        } else {
            Some(self.lookup_title(&id))
        };
        let name = match &lookup {
            Some(Ok(name)) => name.as_str(),
            _ => "",
        };
        let tune = Tune::new(name, raw.as_str(), id.as_str(), MANUAL_PROVIDER)
            .with_added_at(Some(now_in(self.offset)));
        if let Err(err) = self.apply(Op::AddTune { tune }) {
            return self.message(title, &format!("Nothing changed: {err}."));
        }

        match lookup {
            Some(Ok(name)) => self.message(title, &format!("Added: {name}")),
            Some(Err(err)) => self.message(
                title,
                &format!("Added without a title (title lookup failed: {err})."),
            ),
            None => self.message(title, "Added."),
        }
    }

    fn list_tunes(&mut self) -> io::Result<Flow> {
        let title = MainAction::ListTunes.label();
        let rows = self
            .doc
            .tunes_for_display()
            .into_iter()
            .enumerate()
            .map(|(idx, tune)| tune_row(idx + 1, tune))
            .collect::<Vec<_>>();
        if rows.is_empty() {
            return self.message(title, NO_TUNES);
        }

        let summary = format!("Total tunes: {}", rows.len());
        let ack = self.tui.show_message(
            title,
            Body::Table {
                summary: &summary,
                columns: TUNE_COLUMNS,
                rows: &rows,
            },
        )?;
        Ok(ack.into())
    }

    fn playlist_link(&mut self) -> io::Result<Flow> {
        let title = MainAction::PlaylistLink.label();
        if self.doc.tunes().is_empty() {
            return self.message(title, NO_TUNES);
        }
        let Some(url) = link::playlist_url(self.doc.video_ids()) else {
            return self.message(title, "No YouTube video IDs found to build a playlist.");
        };

        let mut text = format!("{url}\n\nLinks for pasting:\n");
        for tune in self.doc.tunes() {
            text.push('\n');
            text.push_str(tune.link());
        }
        self.playlist = Some(text.clone());
        text.push_str("\n\nThe playlist is printed again when Tunesday exits, ready to copy.");
        self.message(title, &text)
    }

    fn manage_participants(&mut self) -> io::Result<Flow> {
        let labels = ParticipantAction::ALL.map(ParticipantAction::label);
        loop {
            let action = match self.tui.show_menu(PARTICIPANTS_TITLE, &labels)? {
                MenuOutcome::Selected(idx) => match ParticipantAction::ALL.get(idx) {
                    Some(action) => *action,
                    None => continue,
                },
                MenuOutcome::Cancelled => ParticipantAction::Back,
                MenuOutcome::Interrupted => return Ok(Flow::Interrupted),
            };

            let flow = match action {
                ParticipantAction::Add => self.add_participant()?,
                ParticipantAction::Remove => self.remove_participant()?,
                ParticipantAction::List => self.list_participants()?,
                ParticipantAction::Toggle => self.toggle_participant()?,
                ParticipantAction::Back => return Ok(Flow::Continue),
            };
            if flow == Flow::Interrupted {
                return Ok(Flow::Interrupted);
            }
            self.persist_if_dirty();
        }
    }

    fn add_participant(&mut self) -> io::Result<Flow> {
        let title = "Add participant";
        let outcome = self
            .tui
            .prompt(title, Body::Text("Enter the participant's name."), "Name: ")?;
        match outcome {
            PromptOutcome::Submitted(name) if name.is_empty() => Ok(Flow::Continue),
            PromptOutcome::Submitted(name) => {
                self.apply_and_report(title, Op::AddParticipant { name })
            }
            PromptOutcome::Cancelled => Ok(Flow::Continue),
            PromptOutcome::Interrupted => Ok(Flow::Interrupted),
        }
    }

    fn remove_participant(&mut self) -> io::Result<Flow> {
        let title = "Select participant to remove";
        let names = self.doc.participant_names();
        if names.is_empty() {
            return self.message(PARTICIPANTS_TITLE, NO_PARTICIPANTS);
        }
        match self.tui.show_menu(title, &names)? {
            MenuOutcome::Selected(idx) => {
                let name = names[idx].clone();
                self.apply_and_report(title, Op::RemoveParticipant { name })
            }
            MenuOutcome::Cancelled => Ok(Flow::Continue),
            MenuOutcome::Interrupted => Ok(Flow::Interrupted),
        }
    }

    fn list_participants(&mut self) -> io::Result<Flow> {
        if self.doc.participants().is_empty() {
            return self.message(PARTICIPANTS_TITLE, NO_PARTICIPANTS);
        }
        let mut text = String::from("Participants:\n");
        for (name, count) in self.doc.participants() {
            let status = if self.doc.is_active(name) {
                "active"
            } else {
                "deactivated"
            };
            text.push_str(&format!("\n  {name}  (tunes: {count}, {status})"));
        }
        self.message(PARTICIPANTS_TITLE, &text)
    }

    fn toggle_participant(&mut self) -> io::Result<Flow> {
        let title = "Select participant to toggle activation";
        let names = self.doc.participant_names();
        if names.is_empty() {
            return self.message(PARTICIPANTS_TITLE, NO_PARTICIPANTS);
        }
        let items = names
            .iter()
            .map(|name| {
                let status = if self.doc.is_active(name) {
                    "active"
                } else {
                    "deactivated"
                };
                format!("{name} ({status})")
            })
            .collect::<Vec<_>>();
        match self.tui.show_menu(title, &items)? {
            MenuOutcome::Selected(idx) => {
                let name = names[idx].clone();
                self.apply_and_report(title, Op::ToggleParticipant { name })
            }
            MenuOutcome::Cancelled => Ok(Flow::Continue),
            MenuOutcome::Interrupted => Ok(Flow::Interrupted),
        }
    }

    fn apply(&mut self, op: Op) -> Result<Applied, ApplyError> {
        let applied = apply_op(&mut self.doc, op)?;
        self.dirty = true;
        info!(change = %applied, "document updated");
        Ok(applied)
    }

    fn record(&mut self, result: Result<Applied, ApplyError>) {
        match result {
            Ok(applied) => {
                self.dirty = true;
                info!(change = %applied, "document updated");
            }
            Err(err) => warn!(error = %err, "change rejected"),
        }
    }

    fn apply_and_report(&mut self, title: &str, op: Op) -> io::Result<Flow> {
        let text = match self.apply(op) {
            Ok(applied) => applied.to_string(),
            Err(err) => format!("Nothing changed: {err}."),
        };
        self.message(title, &text)
    }

    fn lookup_title(&self, video_id: &str) -> Result<String, LookupError> {
        self.titles.fetch_title(video_id).map_err(|err| {
            warn!(video_id, error = %err, "title lookup failed");
            err
        })
    }

    fn message(&mut self, title: &str, text: &str) -> io::Result<Flow> {
        Ok(self.tui.show_message(title, Body::Text(text))?.into())
    }

    /// Saves after a change; failures are logged and surfaced in the next footer.
    fn persist_if_dirty(&mut self) {
        if !self.dirty {
            return;
        }
        match self.store.save(&self.doc) {
            Ok(()) => {
                self.dirty = false;
                debug!(path = %self.store.path().display(), "document saved");
            }
            Err(err) => {
                error!(error = %err, "save failed");
                self.tui.set_notice(format!("Saving failed: {err}"));
            }
        }
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.store.save(&self.doc)?;
        self.dirty = false;
        debug!(path = %self.store.path().display(), "document saved");
        Ok(())
    }
}

fn tune_row(position: usize, tune: &Tune) -> Vec<String> {
    let title = if tune.name().is_empty() {
        link::display_link(tune.link())
    } else {
        tune.name().to_owned()
    };
    let date = tune
        .added_at()
        .and_then(|at| {
            at.format(time::macros::format_description!(
                "[year]-[month]-[day] [hour]:[minute]"
            ))
            .ok()
        })
        .unwrap_or_else(|| "-".to_owned());
    vec![
        position.to_string(),
        title,
        tune.provider().to_owned(),
        date,
        link::display_link(tune.link()),
    ]
}

#[cfg(test)]
mod tests;
