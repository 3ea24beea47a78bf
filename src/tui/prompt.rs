// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::menu::is_ctrl_c;
use super::ScrollBounds;

/// How a line-input screen ended. Submitted text is trimmed and may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Submitted(String),
    Cancelled,
    Interrupted,
}

/// How a message screen ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    Continue,
    Interrupted,
}

pub(crate) fn ack_input(key: &KeyEvent) -> Option<Ack> {
    if is_ctrl_c(key) {
        return Some(Ack::Interrupted);
    }
    match key.code {
        KeyCode::Enter | KeyCode::Esc => Some(Ack::Continue),
        _ => None,
    }
}

/// Scroll position of a message screen. Keys move it within the bounds of the last draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MessageState {
    offset: u16,
    bounds: ScrollBounds,
}

impl MessageState {
    pub(crate) fn offset(&self) -> u16 {
        self.offset
    }

    pub(crate) fn is_scrollable(&self) -> bool {
        self.bounds.max_offset > 0
    }

    /// Records the bounds of a draw; true when the screen must be drawn again.
    pub(crate) fn set_bounds(&mut self, bounds: ScrollBounds) -> bool {
        let before = (self.offset, self.is_scrollable());
        self.bounds = bounds;
        self.offset = self.offset.min(bounds.max_offset);
        before != (self.offset, self.is_scrollable())
    }

    pub(crate) fn apply_key(&mut self, key: &KeyEvent) -> Option<Ack> {
        if let Some(ack) = ack_input(key) {
            return Some(ack);
        }
        let page = self.bounds.page.max(1);
        let offset = match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.offset.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.offset.saturating_add(1),
            KeyCode::PageUp => self.offset.saturating_sub(page),
            KeyCode::PageDown => self.offset.saturating_add(page),
            KeyCode::Home => 0,
            KeyCode::End => self.bounds.max_offset,
            _ => return None,
        };
        self.offset = offset.min(self.bounds.max_offset);
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PromptState {
    value: String,
}

impl PromptState {
    pub(crate) fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn apply_key(&mut self, key: &KeyEvent) -> Option<PromptOutcome> {
        if is_ctrl_c(key) {
            return Some(PromptOutcome::Interrupted);
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => Some(PromptOutcome::Submitted(self.value.trim().to_owned())),
            KeyCode::Esc => Some(PromptOutcome::Cancelled),
            KeyCode::Backspace => {
                self.value.pop();
                None
            }
            KeyCode::Char('u') if ctrl => {
                self.value.clear();
                None
            }
            KeyCode::Char(ch) if !ctrl => {
                self.value.push(ch);
                None
            }
            _ => None,
        }
    }

    /// Pasted text is taken up to its first line break.
    pub(crate) fn paste(&mut self, text: &str) {
        let line = text.lines().next().unwrap_or_default();
        self.value.extend(line.chars().filter(|ch| !ch.is_control()));
    }
}
