// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// How a menu screen ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Selected(usize),
    Cancelled,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuInput {
    Up,
    Down,
    Confirm,
    Cancel,
    Interrupt,
    Ignore,
}

pub(crate) fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

pub(crate) fn menu_input(key: &KeyEvent) -> MenuInput {
    if is_ctrl_c(key) {
        return MenuInput::Interrupt;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => MenuInput::Up,
        KeyCode::Down | KeyCode::Char('j') => MenuInput::Down,
        KeyCode::Enter => MenuInput::Confirm,
        KeyCode::Esc => MenuInput::Cancel,
        _ => MenuInput::Ignore,
    }
}

/// Cursor over `len` items. Starts at 0 and clamps at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MenuState {
    selected: usize,
    len: usize,
}

impl MenuState {
    pub(crate) fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    /// Applies one input; returns the outcome once the screen is done.
    pub(crate) fn apply(&mut self, input: MenuInput) -> Option<MenuOutcome> {
        match input {
            MenuInput::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            MenuInput::Down => {
                if self.selected + 1 < self.len {
                    self.selected += 1;
                }
                None
            }
            // Nothing to pick from an empty list.
            MenuInput::Confirm if self.len == 0 => None,
            MenuInput::Confirm => Some(MenuOutcome::Selected(self.selected)),
            MenuInput::Cancel => Some(MenuOutcome::Cancelled),
            MenuInput::Interrupt => Some(MenuOutcome::Interrupted),
            MenuInput::Ignore => None,
        }
    }
}
