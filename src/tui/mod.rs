// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Blocking, redraw-on-input screens (ratatui + crossterm): a list menu, a single-line prompt, a
//! message screen and the ceremony animation. Each screen owns the terminal until it returns a
//! terminal outcome; a raised [`Interrupt`] ends any waiting screen with `Interrupted`.

use std::{collections::VecDeque, io, thread, time::Duration};

use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    prelude::*,
    widgets::{Cell, HighlightSpacing, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

use crate::ceremony::Draw;
use crate::interrupt::Interrupt;

pub mod banner;
mod menu;
mod prompt;
mod theme;

pub use menu::MenuOutcome;
pub use prompt::{Ack, PromptOutcome};
pub use theme::{ThemeError, TuiTheme, NO_COLOR_ENV, PALETTE_ENV};

use menu::{menu_input, MenuState};
use prompt::{MessageState, PromptState};

const INPUT_POLL: Duration = Duration::from_millis(250);
const SELECTING_TITLE: &str = "Selecting today's provider…";
const MENU_HINTS: &[(&str, &str)] = &[
    ("Move", "↑/k ↓/j"),
    ("Select", "Enter"),
    ("Back", "Esc"),
    ("Quit", "Ctrl-C"),
];
const PROMPT_HINTS: &[(&str, &str)] = &[("Submit", "Enter"), ("Cancel", "Esc"), ("Clear", "Ctrl-U")];
const MESSAGE_HINTS: &[(&str, &str)] = &[("Continue", "Enter")];
const SCROLL_HINTS: &[(&str, &str)] = &[
    ("Scroll", "↑/k ↓/j PgUp PgDn"),
    ("Top/End", "Home End"),
    ("Continue", "Enter"),
];

/// One input as seen by the screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Paste(String),
    Resize,
}

/// Where screens get their input from, and how they wait between animation frames.
pub trait KeySource {
    /// Waits up to `timeout` for the next input; `Ok(None)` on timeout.
    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>>;

    fn pause(&mut self, duration: Duration);
}

/// Reads the real terminal.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(InputEvent::Key(key)),
            Event::Paste(text) => Some(InputEvent::Paste(text)),
            Event::Resize(..) => Some(InputEvent::Resize),
            _ => None,
        })
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Replays a fixed script of inputs without waiting. Running past the end is an
/// [`io::ErrorKind::UnexpectedEof`] error so that a short script cannot hang a test.
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeys {
    events: VecDeque<InputEvent>,
}

impl ScriptedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, code: KeyCode) -> Self {
        self.events
            .push_back(InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        self
    }

    pub fn keys(self, codes: impl IntoIterator<Item = KeyCode>) -> Self {
        codes.into_iter().fold(self, Self::key)
    }

    pub fn enter(self) -> Self {
        self.key(KeyCode::Enter)
    }

    pub fn down(self, times: usize) -> Self {
        self.keys(std::iter::repeat(KeyCode::Down).take(times))
    }

    /// Types `text` one character at a time.
    pub fn text(self, text: &str) -> Self {
        self.keys(text.chars().map(KeyCode::Char))
    }

    pub fn paste(mut self, text: impl Into<String>) -> Self {
        self.events.push_back(InputEvent::Paste(text.into()));
        self
    }

    pub fn ctrl(mut self, ch: char) -> Self {
        self.events.push_back(InputEvent::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::CONTROL,
        )));
        self
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl KeySource for ScriptedKeys {
    fn poll_input(&mut self, _timeout: Duration) -> io::Result<Option<InputEvent>> {
        match self.events.pop_front() {
            Some(event) => Ok(Some(event)),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "key script exhausted",
            )),
        }
    }

    fn pause(&mut self, _duration: Duration) {}
}

/// Table column for [`Body::Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub width: Constraint,
}

/// Content shown between a screen's title and its list or input line.
#[derive(Debug, Clone, Copy)]
pub enum Body<'a> {
    Empty,
    Text(&'a str),
    /// The block winner banner followed by text.
    Winner { name: &'a str, text: &'a str },
    Table {
        summary: &'a str,
        columns: &'a [Column],
        rows: &'a [Vec<String>],
    },
}

/// Owns the terminal and the input source for the length of a session.
pub struct Tui<B: Backend, K: KeySource> {
    terminal: Terminal<B>,
    keys: K,
    interrupt: Interrupt,
    theme: TuiTheme,
    notice: Option<String>,
}

impl<B: Backend, K: KeySource> Tui<B, K> {
    pub fn new(terminal: Terminal<B>, keys: K, interrupt: Interrupt, theme: TuiTheme) -> Self {
        Self {
            terminal,
            keys,
            interrupt,
            theme,
            notice: None,
        }
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt.is_raised()
    }

    /// Shows `notice` in the footer until the next screen completes.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn show_menu<S: AsRef<str>>(
        &mut self,
        title: &str,
        items: &[S],
    ) -> io::Result<MenuOutcome> {
        let items = items.iter().map(AsRef::as_ref).collect::<Vec<_>>();
        let mut state = MenuState::new(items.len());

        let outcome = loop {
            if self.interrupt.is_raised() {
                break MenuOutcome::Interrupted;
            }
            self.draw(&ScreenView {
                title,
                body: Body::Empty,
                list: Some(ListView {
                    items: &items,
                    selected: state.selected(),
                }),
                input: None,
                scroll: 0,
                hints: MENU_HINTS,
            })?;

            if let Some(InputEvent::Key(key)) = self.keys.poll_input(INPUT_POLL)? {
                if let Some(outcome) = state.apply(menu_input(&key)) {
                    break outcome;
                }
            }
        };

        self.notice = None;
        Ok(outcome)
    }

    pub fn prompt(&mut self, title: &str, body: Body<'_>, label: &str) -> io::Result<PromptOutcome> {
        let mut state = PromptState::default();

        let outcome = loop {
            if self.interrupt.is_raised() {
                break PromptOutcome::Interrupted;
            }
            self.draw(&ScreenView {
                title,
                body,
                list: None,
                input: Some(InputView {
                    label,
                    value: state.value(),
                }),
                scroll: 0,
                hints: PROMPT_HINTS,
            })?;

            match self.keys.poll_input(INPUT_POLL)? {
                Some(InputEvent::Key(key)) => {
                    if let Some(outcome) = state.apply_key(&key) {
                        break outcome;
                    }
                }
                Some(InputEvent::Paste(text)) => state.paste(&text),
                Some(InputEvent::Resize) | None => {}
            }
        };

        self.notice = None;
        Ok(outcome)
    }

    /// Waits for Enter ("Press Enter to continue"). Text and table bodies taller than the screen
    /// scroll with the arrow keys, PgUp/PgDn, Home and End.
    pub fn show_message(&mut self, title: &str, body: Body<'_>) -> io::Result<Ack> {
        let mut state = MessageState::default();

        let outcome = loop {
            if self.interrupt.is_raised() {
                break Ack::Interrupted;
            }
            let bounds = self.draw(&ScreenView {
                title,
                body,
                list: None,
                input: None,
                scroll: state.offset(),
                hints: if state.is_scrollable() {
                    SCROLL_HINTS
                } else {
                    MESSAGE_HINTS
                },
            })?;
            if state.set_bounds(bounds) {
                continue;
            }

            if let Some(InputEvent::Key(key)) = self.keys.poll_input(INPUT_POLL)? {
                if let Some(ack) = state.apply_key(&key) {
                    break ack;
                }
            }
        };

        self.notice = None;
        Ok(outcome)
    }

    /// Plays the highlight animation of a draw, ending on the winner. Not interruptible.
    pub fn play_ceremony(&mut self, draw: &Draw) -> io::Result<()> {
        let names = draw.names().iter().map(String::as_str).collect::<Vec<_>>();

        for frame in draw.frames() {
            self.draw_names(&names, frame.highlight)?;
            self.keys.pause(frame.hold);
        }

        self.draw_names(&names, draw.winner_index())?;
        self.keys.pause(draw.reveal_pause());
        Ok(())
    }

    fn draw_names(&mut self, names: &[&str], highlight: usize) -> io::Result<()> {
        self.draw(&ScreenView {
            title: SELECTING_TITLE,
            body: Body::Empty,
            list: Some(ListView {
                items: names,
                selected: highlight,
            }),
            input: None,
            scroll: 0,
            hints: &[],
        })?;
        Ok(())
    }

    fn draw(&mut self, view: &ScreenView<'_>) -> io::Result<ScrollBounds> {
        let theme = &self.theme;
        let notice = self.notice.as_deref();
        let mut bounds = ScrollBounds::default();
        self.terminal
            .draw(|frame| bounds = render_screen(frame, theme, view, notice))?;
        Ok(bounds)
    }
}

struct ScreenView<'a> {
    title: &'a str,
    body: Body<'a>,
    list: Option<ListView<'a>>,
    input: Option<InputView<'a>>,
    scroll: u16,
    hints: &'a [(&'a str, &'a str)],
}

struct ListView<'a> {
    items: &'a [&'a str],
    selected: usize,
}

struct InputView<'a> {
    label: &'a str,
    value: &'a str,
}

/// Raw mode + alternate screen + hidden cursor + bracketed paste for as long as it lives.
///
/// Dropping it (including while unwinding from a panic) restores the terminal.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste, Hide).map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { _private: () })
    }

    pub fn terminal(&self) -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;
        Ok(terminal)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableBracketedPaste, LeaveAlternateScreen, Show);
}

// Layout, body and footer rendering.
include!("chrome.rs");
