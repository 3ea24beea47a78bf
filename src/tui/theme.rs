// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

pub const PALETTE_ENV: &str = "TUNESDAY_PALETTE";
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Screen colors. Modifiers (bold, reversed) survive `NO_COLOR`; colors do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuiTheme {
    palette: Option<TuiPalette>,
    color: bool,
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self {
            palette: None,
            color: true,
        }
    }
}

impl TuiTheme {
    pub fn from_env() -> Result<Self, ThemeError> {
        let palette = match env::var(PALETTE_ENV) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ThemeError::InvalidEnv {
                    name: PALETTE_ENV.to_owned(),
                    value: "<non-unicode>".to_owned(),
                });
            }
        };
        // Any non-empty value counts, per no-color.org.
        let no_color = env::var_os(NO_COLOR_ENV).is_some_and(|value| !value.is_empty());
        Self::from_settings(palette.as_deref(), no_color)
    }

    pub fn from_settings(palette: Option<&str>, no_color: bool) -> Result<Self, ThemeError> {
        let palette = match palette.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => Some(TuiPalette::parse_csv(value).map_err(|error| {
                ThemeError::InvalidEnv {
                    name: PALETTE_ENV.to_owned(),
                    value: format!("{value} ({error})"),
                }
            })?),
            None => None,
        };
        Ok(Self {
            palette,
            color: !no_color,
        })
    }

    /// Plain styles only; used by tests and dumb terminals.
    pub fn monochrome() -> Self {
        Self {
            palette: None,
            color: false,
        }
    }

    fn paint(&self, style: Style, color: impl FnOnce(&TuiPalette) -> Color, fallback: Color) -> Style {
        if !self.color {
            return style;
        }
        match &self.palette {
            Some(palette) => style.fg(color(palette)),
            None => style.fg(fallback),
        }
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) if self.color => Style::default().fg(palette.fg).bg(palette.bg),
            _ => Style::default(),
        }
    }

    pub(crate) fn title_style(&self) -> Style {
        self.paint(
            self.base_style().add_modifier(Modifier::BOLD),
            |palette| palette.accent,
            Color::LightYellow,
        )
    }

    pub(crate) fn header_style(&self) -> Style {
        self.paint(self.base_style(), |palette| palette.accent, Color::Yellow)
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.paint(
            self.base_style().add_modifier(Modifier::BOLD),
            |palette| palette.highlight,
            Color::Cyan,
        )
    }

    pub(crate) fn banner_style(&self) -> Style {
        self.base_style()
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub(crate) fn hint_label_style(&self) -> Style {
        self.paint(self.base_style(), |palette| palette.fg, Color::Gray)
    }

    pub(crate) fn hint_key_style(&self) -> Style {
        self.paint(
            self.base_style().add_modifier(Modifier::BOLD),
            |palette| palette.highlight,
            Color::Cyan,
        )
    }

    pub(crate) fn notice_style(&self) -> Style {
        self.paint(
            self.base_style().add_modifier(Modifier::BOLD),
            |palette| palette.accent,
            Color::LightRed,
        )
    }

    pub(crate) fn muted_style(&self) -> Style {
        self.paint(self.base_style(), |palette| palette.fg, Color::DarkGray)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TuiPalette {
    fg: Color,
    bg: Color,
    accent: Color,
    highlight: Color,
}

impl TuiPalette {
    const CSV_LEN: usize = 4;

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(|part| part.trim()).collect();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg,accent,highlight), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }

        Ok(Self {
            fg: parse_palette_color(parts[0])?,
            bg: parse_palette_color(parts[1])?,
            accent: parse_palette_color(parts[2])?,
            highlight: parse_palette_color(parts[3])?,
        })
    }
}

fn parse_palette_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }

    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    let r = ((rgb >> 16) & 0xFF) as u8;
    let g = ((rgb >> 8) & 0xFF) as u8;
    let b = (rgb & 0xFF) as u8;
    Ok(Color::Rgb(r, g, b))
}

#[derive(Debug, Clone)]
pub enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for ThemeError {}
