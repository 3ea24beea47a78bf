// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Block-letter banners.

pub const HEADER: &[&str] = &[
    "██████████████████████████████████████████████████████████████████████████",
    "█▌                                                                      ▐█",
    "█▌     ░▀█▀░▀█▀░▀░█▀▀░░░░░░░░░                                          ▐█",
    "█▌     ░░█░░░█░░░░▀▀█░░░░░░░░░                                          ▐█",
    "█▌     ░▀▀▀░░▀░░░░▀▀▀░▀░░▀░░▀░                                          ▐█",
    "█▌     ░█░█░█▀█░█▀█░█▀█░█░█░░░▀█▀░█░█░█▀█░█▀▀░█▀▀░█▀▄░█▀█░█░█░░░█░█     ▐█",
    "█▌     ░█▀█░█▀█░█▀▀░█▀▀░░█░░░░░█░░█░█░█░█░█▀▀░▀▀█░█░█░█▀█░░█░░░░▀░▀     ▐█",
    "█▌     ░▀░▀░▀░▀░▀░░░▀░░░░▀░░░░░▀░░▀▀▀░▀░▀░▀▀▀░▀▀▀░▀▀░░▀░▀░░▀░░░░▀░▀     ▐█",
    "█▌                                                                      ▐█",
    "██████████████████████████████████████████████████████████████████████████",
];

pub const NOT_TUESDAY: &[&str] = &[
    "████████████████████████████████████████████████████████████████████████████████████████",
    "█▌                                                                                    ▐█",
    "█▌                                                                                    ▐█",
    "█▌                                                                                    ▐█",
    "█▌     ░█░█░░░▀█▀░▀█▀░▀░█▀▀░░░█▀█░█▀█░▀█▀░░░▀█▀░█░█░█▀█░█▀▀░█▀▀░█▀▄░█▀█░█░█░░░█░█     ▐█",
    "█▌     ░▀░▀░░░░█░░░█░░░░▀▀█░░░█░█░█░█░░█░░░░░█░░█░█░█░█░█▀▀░▀▀█░█░█░█▀█░░█░░░░▀░▀     ▐█",
    "█▌     ░▀░▀░░░▀▀▀░░▀░░░░▀▀▀░░░▀░▀░▀▀▀░░▀░░░░░▀░░▀▀▀░▀░▀░▀▀▀░▀▀▀░▀▀░░▀░▀░░▀░░░░▀░▀     ▐█",
    "█▌                                                                                    ▐█",
    "█▌                                                                                    ▐█",
    "█▌                                                                                    ▐█",
    "████████████████████████████████████████████████████████████████████████████████████████",
];

pub const RADIO: &[&str] = &[
    "█████████████████████████████████████████████████████████████████████",
    "█▌                                                                 ▐█",
    "█▌                                                                 ▐█",
    "█▌                                                                 ▐█",
    "█▌     ░▀█▀░█░█░█▀█░█▀▀░█▀▀░█▀▄░█▀█░█░█░░░░█▀▄░█▀█░█▀▄░▀█▀░█▀█     ▐█",
    "█▌     ░░█░░█░█░█░█░█▀▀░▀▀█░█░█░█▀█░░█░░░░░█▀▄░█▀█░█░█░░█░░█░█     ▐█",
    "█▌     ░░▀░░▀▀▀░▀░▀░▀▀▀░▀▀▀░▀▀░░▀░▀░░▀░░▀░░▀░▀░▀░▀░▀▀░░▀▀▀░▀▀▀     ▐█",
    "█▌                                                                 ▐█",
    "█▌                                                                 ▐█",
    "█▌                                                                 ▐█",
    "█████████████████████████████████████████████████████████████████████",
];

const MIN_WINNER_INNER: usize = 20;

/// Five-line block frame around "<name> is today's tune provider!!", sized for `width` columns.
pub fn winner_lines(name: &str, width: u16) -> Vec<String> {
    let inner = usize::from(width).saturating_sub(8).max(MIN_WINNER_INNER);
    let text = truncate(&format!("{name} is today's tune provider!!"), inner - 6);
    let text_len = text.chars().count();

    let border = "█".repeat(inner);
    let padding = format!("█{}█", " ".repeat(inner - 2));
    let middle = format!("█   {text}{}█", " ".repeat(inner - 5 - text_len));

    vec![
        border.clone(),
        padding.clone(),
        middle,
        padding,
        border,
    ]
}

/// Cuts `text` to at most `max` characters, marking the cut with `…`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = text.chars().take(max - 1).collect::<String>();
    out.push('…');
    out
}
