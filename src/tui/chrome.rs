// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, body, list and footer helpers used by every screen.
const LIST_CURSOR: &str = "▶ ";
const EMPTY_LIST: &str = "(nothing here)";
const TABLE_COLUMN_SPACING: u16 = 2;

/// How far a body can scroll, as measured by the last draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ScrollBounds {
    max_offset: u16,
    page: u16,
}

impl ScrollBounds {
    fn new(total: usize, page: u16) -> Self {
        let max_offset = total.saturating_sub(usize::from(page));
        Self {
            max_offset: u16::try_from(max_offset).unwrap_or(u16::MAX),
            page,
        }
    }
}

fn render_screen(
    frame: &mut Frame<'_>,
    theme: &TuiTheme,
    view: &ScreenView<'_>,
    notice: Option<&str>,
) -> ScrollBounds {
    let area = frame.area();
    frame.render_widget(Paragraph::new("").style(theme.base_style()), area);

    let header_height = u16::try_from(banner::HEADER.len() + 1).unwrap_or(u16::MAX);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, theme, layout[0]);
    frame.render_widget(
        Paragraph::new(Line::styled(view.title.to_owned(), theme.title_style())),
        layout[1],
    );
    let bounds = render_content(frame, theme, view, layout[2]);
    frame.render_widget(
        Paragraph::new(footer_line(theme, view.hints, notice)),
        layout[3],
    );
    bounds
}

fn render_header(frame: &mut Frame<'_>, theme: &TuiTheme, area: Rect) {
    let lines = banner::HEADER
        .iter()
        .map(|line| Line::styled(*line, theme.header_style()))
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_content(
    frame: &mut Frame<'_>,
    theme: &TuiTheme,
    view: &ScreenView<'_>,
    area: Rect,
) -> ScrollBounds {
    let mut constraints = Vec::with_capacity(3);
    let body_height = body_height(&view.body, area.width);
    if view.list.is_some() {
        constraints.push(Constraint::Length(body_height));
        constraints.push(Constraint::Min(0));
    } else {
        constraints.push(Constraint::Min(0));
    }
    if view.input.is_some() {
        constraints.push(Constraint::Length(1));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let bounds = render_body(frame, theme, &view.body, view.scroll, chunks[0]);
    let mut next = 1;
    if let Some(list) = &view.list {
        render_list(frame, theme, list, chunks[next]);
        next += 1;
    }
    if let Some(input) = &view.input {
        frame.render_widget(Paragraph::new(input_line(theme, input)), chunks[next]);
    }
    bounds
}

fn body_height(body: &Body<'_>, width: u16) -> u16 {
    let lines = match body {
        Body::Empty => 0,
        Body::Text(text) => text.lines().count() + 1,
        Body::Winner { name, text } => {
            banner::winner_lines(name, width).len() + text.lines().count() + 2
        }
        Body::Table { rows, .. } => rows.len() + 3,
    };
    u16::try_from(lines).unwrap_or(u16::MAX)
}

/// Draws `body` scrolled down by `scroll` lines (or table rows), clamped to what fits.
fn render_body(
    frame: &mut Frame<'_>,
    theme: &TuiTheme,
    body: &Body<'_>,
    scroll: u16,
    area: Rect,
) -> ScrollBounds {
    match body {
        Body::Empty => ScrollBounds::default(),
        Body::Text(text) => {
            let lines = wrap_lines(text, area.width);
            let bounds = ScrollBounds::new(lines.len(), area.height);
            let lines = lines.into_iter().map(Line::raw).collect::<Vec<_>>();
            frame.render_widget(
                Paragraph::new(lines)
                    .style(theme.base_style())
                    .scroll((scroll.min(bounds.max_offset), 0)),
                area,
            );
            bounds
        }
        Body::Winner { name, text } => {
            let mut lines = banner::winner_lines(name, area.width)
                .into_iter()
                .map(|line| {
                    Line::styled(line, theme.banner_style()).alignment(Alignment::Center)
                })
                .collect::<Vec<_>>();
            lines.push(Line::default());
            lines.extend(text.lines().map(|line| Line::raw(line.to_owned())));
            frame.render_widget(
                Paragraph::new(lines)
                    .style(theme.base_style())
                    .wrap(Wrap { trim: false }),
                area,
            );
            ScrollBounds::default()
        }
        Body::Table {
            summary,
            columns,
            rows,
        } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(0)])
                .split(area);
            // One line of the table area goes to the header row.
            let bounds = ScrollBounds::new(rows.len(), chunks[1].height.saturating_sub(1));
            let offset = usize::from(scroll.min(bounds.max_offset));
            let summary = if bounds.max_offset > 0 {
                let last = (offset + usize::from(bounds.page)).min(rows.len());
                format!("{summary}  (rows {}-{last} of {})", offset + 1, rows.len())
            } else {
                (*summary).to_owned()
            };
            frame.render_widget(
                Paragraph::new(summary).style(theme.base_style()),
                chunks[0],
            );

            let header = Row::new(columns.iter().map(|column| Cell::from(column.header)))
                .style(theme.title_style());
            let table_rows = rows
                .iter()
                .skip(offset)
                .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.clone()))));
            let table = Table::new(table_rows, columns.iter().map(|column| column.width))
                .header(header)
                .column_spacing(TABLE_COLUMN_SPACING)
                .style(theme.base_style());
            frame.render_widget(table, chunks[1]);
            bounds
        }
    }
}

/// Wraps `text` at spaces to `width` columns; words longer than a line are split.
fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        let mut line = String::new();
        let mut len = 0;
        for (idx, word) in raw.split(' ').enumerate() {
            if idx > 0 {
                if len > 0 && len + 1 + word.chars().count() > width {
                    lines.push(std::mem::take(&mut line));
                    len = 0;
                } else {
                    line.push(' ');
                    len += 1;
                }
            }
            for ch in word.chars() {
                if len == width {
                    lines.push(std::mem::take(&mut line));
                    len = 0;
                }
                line.push(ch);
                len += 1;
            }
        }
        lines.push(line);
    }
    lines
}

fn render_list(frame: &mut Frame<'_>, theme: &TuiTheme, list: &ListView<'_>, area: Rect) {
    if list.items.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled(EMPTY_LIST, theme.muted_style())),
            area,
        );
        return;
    }

    let items = list
        .items
        .iter()
        .map(|item| ListItem::new((*item).to_owned()))
        .collect::<Vec<_>>();
    let widget = List::new(items)
        .style(theme.base_style())
        .highlight_symbol(LIST_CURSOR)
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_style(theme.selection_style());

    let mut state = ListState::default();
    state.select(Some(list.selected));
    frame.render_stateful_widget(widget, area, &mut state);
}

fn input_line(theme: &TuiTheme, input: &InputView<'_>) -> Line<'static> {
    Line::from(vec![
        Span::styled(input.label.to_owned(), theme.title_style()),
        Span::styled(input.value.to_owned(), theme.base_style()),
        Span::styled(" ", theme.banner_style()),
    ])
}

fn footer_line(theme: &TuiTheme, hints: &[(&str, &str)], notice: Option<&str>) -> Line<'static> {
    let mut spans = Vec::new();
    for (label, key) in hints {
        push_footer_entry(&mut spans, theme, label, key);
    }

    let notice = notice.map(str::trim).unwrap_or_default();
    if !notice.is_empty() {
        if !spans.is_empty() {
            spans.push(Span::styled(" | ", theme.hint_label_style()));
        }
        spans.push(Span::styled("Notice: ", theme.hint_label_style()));
        spans.push(Span::styled(notice.to_owned(), theme.notice_style()));
    }

    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, theme: &TuiTheme, label: &str, key: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", theme.hint_label_style()));
    }
    spans.push(Span::styled(format!("{label}: "), theme.hint_label_style()));
    spans.push(Span::styled(key.to_owned(), theme.hint_key_style()));
}
