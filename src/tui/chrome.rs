// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, title, footer, help, and style helpers used by TUI rendering.
fn footer_uses_compact_mode(area: Rect) -> bool {
    area.width < 90
}

fn stack_panes_vertically(area: Rect) -> bool {
    area.width < 70
}

fn view_title(label: &str, tail: Option<&str>) -> String {
    let mut title = format!("─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

/// Column after the query's last cell: border + "> " prompt + display width, clamped inside the
/// box.
fn input_cursor_x(area: Rect, query: &str) -> u16 {
    let width = u16::try_from(Span::raw(query).width()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(3)
        .saturating_add(width)
        .min(area.x.saturating_add(area.width.saturating_sub(2)))
}

fn input_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default().fg(UNFOCUSED_COLOR)
    }
}

fn search_state_style(state: &SearchState) -> Style {
    match state {
        SearchState::Idle => Style::default().fg(Color::Gray),
        SearchState::Loading { .. } => Style::default().fg(Color::Yellow),
        SearchState::Success { .. } => Style::default().fg(Color::LightGreen),
        SearchState::Failed { .. } => Style::default().fg(Color::LightRed),
    }
}

fn results_title_tail(state: &SearchState) -> Option<String> {
    match state {
        SearchState::Idle => None,
        SearchState::Loading { query } => Some(format!("— searching “{query}”")),
        SearchState::Success { query, results } => {
            Some(format!("— {} for “{query}”", match_count_label(results.len())))
        }
        SearchState::Failed { query, .. } => Some(format!("— “{query}” failed")),
    }
}

fn match_count_label(count: usize) -> String {
    match count {
        1 => "1 match".to_owned(),
        n => format!("{n} matches"),
    }
}

/// Placeholder shown instead of the result list; `None` when there are rows to show.
fn results_placeholder(view: &PickerSnapshot) -> Option<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    if !view.dropdown_open {
        return Some(Line::from(Span::styled("Dropdown closed (↓ to reopen)", dim)));
    }
    match &view.state {
        SearchState::Idle => Some(Line::from(Span::styled("Type to search people", dim))),
        SearchState::Loading { .. } => {
            Some(Line::from(Span::styled("Searching…", Style::default().fg(Color::Yellow))))
        }
        SearchState::Failed { message, .. } => Some(Line::from(vec![
            Span::styled(message.to_string(), Style::default().fg(Color::LightRed)),
            Span::styled("  (Ctrl-r to retry)", dim),
        ])),
        SearchState::Success { query, results } if results.is_empty() => {
            Some(Line::from(Span::styled(format!("No people match “{query}”"), dim)))
        }
        SearchState::Success { .. } => None,
    }
}

fn result_item_line(record: &Record, dimmed: bool) -> Line<'static> {
    let (marker, name_style) = if dimmed {
        ("✓", Style::default().fg(Color::DarkGray))
    } else {
        (" ", Style::default().fg(Color::White))
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled(format!("{:<3}", record.initials()), initials_style(dimmed)),
        Span::styled(record.name().to_owned(), name_style),
        Span::styled(format!("  {}", record.role()), Style::default().fg(Color::DarkGray)),
    ])
}

fn initials_style(dimmed: bool) -> Style {
    let color = if dimmed { Color::DarkGray } else { Color::LightBlue };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn result_cursor_style(focused: bool) -> Style {
    let bg = if focused { CURSOR_BG } else { Color::DarkGray };
    Style::default().bg(bg)
}

fn chips_line(selection: &[Record]) -> Line<'static> {
    if selection.is_empty() {
        return Line::from(Span::styled("No one selected", Style::default().fg(Color::DarkGray)));
    }
    let mut spans = Vec::with_capacity(selection.len() * 2);
    for record in selection {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("[{}]", record.name()),
            Style::default().fg(Color::Black).bg(CHIP_BG),
        ));
    }
    Line::from(spans)
}

fn detail_text(record: Option<&Record>) -> String {
    match record {
        Some(record) => format!(
            "Name: {}\nRole: {}\nEmail: {}\nStatus: {}\nId: {}",
            record.name(),
            record.role(),
            record.email(),
            record.presence(),
            record.id(),
        ),
        None => "No one highlighted".to_owned(),
    }
}

fn footer_help_line(app: &App, toast_suffix: &str, compact: bool) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    let force_failure = if app.view.force_failure { "^f◼ " } else { "^f◻ " };

    spans.push(Span::styled(
        format!("{} ", app.view.state.label()),
        search_state_style(&app.view.state),
    ));
    if compact {
        push_footer_entry_with_separator(&mut spans, "ADD", "⏎", " | ");
        push_footer_entry_with_separator(&mut spans, "HELP", "F1", " | ");
        push_footer_entry_with_separator(&mut spans, "QUIT", "^c", " | ");
    } else {
        let has_results = !app.view.state.results().is_empty();
        let can_retry = matches!(app.view.state, SearchState::Failed { .. });
        push_footer_entry_maybe_disabled(&mut spans, "NAV", "↑/↓", !has_results);
        push_footer_entry_maybe_disabled(&mut spans, "ADD", "⏎", app.view.cursor.is_none());
        push_footer_entry_maybe_disabled(&mut spans, "REMOVE", "^d", app.view.selection.is_empty());
        push_footer_entry(&mut spans, "FAIL", force_failure);
        push_footer_entry_maybe_disabled(&mut spans, "RETRY", "^r", !can_retry);
        push_footer_entry_maybe_disabled(
            &mut spans,
            "YANK",
            "^y",
            app.view.active_detail.is_none(),
        );
        push_footer_entry(&mut spans, "HELP", "F1");
        push_footer_entry(&mut spans, "QUIT", "^c");
    }

    if !toast_suffix.is_empty() {
        spans.push(Span::styled(toast_suffix.to_owned(), Style::default().fg(Color::White)));
    }
    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(FOOTER_BRAND.to_owned(), Style::default().fg(FOOTER_BRAND_COLOR))])
}

fn help_key_style() -> Style {
    Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn help_lines(mcp_endpoint: Option<&str>) -> Vec<Line<'static>> {
    let key_style = help_key_style();
    let header_style = help_header_style();
    let dim_style = Style::default().fg(Color::DarkGray);
    let key_col_width =
        ["↓/↑, Ctrl-n/Ctrl-p", "Backspace"].iter().map(|s| s.chars().count()).max().unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    lines.push(Line::from(Span::styled("--- Search ---", header_style)));
    lines.push(help_kv("type", "Edit the query (debounced lookup)", key_col_width, key_style));
    lines.push(help_kv("Backspace", "Delete last character", key_col_width, key_style));
    lines.push(help_kv("Ctrl-f", "Toggle simulated lookup failure", key_col_width, key_style));
    lines.push(help_kv("Ctrl-r", "Retry a failed lookup", key_col_width, key_style));
    lines.push(Line::raw(""));

    lines.push(Line::from(Span::styled("--- Results ---", header_style)));
    lines.push(help_kv("↓/↑, Ctrl-n/Ctrl-p", "Move highlight", key_col_width, key_style));
    lines.push(help_kv("Enter", "Add highlighted person", key_col_width, key_style));
    lines.push(help_kv("Esc", "Close dropdown (again to quit)", key_col_width, key_style));
    lines.push(Line::raw(""));

    lines.push(Line::from(Span::styled("--- Selection ---", header_style)));
    lines.push(help_kv("Ctrl-d", "Remove most recent chip", key_col_width, key_style));
    lines.push(help_kv("Ctrl-y", "Yank detail email (OSC 52)", key_col_width, key_style));
    lines.push(Line::raw(""));

    lines.push(Line::from(Span::styled("--- Global ---", header_style)));
    lines.push(help_kv("F1", "Help (toggle)", key_col_width, key_style));
    lines.push(help_kv("Ctrl-c", "Quit", key_col_width, key_style));

    if let Some(endpoint) = mcp_endpoint {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(format!("MCP: {endpoint}"), dim_style)));
    }
    lines
}

fn render_help(frame: &mut Frame<'_>, app: &mut App, main_area: Rect) {
    let area = centered_rect(70, 80, main_area);
    frame.render_widget(Clear, area);

    let lines = help_lines(app.mcp_endpoint.as_deref());
    let max_scroll = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    app.help_scroll = app.help_scroll.min(max_scroll);

    let title = view_title("Help", Some("— F1/Esc to close"));
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    push_footer_entry_with_separator_maybe_disabled(spans, label, value, " | ", disabled);
}

fn push_footer_entry_with_separator(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    separator: &'static str,
) {
    push_footer_entry_with_separator_maybe_disabled(spans, label, value, separator, false);
}

fn push_footer_entry_with_separator_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    separator: &'static str,
    disabled: bool,
) {
    if spans.len() > 1 {
        spans.push(Span::styled(separator.to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.extend(footer_value_spans(value, disabled));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn footer_value_spans(value: &str, disabled: bool) -> Vec<Span<'static>> {
    let color = if disabled { Color::DarkGray } else { FOOTER_KEY_COLOR };
    vec![Span::styled(value.to_owned(), Style::default().fg(color).add_modifier(Modifier::BOLD))]
}
