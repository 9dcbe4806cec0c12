// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Interactive people picker shell (ratatui + crossterm). The picker itself lives behind a shared
//! mutex so the MCP server can drive the same instance; the UI renders from a snapshot that is
//! refreshed whenever the picker's revision moves.

use std::{error::Error, io, sync::Arc, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::model::Record;
use crate::picker::{Intent, IntentOutcome, PeoplePicker, PickerSnapshot};
use crate::search::SearchState;

const FOCUS_COLOR: Color = Color::LightGreen;
const UNFOCUSED_COLOR: Color = Color::DarkGray;
const DETAIL_COLOR: Color = Color::Gray;
const CURSOR_BG: Color = Color::Blue;
const CHIP_BG: Color = Color::LightCyan;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "🆁 🅾 🆂 🆃 🅴 🆁 ";

const IDLE_POLL: Duration = Duration::from_millis(250);
const BUSY_POLL: Duration = Duration::from_millis(40);
const TOAST_TTL: Duration = Duration::from_secs(2);

pub type SharedPicker = Arc<Mutex<PeoplePicker>>;

/// Runs the interactive terminal UI until the user quits.
///
/// Must be called from a blocking context (not from inside an async task): the shared picker is
/// locked with `blocking_lock`.
pub fn run(picker: SharedPicker, mcp_endpoint: Option<String>) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(picker, mcp_endpoint);

    while !app.should_quit {
        app.tick(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    tracing::debug!("tui loop finished");
    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let input_area = layout[0];
    let chips_area = layout[1];
    let main_area = layout[2];
    let status_area = layout[3];

    let panes = Layout::default()
        .direction(if stack_panes_vertically(main_area) {
            Direction::Vertical
        } else {
            Direction::Horizontal
        })
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_area);
    let results_area = panes[0];
    let detail_area = panes[1];

    let view = &app.view;
    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(FOOTER_KEY_COLOR)),
        Span::raw(view.raw_query.clone()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(view_title("Search people", None))
            .border_style(input_border_style(view.focused)),
    );
    frame.render_widget(input, input_area);
    if view.focused && !app.show_help {
        let cursor_x = input_cursor_x(input_area, &view.raw_query);
        frame.set_cursor(cursor_x, input_area.y.saturating_add(1));
    }

    frame.render_widget(Paragraph::new(chips_line(&view.selection)), chips_area);

    let results_title = view_title("People", results_title_tail(&view.state).as_deref());
    let results_block = Block::default()
        .borders(Borders::ALL)
        .title(results_title)
        .border_style(input_border_style(view.focused && view.dropdown_open));
    match results_placeholder(view) {
        Some(line) => {
            frame.render_widget(
                Paragraph::new(line).wrap(Wrap { trim: false }).block(results_block),
                results_area,
            );
        }
        None => {
            let items = view
                .state
                .results()
                .iter()
                .map(|record| ListItem::new(result_item_line(record, is_selected(view, record))))
                .collect::<Vec<_>>();
            let list = List::new(items)
                .block(results_block)
                .highlight_style(result_cursor_style(view.focused));
            app.results_state.select(view.cursor);
            frame.render_stateful_widget(list, results_area, &mut app.results_state);
        }
    }

    let detail = Paragraph::new(detail_text(view.active_detail.as_ref()))
        .style(Style::default().fg(DETAIL_COLOR))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DETAIL_COLOR))
                .title(view_title("Detail", None)),
        );
    frame.render_widget(detail, detail_area);

    let toast_suffix = app.toast_suffix(Instant::now());
    let compact_footer = footer_uses_compact_mode(status_area);
    let status = Paragraph::new(footer_help_line(app, &toast_suffix, compact_footer));
    frame.render_widget(status, status_area);
    if !compact_footer {
        let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
        frame.render_widget(brand, status_area);
    }

    if app.show_help {
        render_help(frame, app, main_area);
    }
}

fn is_selected(view: &PickerSnapshot, record: &Record) -> bool {
    view.selection.iter().any(|selected| selected.id() == record.id())
}

// Extracted layout/footer/help rendering helpers.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    picker: SharedPicker,
    view: PickerSnapshot,
    results_state: ListState,
    mcp_endpoint: Option<String>,
    show_help: bool,
    help_scroll: u16,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(picker: SharedPicker, mcp_endpoint: Option<String>) -> Self {
        let view = picker.blocking_lock().snapshot();
        Self {
            picker,
            view,
            results_state: ListState::default(),
            mcp_endpoint,
            show_help: false,
            help_scroll: 0,
            toast: None,
            should_quit: false,
        }
    }

    /// Pumps the picker and refreshes the view when anything moved (including MCP edits).
    fn tick(&mut self, now: Instant) {
        let mut picker = self.picker.blocking_lock();
        picker.pump(now);
        if picker.rev() != self.view.rev {
            self.view = picker.snapshot();
        }
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        let mut timeout = if self.view.state.is_loading() { BUSY_POLL } else { IDLE_POLL };
        if let Some(deadline) = self.picker.blocking_lock().next_wakeup() {
            timeout = timeout.min(deadline.saturating_duration_since(now));
        }
        timeout
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_event(key) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the key asks to quit.
    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.show_help {
            match key.code {
                KeyCode::Esc | KeyCode::F(1) => self.show_help = false,
                KeyCode::Down => self.help_scroll = self.help_scroll.saturating_add(1),
                KeyCode::Up => self.help_scroll = self.help_scroll.saturating_sub(1),
                KeyCode::Home => self.help_scroll = 0,
                _ => {}
            }
            return false;
        }

        let now = Instant::now();
        let mut quit = false;
        let shared = Arc::clone(&self.picker);
        {
            let mut picker = shared.blocking_lock();
            match (key.code, ctrl) {
                (KeyCode::F(1), _) => {
                    self.show_help = true;
                    self.help_scroll = 0;
                }
                (KeyCode::Down, _) | (KeyCode::Char('n'), true) => {
                    picker.apply(Intent::MoveNext);
                }
                (KeyCode::Up, _) | (KeyCode::Char('p'), true) => {
                    picker.apply(Intent::MovePrevious);
                }
                (KeyCode::Enter, _) => match picker.apply(Intent::Commit) {
                    IntentOutcome::Selected(record) => {
                        self.set_toast(format!("Added {}", record.name()));
                    }
                    _ if picker.cursor().is_some() => self.set_toast("Already selected"),
                    _ => {}
                },
                (KeyCode::Esc, _) => {
                    if picker.apply(Intent::Dismiss) == IntentOutcome::Ignored {
                        quit = true;
                    }
                }
                (KeyCode::Char('d'), true) => match picker.remove_last() {
                    Some(record) => self.set_toast(format!("Removed {}", record.name())),
                    None => self.set_toast("Nothing to remove"),
                },
                (KeyCode::Char('f'), true) => {
                    let force_failure = !picker.force_failure();
                    picker.set_force_failure(force_failure);
                    self.set_toast(if force_failure {
                        "Lookup failure forced"
                    } else {
                        "Lookup failure cleared"
                    });
                }
                (KeyCode::Char('r'), true) => {
                    if picker.retry() {
                        self.set_toast("Retrying lookup");
                    } else {
                        self.set_toast("Nothing to retry");
                    }
                }
                (KeyCode::Char('y'), true) => {
                    let email = picker.active_detail().map(|record| record.email().to_owned());
                    self.yank_email(email);
                }
                (KeyCode::Backspace, _) => {
                    picker.pop_char(now);
                }
                (KeyCode::Char(ch), false) if !key.modifiers.contains(KeyModifiers::ALT) => {
                    picker.push_char(ch, now);
                }
                _ => {}
            }
            self.view = picker.snapshot();
        }
        quit
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_TTL });
    }

    fn toast_suffix(&mut self, now: Instant) -> String {
        match self.toast.as_ref() {
            Some(toast) if toast.expires_at > now => format!(" | {}", toast.message),
            Some(_) => {
                self.toast = None;
                String::new()
            }
            None => String::new(),
        }
    }

    fn yank_email(&mut self, email: Option<String>) {
        let Some(email) = email else {
            self.set_toast("No one highlighted");
            return;
        };
        match copy_to_clipboard(&email) {
            Ok(backend) => self.set_toast(format!("Yanked {email} ({backend})")),
            Err(err) => self.set_toast(format!("Clipboard error: {err}")),
        }
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
