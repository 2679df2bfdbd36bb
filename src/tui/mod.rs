// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pythia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pythia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive shell (ratatui + crossterm): an input panel for the
//! working text, the highlighted-text view with a hover detail overlay, and
//! the session history list. Remote calls run as tasks on the shared tokio
//! runtime; completions come back over a channel and are drained once per
//! tick, so the UI stays interactive while requests are in flight.

use std::{
    error::Error,
    io,
    sync::mpsc::{self, Receiver, Sender},
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::client::AnalysisService;
use crate::model::{AmbiguousWord, AnalysisResult, HistoryEntry};
use crate::render::{layout_segments, segments, Segment, SegmentLayout};
use crate::session::{AnalysisSession, AnalyzeTicket, HistoryStore, SessionStatus};

mod theme;

use theme::TuiTheme;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);
const TOAST_DURATION: Duration = Duration::from_secs(2);
const DETAIL_OVERLAY_WIDTH: u16 = 44;
const CREATED_AT_COLUMN_CHARS: usize = 16;

/// Runs the interactive terminal UI against `service`.
///
/// `handle` must belong to a live tokio runtime; request futures are spawned
/// onto it while this (blocking) loop owns the terminal.
pub fn run(service: AnalysisService, handle: tokio::runtime::Handle) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(service);

    while !app.should_quit {
        for call in app.take_pending_calls() {
            dispatch_call(&app.service, &app.completion_tx, &handle, call);
        }
        app.drain_completions();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(EVENT_POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

/// A remote call the UI has decided to make; spawned by the run loop.
#[derive(Debug, Clone, PartialEq)]
enum ServiceCall {
    Analyze { ticket: AnalyzeTicket, text: String },
    LoadHistory,
}

/// The resolved outcome of a remote call, delivered back to the UI thread.
#[derive(Debug)]
enum Completion {
    Analyze { ticket: AnalyzeTicket, outcome: Result<AnalysisResult, String> },
    History { outcome: Result<Vec<HistoryEntry>, String> },
}

fn dispatch_call(
    service: &AnalysisService,
    completion_tx: &Sender<Completion>,
    handle: &tokio::runtime::Handle,
    call: ServiceCall,
) {
    let service = service.clone();
    let tx = completion_tx.clone();

    match call {
        ServiceCall::Analyze { ticket, text } => {
            handle.spawn(async move {
                let outcome = match service.analyze(&text).await {
                    Ok(result) => {
                        tracing::debug!(flagged = result.ambiguous.len(), "analyze call succeeded");
                        Ok(result)
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "analyze call failed");
                        Err(err.to_string())
                    }
                };
                let _ = tx.send(Completion::Analyze { ticket, outcome });
            });
        }
        ServiceCall::LoadHistory => {
            handle.spawn(async move {
                let outcome = match service.history().await {
                    Ok(entries) => {
                        tracing::debug!(entries = entries.len(), "history fetch succeeded");
                        Ok(entries)
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "history fetch failed");
                        Err(err.to_string())
                    }
                };
                let _ = tx.send(Completion::History { outcome });
            });
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Input,
    Text,
    History,
}

fn next_focus(focus: Focus) -> Focus {
    match focus {
        Focus::Input => Focus::Text,
        Focus::Text => Focus::History,
        Focus::History => Focus::Input,
    }
}

fn prev_focus(focus: Focus) -> Focus {
    match focus {
        Focus::Input => Focus::History,
        Focus::Text => Focus::Input,
        Focus::History => Focus::Text,
    }
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    session: AnalysisSession,
    history: HistoryStore,
    service: AnalysisService,
    focus: Focus,
    segments: Vec<Segment>,
    layout: SegmentLayout,
    text_inner: Option<Rect>,
    text_scroll: usize,
    hovered_position: Option<usize>,
    history_state: ListState,
    theme: TuiTheme,
    toast: Option<Toast>,
    pending_calls: Vec<ServiceCall>,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
    should_quit: bool,
}

impl App {
    fn new(service: AnalysisService) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel();
        let theme = TuiTheme::from_env().unwrap_or_default();

        Self {
            session: AnalysisSession::new(),
            history: HistoryStore::default(),
            service,
            focus: Focus::Input,
            segments: Vec::new(),
            layout: SegmentLayout::default(),
            text_inner: None,
            text_scroll: 0,
            hovered_position: None,
            history_state: ListState::default(),
            theme,
            toast: None,
            // The history list loads once at startup, like the result view
            // it feeds; a failure leaves it empty and is not fatal.
            pending_calls: vec![ServiceCall::LoadHistory],
            completion_tx,
            completion_rx,
            should_quit: false,
        }
    }

    fn take_pending_calls(&mut self) -> Vec<ServiceCall> {
        std::mem::take(&mut self.pending_calls)
    }

    fn drain_completions(&mut self) {
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply_completion(completion);
        }
    }

    fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Analyze { ticket, outcome } => {
                let failure = outcome.as_ref().err().cloned();
                if !self.session.complete_analyze(ticket, outcome) {
                    // Superseded by a later call or a history selection.
                    return;
                }
                match failure {
                    Some(message) => self.set_toast(format!("Analyze failed: {message}")),
                    None => {
                        self.hovered_position = None;
                        self.text_scroll = 0;
                    }
                }
            }
            Completion::History { outcome } => match outcome {
                Ok(entries) => {
                    self.history.replace(entries);
                    self.history_state.select(if self.history.is_empty() {
                        None
                    } else {
                        Some(0)
                    });
                }
                Err(message) => {
                    // Fail soft: prior contents stay (empty on first load).
                    self.set_toast(format!("History fetch failed: {message}"));
                }
            },
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = next_focus(self.focus);
                return;
            }
            KeyCode::BackTab => {
                self.focus = prev_focus(self.focus);
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Text => self.handle_text_key(key),
            Focus::History => self.handle_history_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.queue_analyze(),
            KeyCode::Backspace => {
                let mut text = self.session.working_text().to_owned();
                text.pop();
                self.session.set_working_text(text);
            }
            KeyCode::Char(ch) => {
                let mut text = self.session.working_text().to_owned();
                text.push(ch);
                self.session.set_working_text(text);
            }
            _ => {}
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up => self.text_scroll = self.text_scroll.saturating_sub(1),
            KeyCode::Down => {
                let max_scroll = self.layout.line_count().saturating_sub(1);
                self.text_scroll = (self.text_scroll + 1).min(max_scroll);
            }
            KeyCode::Right => self.cycle_hover(true),
            KeyCode::Left => self.cycle_hover(false),
            KeyCode::Esc => self.set_hover_target(None),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') => {
                self.pending_calls.push(ServiceCall::LoadHistory);
                self.set_toast("Reloading history");
            }
            KeyCode::Up => self.move_history_selection(false),
            KeyCode::Down => self.move_history_selection(true),
            KeyCode::Enter => self.select_history_entry(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Moved {
            return;
        }
        self.set_hover_target(self.pointer_target(mouse.column, mouse.row));
    }

    /// Translates an absolute cell position into a highlighted token
    /// position, accounting for the text panel's origin and scroll.
    fn pointer_target(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.text_inner?;
        let inside = column >= area.x
            && row >= area.y
            && column < area.x.saturating_add(area.width)
            && row < area.y.saturating_add(area.height);
        if !inside {
            return None;
        }

        let x = (column - area.x) as usize;
        let y = (row - area.y) as usize + self.text_scroll;
        self.layout.hit_test(x, y)
    }

    /// Applies a pointer target change as enter/leave transitions.
    ///
    /// Moving straight from one highlighted token to another leaves the old
    /// one and enters the new one in a single step.
    fn set_hover_target(&mut self, target: Option<usize>) {
        if target == self.hovered_position {
            return;
        }

        if let Some(previous) = self.hovered_position.take() {
            if let Some(annotation) = annotation_at(&self.segments, previous).cloned() {
                self.session.hover_leave(&annotation);
            }
        }

        if let Some(position) = target {
            if let Some(annotation) = annotation_at(&self.segments, position).cloned() {
                self.session.hover_enter(annotation);
                self.hovered_position = Some(position);
            }
        }
    }

    /// Keyboard stand-in for pointer hover: cycles across highlighted
    /// tokens in layout order.
    fn cycle_hover(&mut self, forward: bool) {
        let positions = self.layout.highlighted_positions();
        if positions.is_empty() {
            return;
        }

        let current = self
            .hovered_position
            .and_then(|position| positions.iter().position(|&p| p == position));
        let next = match current {
            Some(idx) if forward => positions[(idx + 1) % positions.len()],
            Some(idx) => positions[(idx + positions.len() - 1) % positions.len()],
            None if forward => positions[0],
            None => positions[positions.len() - 1],
        };
        self.set_hover_target(Some(next));
    }

    fn queue_analyze(&mut self) {
        let ticket = self.session.begin_analyze();
        self.pending_calls.push(ServiceCall::Analyze {
            ticket,
            text: self.session.working_text().to_owned(),
        });
    }

    fn move_history_selection(&mut self, down: bool) {
        let len = self.history.len();
        if len == 0 {
            return;
        }
        let current = self.history_state.selected().unwrap_or(0);
        let next = if down { (current + 1).min(len - 1) } else { current.saturating_sub(1) };
        self.history_state.select(Some(next));
    }

    fn select_history_entry(&mut self) {
        let Some(index) = self.history_state.selected() else {
            return;
        };
        let Some(entry) = self.history.get(index).cloned() else {
            return;
        };

        self.session.select_entry(&entry);
        self.hovered_position = None;
        self.text_scroll = 0;
        if entry.created_at.is_empty() {
            self.set_toast("Loaded analysis from history");
        } else {
            self.set_toast(format!("Loaded analysis from {}", entry.created_at));
        }
    }

    /// Recomputes the segment sequence and layout for the current session
    /// state at `width` cells.
    fn refresh_text_view(&mut self, width: usize) {
        self.segments = segments(self.session.working_text(), self.session.current_result());
        self.layout = layout_segments(&self.segments, width);
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    fn toast_suffix(&mut self) -> String {
        match &self.toast {
            Some(toast) if toast.expires_at > Instant::now() => format!(" | {}", toast.message),
            Some(_) => {
                self.toast = None;
                String::new()
            }
            None => String::new(),
        }
    }
}

fn annotation_at(segments: &[Segment], position: usize) -> Option<&AmbiguousWord> {
    segments
        .iter()
        .find(|segment| segment.position() == position)
        .and_then(Segment::annotation)
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let input_area = rows[0];
    let main_area = rows[1];
    let status_area = rows[2];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_area);
    let text_column = columns[0];
    let history_area = columns[1];

    let text_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(text_column);
    let score_area = text_rows[0];
    let text_area = text_rows[1];

    draw_input(frame, app, input_area);
    draw_score(frame, app, score_area);
    draw_text(frame, app, text_area);
    draw_history(frame, app, history_area);
    draw_footer(frame, app, status_area);
    draw_detail_overlay(frame, app, main_area);
}

fn draw_input(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Input;
    let title = if app.session.is_loading() { "Input (analyzing…)" } else { "Input" };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(app.theme.panel_border_style(focused));
    let inner = block.inner(area);

    // Single-line input with the tail kept visible; Enter analyzes, so the
    // working text never contains a newline.
    let len = app.session.working_text().chars().count();
    let width = inner.width as usize;
    let scroll_x = if width > 1 { len.saturating_sub(width - 1) } else { len };

    let paragraph = Paragraph::new(app.session.working_text().to_owned())
        .style(app.theme.base_style())
        .scroll((0, scroll_x as u16))
        .block(block);
    frame.render_widget(paragraph, area);

    if focused && inner.width > 0 && inner.height > 0 {
        let cursor_x = inner.x + (len - scroll_x) as u16;
        frame.set_cursor(cursor_x.min(inner.x + inner.width - 1), inner.y);
    }
}

fn draw_score(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let mut lines: Vec<Line<'static>> = Vec::new();

    match app.session.status() {
        SessionStatus::Error(message) => {
            lines.push(Line::styled(format!("Error: {message}"), app.theme.error_style()));
        }
        _ => match app.session.current_result() {
            Some(result) => lines.push(Line::from(vec![
                Span::styled("Ambiguity score: ", app.theme.dim_style()),
                Span::styled(result.ambiguity_score.to_string(), app.theme.title_style()),
            ])),
            None => lines.push(Line::styled("No analysis yet", app.theme.dim_style())),
        },
    }

    if let Some(result) = app.session.current_result() {
        if !result.context_keywords.is_empty() {
            lines.push(Line::styled(
                format!("Keywords: {}", result.context_keywords.join(", ")),
                app.theme.dim_style(),
            ));
        }
    }

    let block = Block::default().borders(Borders::ALL).title("Analysis");
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn draw_text(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Text;
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Highlighted Text")
        .border_style(app.theme.panel_border_style(focused));
    let inner = block.inner(area);
    app.text_inner = Some(inner);

    app.refresh_text_view(inner.width as usize);
    let max_scroll = app.layout.line_count().saturating_sub(inner.height as usize);
    if app.text_scroll > max_scroll {
        app.text_scroll = max_scroll;
    }

    let text = styled_text(&app.layout, app.hovered_position, &app.theme);
    let paragraph = Paragraph::new(text).block(block).scroll((app.text_scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

/// Paints layout lines with highlight backgrounds from the placements; the
/// hovered token gets a distinct emphasis.
fn styled_text(
    layout: &SegmentLayout,
    hovered_position: Option<usize>,
    theme: &TuiTheme,
) -> Text<'static> {
    let mut lines = Vec::with_capacity(layout.line_count());

    for (y, raw) in layout.lines().iter().enumerate() {
        let chars: Vec<char> = raw.chars().collect();

        let mut marks: Vec<(usize, usize, usize)> = Vec::new();
        for placed in layout.placed() {
            if !placed.is_highlighted() {
                continue;
            }
            for &(span_y, x0, x1) in placed.spans() {
                if span_y == y && x1 < chars.len() {
                    marks.push((x0, x1, placed.position()));
                }
            }
        }
        marks.sort_unstable();

        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut x = 0usize;
        for (x0, x1, position) in marks {
            if x < x0 {
                spans.push(Span::styled(
                    chars[x..x0].iter().collect::<String>(),
                    theme.base_style(),
                ));
            }
            let style = theme.highlight_style(hovered_position == Some(position));
            spans.push(Span::styled(chars[x0..=x1].iter().collect::<String>(), style));
            x = x1 + 1;
        }
        if x < chars.len() {
            spans.push(Span::styled(chars[x..].iter().collect::<String>(), theme.base_style()));
        }
        if spans.is_empty() {
            spans.push(Span::raw(String::new()));
        }

        lines.push(Line::from(spans));
    }

    Text::from(lines)
}

fn draw_history(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::History;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Recent Analyses ({})", app.history.len()))
        .border_style(app.theme.panel_border_style(focused));

    if app.history.is_empty() {
        let empty = Paragraph::new("No history yet").style(app.theme.dim_style()).block(block);
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem<'static>> = app
        .history
        .entries()
        .iter()
        .map(|entry| ListItem::new(history_row(entry, width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .style(app.theme.base_style())
        .highlight_style(app.theme.selection_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.history_state);
}

fn history_row(entry: &HistoryEntry, width: usize) -> String {
    let stamp = if entry.created_at.is_empty() {
        "—".to_owned()
    } else {
        truncate(&entry.created_at, CREATED_AT_COLUMN_CHARS)
    };
    let prefix = format!("{stamp}  {}  ", entry.ambiguity_score);
    let room = width.saturating_sub(prefix.chars().count() + 2);
    format!("{prefix}{}", truncate(&entry.text, room.max(8)))
}

fn draw_footer(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let toast_suffix = app.toast_suffix();
    let line = footer_line(app.focus, app.session.is_loading(), &toast_suffix, &app.theme);
    frame.render_widget(Paragraph::new(line), area);
}

fn footer_line(focus: Focus, loading: bool, toast_suffix: &str, theme: &TuiTheme) -> Line<'static> {
    let hints = match focus {
        Focus::Input => "Tab panes | Enter analyze | Ctrl-C quit",
        Focus::Text => "Tab panes | Left/Right details | Up/Down scroll | q quit",
        Focus::History => "Tab panes | Enter load | r reload | q quit",
    };
    let status = if loading { " | Analyzing…" } else { "" };
    Line::from(Span::styled(format!("{hints}{status}{toast_suffix}"), theme.dim_style()))
}

fn draw_detail_overlay(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let Some(annotation) = app.session.hover().active() else {
        return;
    };

    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::styled(annotation.word.clone(), app.theme.title_style()));
    lines.push(Line::from(format!("Meaning: {}", annotation.best_sense)));
    lines.push(Line::from(format!("Confidence: {}", annotation.confidence)));
    lines.push(Line::from(format!("Source: {}", annotation.decision_source)));
    if let Some(similarity) = annotation.fallback_similarity {
        lines.push(Line::from(format!("Similarity: {similarity}")));
    }
    if !annotation.senses.is_empty() {
        lines.push(Line::styled("Senses:", app.theme.dim_style()));
        for (idx, sense) in annotation.senses.iter().enumerate() {
            lines.push(Line::styled(format!("  {}. {sense}", idx + 1), app.theme.dim_style()));
        }
    }

    let width = area.width.min(DETAIL_OVERLAY_WIDTH);
    let height = (lines.len() as u16 + 2).min(area.height);
    if width < 4 || height < 3 {
        return;
    }
    let rect = Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - height,
        width,
        height,
    };

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Word Detail")
        .border_style(app.theme.detail_border_style());
    let detail = Paragraph::new(Text::from(lines))
        .style(app.theme.base_style())
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(detail, rect);
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
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
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
