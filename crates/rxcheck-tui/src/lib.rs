// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use rxcheck_app::{
    HeaderPosition, Invoice, InvoiceStatus, ItemField, LineItem, LineItemId, ReviewCommand,
    ReviewEvent, ReviewState, ViewerMode,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const LAYOUT_UNITS_PER_ROW: i64 = 32;

const GROUP_HEADER_LINES: usize = 2;
const VIEW_ITEM_LINES: usize = 3;
const EDIT_ITEM_LINES: usize = 9;

const VIEWER_COLLAPSED_PERCENT: u16 = 20;
const VIEWER_EXPANDED_PERCENT: u16 = 45;

const CHROME_ROWS: u16 = 2;

const EDIT_MARK: &str = "✎";
const ACTIVE_MARK: &str = "▶";

#[derive(Debug, Clone, PartialEq, Eq)]
enum DisplayRow {
    Header(usize),
    Item(LineItemId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewData {
    cursor: Option<LineItemId>,
    list_offset: usize,
    list_height: usize,
    field_index: usize,
    field_input: String,
    status_line: Option<String>,
    status_token: u64,
}

impl Default for ViewData {
    fn default() -> Self {
        Self {
            cursor: None,
            list_offset: 0,
            list_height: 20,
            field_index: 0,
            field_input: String::new(),
            status_line: None,
            status_token: 0,
        }
    }
}

pub fn run_app(state: &mut ReviewState) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view = ViewData {
        cursor: first_item_id(state),
        ..ViewData::default()
    };
    let (internal_tx, internal_rx) = mpsc::channel();

    let mut result = Ok(());
    loop {
        process_internal_events(&mut view, &internal_rx);

        let size = terminal.size().context("query terminal size")?;
        let split = size.height.saturating_sub(CHROME_ROWS);
        view.list_height = usize::from(pane_rows(split, state.viewer_mode()).1);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event
            && let Event::Key(key) = event::read().context("read event")?
            && handle_key_event(state, &mut view, &internal_tx, key)
        {
            break;
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(view: &mut ViewData, rx: &Receiver<InternalEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view.status_token => {
                view.status_line = None;
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    view: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    view.status_line = Some(message.into());
    view.status_token = view.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view.status_token);
}

fn handle_key_event(
    state: &mut ReviewState,
    view: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        if state.session().is_editing() {
            emit_status(view, internal_tx, "finish or cancel the edit first");
            return false;
        }
        return true;
    }

    if state.session().is_editing() {
        handle_edit_key(state, view, internal_tx, key);
        return false;
    }

    handle_nav_key(state, view, internal_tx, key)
}

fn handle_nav_key(
    state: &mut ReviewState,
    view: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => move_cursor(state, view, internal_tx, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(state, view, internal_tx, -1),
        KeyCode::Char('g') => jump_cursor(state, view, internal_tx, true),
        KeyCode::Char('G') => jump_cursor(state, view, internal_tx, false),
        KeyCode::Char('v') => match state.dispatch(ReviewCommand::ToggleViewer) {
            Ok(events) => report_events(view, internal_tx, &events),
            Err(error) => emit_status(view, internal_tx, format!("viewer toggle failed: {error}")),
        },
        KeyCode::Char('e') | KeyCode::Enter => start_edit_under_cursor(state, view, internal_tx),
        _ => {}
    }
    false
}

fn handle_edit_key(
    state: &mut ReviewState,
    view: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        match state.dispatch(ReviewCommand::CommitEdit) {
            Ok(_) => emit_status(view, internal_tx, "saved"),
            Err(error) => emit_status(view, internal_tx, format!("save failed: {error}")),
        }
        return;
    }

    match key.code {
        KeyCode::Esc => match state.dispatch(ReviewCommand::CancelEdit) {
            Ok(_) => emit_status(view, internal_tx, "edit cancelled"),
            Err(error) => emit_status(view, internal_tx, format!("cancel failed: {error}")),
        },
        KeyCode::Tab => focus_field(state, view, view.field_index + 1),
        KeyCode::BackTab => focus_field(state, view, view.field_index + ItemField::ALL.len() - 1),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            view.field_input.push(c);
            push_field_input(state, view, internal_tx);
        }
        KeyCode::Backspace => {
            view.field_input.pop();
            push_field_input(state, view, internal_tx);
        }
        _ => {}
    }
}

fn focus_field(state: &ReviewState, view: &mut ViewData, next: usize) {
    view.field_index = next % ItemField::ALL.len();
    view.field_input = state
        .session()
        .draft()
        .map(|draft| field_text(draft, ItemField::ALL[view.field_index]))
        .unwrap_or_default();
}

fn push_field_input(
    state: &mut ReviewState,
    view: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let field = ItemField::ALL[view.field_index];
    let command = ReviewCommand::UpdateDraftField(field, view.field_input.clone());
    if let Err(error) = state.dispatch(command) {
        emit_status(view, internal_tx, format!("edit failed: {error}"));
    }
}

fn start_edit_under_cursor(
    state: &mut ReviewState,
    view: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(target) = view.cursor else {
        emit_status(view, internal_tx, "no line item selected");
        return;
    };

    match state.dispatch(ReviewCommand::StartEdit(target)) {
        Ok(_) => {
            view.field_index = 0;
            view.field_input = state
                .session()
                .draft()
                .map(|draft| field_text(draft, ItemField::Name))
                .unwrap_or_default();
        }
        Err(error) => emit_status(view, internal_tx, format!("edit failed: {error}")),
    }
}

fn move_cursor(
    state: &mut ReviewState,
    view: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    delta: isize,
) {
    let items = item_ids(state);
    if items.is_empty() {
        return;
    }

    let current = view
        .cursor
        .and_then(|id| items.iter().position(|candidate| *candidate == id))
        .unwrap_or(0);
    let next = current
        .saturating_add_signed(delta)
        .min(items.len().saturating_sub(1));
    view.cursor = Some(items[next]);
    after_cursor_move(state, view, internal_tx);
}

fn jump_cursor(
    state: &mut ReviewState,
    view: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    to_start: bool,
) {
    let items = item_ids(state);
    let Some(target) = (if to_start { items.first() } else { items.last() }) else {
        return;
    };
    view.cursor = Some(*target);
    after_cursor_move(state, view, internal_tx);
}

fn after_cursor_move(
    state: &mut ReviewState,
    view: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    ensure_cursor_visible(state, view);
    let headers = header_positions(state, view.list_offset);
    match state.dispatch(ReviewCommand::OnScroll(headers)) {
        Ok(events) => report_events(view, internal_tx, &events),
        Err(error) => emit_status(view, internal_tx, format!("scroll failed: {error}")),
    }
}

fn report_events(view: &mut ViewData, internal_tx: &Sender<InternalEvent>, events: &[ReviewEvent]) {
    for event in events {
        match event {
            ReviewEvent::ActiveInvoiceChanged(id) => {
                emit_status(view, internal_tx, format!("viewing {id}"));
            }
            ReviewEvent::ViewerModeChanged(mode) => {
                emit_status(view, internal_tx, format!("image viewer {}", mode.label()));
            }
            _ => {}
        }
    }
}

fn ensure_cursor_visible(state: &ReviewState, view: &mut ViewData) {
    let Some(cursor) = view.cursor else {
        return;
    };

    let mut top = 0usize;
    for row in display_rows(state) {
        let height = row_height(state, &row);
        if row == DisplayRow::Item(cursor) {
            if top < view.list_offset {
                view.list_offset = top;
            } else if top + height > view.list_offset + view.list_height {
                view.list_offset = (top + height).saturating_sub(view.list_height);
            }
            return;
        }
        top += height;
    }
}

fn first_item_id(state: &ReviewState) -> Option<LineItemId> {
    item_ids(state).first().copied()
}

fn item_ids(state: &ReviewState) -> Vec<LineItemId> {
    state
        .groups_in_display_order()
        .iter()
        .flat_map(|(_, items)| items.iter().map(|item| item.id))
        .collect()
}

fn display_rows(state: &ReviewState) -> Vec<DisplayRow> {
    let mut rows = Vec::new();
    for (index, (_, items)) in state.groups_in_display_order().iter().enumerate() {
        rows.push(DisplayRow::Header(index));
        for item in items {
            rows.push(DisplayRow::Item(item.id));
        }
    }
    rows
}

fn row_height(state: &ReviewState, row: &DisplayRow) -> usize {
    match row {
        DisplayRow::Header(_) => GROUP_HEADER_LINES,
        DisplayRow::Item(id) if state.session().target() == Some(*id) => EDIT_ITEM_LINES,
        DisplayRow::Item(_) => VIEW_ITEM_LINES,
    }
}

fn header_positions(state: &ReviewState, list_offset: usize) -> Vec<HeaderPosition> {
    let groups = state.groups_in_display_order();
    let mut positions = Vec::with_capacity(groups.len());
    let mut top = 0i64;

    for (invoice, items) in groups {
        positions.push(HeaderPosition {
            invoice_id: invoice.id.clone(),
            top: (top - list_offset as i64) * LAYOUT_UNITS_PER_ROW,
        });
        top += GROUP_HEADER_LINES as i64;
        for item in items {
            top += row_height(state, &DisplayRow::Item(item.id)) as i64;
        }
    }
    positions
}

fn pane_rows(split_rows: u16, mode: ViewerMode) -> (u16, u16) {
    let viewer = match mode {
        ViewerMode::Hidden => 0,
        ViewerMode::Collapsed => split_rows * VIEWER_COLLAPSED_PERCENT / 100,
        ViewerMode::Expanded => split_rows * VIEWER_EXPANDED_PERCENT / 100,
    };
    (viewer, split_rows.saturating_sub(viewer))
}

fn format_money(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value < 0 {
        format!("-₩{grouped}")
    } else {
        format!("₩{grouped}")
    }
}

fn status_color(status: InvoiceStatus) -> Color {
    match status {
        InvoiceStatus::Completed => Color::Green,
        InvoiceStatus::Analyzing => Color::Blue,
        InvoiceStatus::Failed => Color::Red,
        InvoiceStatus::Pending => Color::DarkGray,
    }
}

fn field_text(draft: &LineItem, field: ItemField) -> String {
    match field {
        ItemField::Name => draft.name.clone(),
        ItemField::Standard => draft.standard.clone(),
        ItemField::Qty => draft.qty.to_string(),
        ItemField::Price => draft.price.to_string(),
        ItemField::Lot => draft.lot.clone(),
        ItemField::Expiry => draft
            .expiry
            .map(|date| date.to_string())
            .unwrap_or_default(),
        ItemField::Note => draft.note.clone(),
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &ReviewState, view: &ViewData) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_title(frame, chunks[0], state);
    render_split(frame, chunks[1], state, view);
    render_footer(frame, chunks[2], state, view);
}

fn render_title(frame: &mut ratatui::Frame<'_>, area: Rect, state: &ReviewState) {
    let groups = state.groups_in_display_order();
    let item_count: usize = groups.iter().map(|(_, items)| items.len()).sum();
    let title = Line::from(vec![
        Span::styled(
            " rxcheck ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "{} invoices · {} line items",
            groups.len(),
            item_count
        )),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_split(frame: &mut ratatui::Frame<'_>, area: Rect, state: &ReviewState, view: &ViewData) {
    let (viewer, _) = pane_rows(area.height, state.viewer_mode());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(viewer), Constraint::Min(0)])
        .split(area);

    if viewer > 0 {
        render_image_pane(frame, chunks[0], state);
    }
    render_list(frame, chunks[1], state, view);
}

fn render_image_pane(frame: &mut ratatui::Frame<'_>, area: Rect, state: &ReviewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" scanned invoice ");

    let lines = match state.active_invoice() {
        Some(invoice) => vec![
            Line::from(Span::styled(
                invoice.image_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(invoice.page_label.clone()),
            Line::from(vec![
                Span::styled(format!("{ACTIVE_MARK} "), Style::default().fg(Color::Cyan)),
                Span::raw(invoice.title.clone()),
                Span::raw("  "),
                Span::styled(
                    invoice.status.label(),
                    Style::default().fg(status_color(invoice.status)),
                ),
            ]),
        ],
        None => vec![Line::from("no invoice in view")],
    };

    frame.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center),
        area,
    );
}

fn render_list(frame: &mut ratatui::Frame<'_>, area: Rect, state: &ReviewState, view: &ViewData) {
    let mut lines: Vec<Line> = Vec::new();
    for (invoice, items) in state.groups_in_display_order() {
        lines.extend(group_header_lines(state, invoice));
        for item in items {
            if state.session().target() == Some(item.id) {
                lines.extend(edit_item_lines(state, view));
            } else {
                lines.extend(view_item_lines(state, view, item));
            }
        }
    }

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(view.list_offset)
        .take(usize::from(area.height))
        .collect();
    frame.render_widget(Paragraph::new(visible), area);
}

fn group_header_lines<'a>(state: &ReviewState, invoice: &'a Invoice) -> Vec<Line<'a>> {
    let active = state.active_invoice_id() == Some(&invoice.id);
    let marker = if active { ACTIVE_MARK } else { " " };
    vec![
        Line::from(vec![
            Span::styled(
                format!("{marker} {}", invoice.title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                invoice.status.label(),
                Style::default().fg(status_color(invoice.status)),
            ),
        ]),
        Line::from(Span::styled(
            format!("  total {}", format_money(invoice.total_amount)),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn view_item_lines<'a>(state: &ReviewState, view: &ViewData, item: &'a LineItem) -> Vec<Line<'a>> {
    let selected = view.cursor == Some(item.id) && !state.session().is_editing();
    let dimmed = state.session().is_editing();

    let base = if dimmed {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let name_style = if selected {
        base.add_modifier(Modifier::REVERSED)
    } else {
        base.add_modifier(Modifier::BOLD)
    };

    let lot = if item.lot_missing() {
        Span::styled("lot -", base.fg(Color::Yellow))
    } else {
        Span::styled(format!("lot {}", item.lot), base)
    };
    let expiry = item
        .expiry
        .map(|date| date.to_string())
        .unwrap_or_else(|| "-".to_owned());

    vec![
        Line::from(vec![
            Span::styled(format!("  {} ", item.name), name_style),
            Span::styled(EDIT_MARK, base.fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            format!(
                "    {} · qty {} · price {} · amount {}",
                item.standard,
                item.qty,
                format_money(item.price),
                format_money(item.amount()),
            ),
            base,
        )),
        Line::from(vec![
            Span::styled(format!("    expiry {expiry} · "), base),
            lot,
            Span::styled(
                format!(
                    " · note {}",
                    if item.note.is_empty() { "-" } else { &item.note }
                ),
                base,
            ),
        ]),
    ]
}

fn edit_item_lines(state: &ReviewState, view: &ViewData) -> Vec<Line<'static>> {
    let Some(draft) = state.session().draft() else {
        return Vec::new();
    };

    let mut lines = vec![Line::from(Span::styled(
        format!("  {EDIT_MARK} editing: {}", draft.name),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))];

    for (index, field) in ItemField::ALL.into_iter().enumerate() {
        let focused = index == view.field_index;
        let value = if focused {
            view.field_input.clone()
        } else {
            field_text(draft, field)
        };
        let style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let rendered = if field.is_numeric() {
            format!("    {:<8} {value:>12}", field.label())
        } else {
            format!("    {:<8} {value}", field.label())
        };
        lines.push(Line::from(Span::styled(rendered, style)));
    }

    let (amount, tax) = state.session().draft_totals().unwrap_or((0, 0));
    lines.push(Line::from(Span::styled(
        format!(
            "    amount {} · tax {}",
            format_money(amount),
            format_money(tax)
        ),
        Style::default().fg(Color::Green),
    )));
    lines
}

fn render_footer(frame: &mut ratatui::Frame<'_>, area: Rect, state: &ReviewState, view: &ViewData) {
    let text = match &view.status_line {
        Some(status) => status.clone(),
        None if state.session().is_editing() => {
            " type to edit · tab next field · ctrl-s save · esc cancel".to_owned()
        }
        None => " j/k move · e edit · v image · g/G jump · q quit".to_owned(),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        ))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::{
        DisplayRow, EDIT_ITEM_LINES, GROUP_HEADER_LINES, LAYOUT_UNITS_PER_ROW, VIEW_ITEM_LINES,
        ViewData, display_rows, ensure_cursor_visible, field_text, first_item_id, format_money,
        handle_key_event, header_positions, item_ids, pane_rows, row_height,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rxcheck_app::{InvoiceId, ItemField, ReviewCommand, ReviewState, ViewerMode};
    use rxcheck_testkit::InvoiceFaker;
    use std::sync::mpsc;

    fn state() -> ReviewState {
        ReviewState::new(InvoiceFaker::new(42).ledger(3, 4))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn press(state: &mut ReviewState, view: &mut ViewData, events: &[KeyEvent]) {
        let (tx, _rx) = mpsc::channel();
        for event in events {
            handle_key_event(state, view, &tx, *event);
        }
    }

    #[test]
    fn display_rows_interleave_headers_and_items() {
        let state = state();
        let rows = display_rows(&state);
        assert_eq!(rows.len(), 3 + 12);
        assert_eq!(rows[0], DisplayRow::Header(0));
        assert!(matches!(rows[1], DisplayRow::Item(_)));
        assert_eq!(rows[5], DisplayRow::Header(1));
    }

    #[test]
    fn row_heights_grow_for_the_row_under_edit() {
        let mut state = state();
        let first = first_item_id(&state).expect("first item");
        let row = DisplayRow::Item(first);
        assert_eq!(row_height(&state, &row), VIEW_ITEM_LINES);

        state
            .dispatch(ReviewCommand::StartEdit(first))
            .expect("start edit");
        assert_eq!(row_height(&state, &row), EDIT_ITEM_LINES);
    }

    #[test]
    fn header_positions_track_the_list_offset() {
        let state = state();
        let positions = header_positions(&state, 0);
        assert_eq!(positions.len(), 3);
        assert_eq!(positions[0].top, 0);

        let group_lines = (GROUP_HEADER_LINES + 4 * VIEW_ITEM_LINES) as i64;
        assert_eq!(positions[1].top, group_lines * LAYOUT_UNITS_PER_ROW);

        let scrolled = header_positions(&state, 5);
        assert_eq!(scrolled[0].top, -5 * LAYOUT_UNITS_PER_ROW);
        assert_eq!(scrolled[1].top, (group_lines - 5) * LAYOUT_UNITS_PER_ROW);
    }

    #[test]
    fn scrolling_past_a_group_switches_the_active_invoice() {
        let mut state = state();
        let mut view = ViewData {
            cursor: first_item_id(&state),
            list_height: 10,
            ..ViewData::default()
        };
        assert_eq!(
            state.active_invoice_id(),
            Some(&InvoiceId::new("INV-2026-001"))
        );

        press(&mut state, &mut view, &[key(KeyCode::Char('G'))]);
        assert_eq!(
            state.active_invoice_id(),
            Some(&InvoiceId::new("INV-2026-003"))
        );

        press(&mut state, &mut view, &[key(KeyCode::Char('g'))]);
        assert_eq!(
            state.active_invoice_id(),
            Some(&InvoiceId::new("INV-2026-001"))
        );
    }

    #[test]
    fn cursor_movement_clamps_at_both_ends() {
        let mut state = state();
        let items = item_ids(&state);
        let mut view = ViewData {
            cursor: first_item_id(&state),
            ..ViewData::default()
        };

        press(&mut state, &mut view, &[key(KeyCode::Char('k'))]);
        assert_eq!(view.cursor, Some(items[0]));

        for _ in 0..40 {
            press(&mut state, &mut view, &[key(KeyCode::Char('j'))]);
        }
        assert_eq!(view.cursor, items.last().copied());
    }

    #[test]
    fn ensure_cursor_visible_scrolls_down_and_back_up() {
        let state = state();
        let items = item_ids(&state);
        let mut view = ViewData {
            cursor: items.last().copied(),
            list_height: 8,
            ..ViewData::default()
        };

        ensure_cursor_visible(&state, &mut view);
        assert!(view.list_offset > 0);

        view.cursor = Some(items[0]);
        ensure_cursor_visible(&state, &mut view);
        assert_eq!(view.list_offset, GROUP_HEADER_LINES);
    }

    #[test]
    fn viewer_toggle_key_round_trips() {
        let mut state = state();
        let mut view = ViewData::default();

        press(&mut state, &mut view, &[key(KeyCode::Char('v'))]);
        assert_eq!(state.viewer_mode(), ViewerMode::Hidden);
        press(&mut state, &mut view, &[key(KeyCode::Char('v'))]);
        assert_eq!(state.viewer_mode(), ViewerMode::Expanded);
    }

    #[test]
    fn edit_keys_drive_a_full_session() {
        let mut state = state();
        let target = first_item_id(&state).expect("first item");
        let mut view = ViewData {
            cursor: Some(target),
            ..ViewData::default()
        };

        press(&mut state, &mut view, &[key(KeyCode::Char('e'))]);
        assert!(state.session().is_editing());
        assert_eq!(state.viewer_mode(), ViewerMode::Collapsed);

        press(&mut state, &mut view, &[key(KeyCode::Tab), key(KeyCode::Tab)]);
        assert_eq!(ItemField::ALL[view.field_index], ItemField::Qty);
        for _ in 0..4 {
            press(&mut state, &mut view, &[key(KeyCode::Backspace)]);
        }
        press(
            &mut state,
            &mut view,
            &[key(KeyCode::Char('7')), key(KeyCode::Char('7'))],
        );
        assert_eq!(state.session().draft().expect("draft").qty, 77);

        press(&mut state, &mut view, &[ctrl('s')]);
        assert!(!state.session().is_editing());
        assert_eq!(state.ledger().item(target).expect("item").qty, 77);
    }

    #[test]
    fn escape_cancels_without_touching_the_ledger() {
        let mut state = state();
        let target = first_item_id(&state).expect("first item");
        let before = state.ledger().clone();
        let mut view = ViewData {
            cursor: Some(target),
            ..ViewData::default()
        };

        press(
            &mut state,
            &mut view,
            &[
                key(KeyCode::Char('e')),
                key(KeyCode::Char('x')),
                key(KeyCode::Esc),
            ],
        );
        assert!(!state.session().is_editing());
        assert_eq!(state.ledger(), &before);
    }

    #[test]
    fn quit_is_refused_while_a_draft_is_open() {
        let mut state = state();
        let target = first_item_id(&state).expect("first item");
        let mut view = ViewData {
            cursor: Some(target),
            ..ViewData::default()
        };
        let (tx, _rx) = mpsc::channel();

        handle_key_event(&mut state, &mut view, &tx, key(KeyCode::Char('e')));
        assert!(!handle_key_event(&mut state, &mut view, &tx, ctrl('q')));
        assert!(
            state.session().is_editing(),
            "draft survives the quit attempt"
        );

        handle_key_event(&mut state, &mut view, &tx, key(KeyCode::Esc));
        assert!(handle_key_event(&mut state, &mut view, &tx, ctrl('q')));
    }

    #[test]
    fn pane_rows_follow_the_viewer_mode() {
        let (viewer, list) = pane_rows(38, ViewerMode::Hidden);
        assert_eq!(viewer, 0);
        assert_eq!(list, 38);

        let (viewer, list) = pane_rows(38, ViewerMode::Collapsed);
        assert_eq!(viewer, 7);
        assert_eq!(list, 31);

        let (viewer, list) = pane_rows(38, ViewerMode::Expanded);
        assert_eq!(viewer, 17);
        assert_eq!(list, 21);
    }

    #[test]
    fn money_formatting_groups_thousands() {
        assert_eq!(format_money(0), "₩0");
        assert_eq!(format_money(800), "₩800");
        assert_eq!(format_money(36_364), "₩36,364");
        assert_eq!(format_money(1_234_567), "₩1,234,567");
        assert_eq!(format_money(-5_000), "-₩5,000");
    }

    #[test]
    fn field_text_projects_every_field() {
        let state = state();
        let item = state
            .ledger()
            .item(first_item_id(&state).expect("first item"))
            .expect("item")
            .clone();

        assert_eq!(field_text(&item, ItemField::Name), item.name);
        assert_eq!(field_text(&item, ItemField::Qty), item.qty.to_string());
        let expiry = field_text(&item, ItemField::Expiry);
        match item.expiry {
            Some(date) => assert_eq!(expiry, date.to_string()),
            None => assert!(expiry.is_empty()),
        }
    }
}
