use crate::calc::dates::{self, WeekStart};
use crate::calc::grid::{build_grid, fit_entries, DayCell};
use crate::calc::view::{ViewMode, ViewState};
use crate::data::ScheduleMap;
use crate::ui::editor::EditorState;
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::Duration as StdDuration;

const SELECTED_COLOR: Color = Color::Yellow;
const ENTRY_COLOR: Color = Color::Cyan;
const PLACEHOLDER: &str = "Enter your schedule";

pub struct App {
    view: ViewState,
    week_start: WeekStart,
    schedule: ScheduleMap,
    editor: EditorState,
    /// Day cell under the cursor. Always one of the displayed days.
    selected_date: NaiveDate,
    /// Entry of `selected_date` under the cursor; None selects the cell itself.
    selected_entry: Option<usize>,
    today: NaiveDate,
}

impl App {
    pub fn new(anchor: NaiveDate, mode: ViewMode, week_start: WeekStart, today: NaiveDate) -> Self {
        App {
            view: ViewState::new(anchor, mode),
            week_start,
            schedule: ScheduleMap::default(),
            editor: EditorState::default(),
            selected_date: anchor,
            selected_entry: None,
            today,
        }
    }

    pub fn schedule(&self) -> &ScheduleMap {
        &self.schedule
    }

    fn visible_days(&self) -> Vec<NaiveDate> {
        self.view.visible_days(self.week_start)
    }

    /// Keeps the cursor on a displayed day after the view changed.
    fn sync_selection(&mut self) {
        if !self.visible_days().contains(&self.selected_date) {
            self.selected_date = self.view.anchor;
            self.selected_entry = None;
        }
    }

    fn move_selection(&mut self, days: i64) {
        let Some(target) = self.selected_date.checked_add_signed(Duration::days(days)) else {
            return;
        };
        if self.visible_days().contains(&target) {
            self.selected_date = target;
            self.selected_entry = None;
        }
    }

    fn cycle_entry(&mut self, forward: bool) {
        let count = self.schedule.entries(self.selected_date).len();
        self.selected_entry = match (count, self.selected_entry, forward) {
            (0, _, _) => None,
            (_, None, true) => Some(0),
            (_, None, false) => Some(count - 1),
            (_, Some(i), true) if i + 1 < count => Some(i + 1),
            (_, Some(i), false) if i > 0 => Some(i - 1),
            _ => None,
        };
    }

    /// Drops an entry selection that no longer points at an entry.
    fn clamp_entry_selection(&mut self) {
        let count = self.schedule.entries(self.selected_date).len();
        if self.selected_entry.is_some_and(|i| i >= count) {
            self.selected_entry = None;
        }
    }

    fn open_selected(&mut self) {
        match self.selected_entry {
            Some(index) => self
                .editor
                .open_edit(&self.schedule, self.selected_date, index),
            None => self.editor.open_create(self.selected_date),
        }
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.editor.is_open() {
            return self.handle_editor_key(code, modifiers);
        }

        match code {
            KeyCode::Left => self.move_selection(-1),
            KeyCode::Right => self.move_selection(1),
            KeyCode::Up => self.move_selection(-7),
            KeyCode::Down => self.move_selection(7),
            KeyCode::Tab => self.cycle_entry(true),
            KeyCode::BackTab => self.cycle_entry(false),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('a') => self.editor.open_create(self.selected_date),
            KeyCode::Char('n') => {
                self.view.go_to_next();
                self.sync_selection();
            }
            KeyCode::Char('p') => {
                self.view.go_to_previous();
                self.sync_selection();
            }
            KeyCode::Char('v') => {
                self.view.toggle_view_mode();
                self.sync_selection();
            }
            KeyCode::Char('t') => {
                self.view.go_to_today(self.today);
                self.selected_date = self.today;
                self.selected_entry = None;
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('q') => return true,
            _ => {}
        }
        false
    }

    /// Returns true on Ctrl+C, which discards the draft and quits.
    fn handle_editor_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.editor.close();
                return true;
            }
            KeyCode::Esc => self.editor.close(),
            KeyCode::Enter => {
                self.editor.submit(&mut self.schedule);
                self.clamp_entry_selection();
            }
            KeyCode::Delete => {
                self.editor.delete(&mut self.schedule);
                self.clamp_entry_selection();
            }
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.editor.delete(&mut self.schedule);
                self.clamp_entry_selection();
            }
            KeyCode::Backspace => self.editor.pop_char(),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.editor.push_char(c);
            }
            _ => {}
        }
        false
    }

    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // header
                Constraint::Min(8),    // day grid
                Constraint::Length(6), // status + key help
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_grid(f, chunks[1]);
        self.render_help(f, chunks[2]);

        if self.editor.is_open() {
            let popup = centered_rect(60, 40, f.area());
            self.render_editor(f, popup);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("[v] {}", self.view.toggle_label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(vec![
                Span::raw("< Previous   "),
                Span::styled(
                    self.view.title(),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ),
                Span::raw("   Next >"),
            ]),
        ];
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    fn render_grid(&self, f: &mut Frame, area: Rect) {
        let cells = build_grid(&self.view, self.week_start, &self.schedule, self.today);
        let Some(first) = cells.first() else {
            return;
        };

        let (grid_area, offset) = match self.view.mode {
            ViewMode::Month => {
                let parts = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Min(0)])
                    .split(area);
                let labels = self.week_start.header_labels();
                for (col, rect) in split_columns(parts[0]).iter().enumerate() {
                    f.render_widget(
                        Paragraph::new(labels[col])
                            .alignment(Alignment::Center)
                            .style(Style::default().add_modifier(Modifier::BOLD)),
                        *rect,
                    );
                }
                (parts[1], self.week_start.column_of(first.date))
            }
            ViewMode::Week => (area, 0),
        };

        let row_count = (offset + cells.len()).div_ceil(7);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, row_count as u32); row_count])
            .split(grid_area);

        for (i, cell) in cells.iter().enumerate() {
            let slot = offset + i;
            let rect = split_columns(rows[slot / 7])[slot % 7];
            let selected = cell.date == self.selected_date;
            let entry = if selected { self.selected_entry } else { None };
            render_day_cell(f, rect, cell, selected, entry);
        }
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let totals = if self.schedule.is_empty() {
            "no entries".to_string()
        } else {
            format!(
                "{} entr{} on {} day{}",
                self.schedule.total_entries(),
                if self.schedule.total_entries() == 1 { "y" } else { "ies" },
                self.schedule.len_days(),
                if self.schedule.len_days() == 1 { "" } else { "s" },
            )
        };
        let status = format!(
            "{}  |  {}",
            dates::format_date(self.selected_date, dates::LONG_DATE_FORMAT),
            totals
        );
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                status,
                Style::default().add_modifier(Modifier::DIM),
            ))),
            chunks[0],
        );

        let key_rows: Vec<Row> = vec![
            Row::new(vec!["← → ↑ ↓", "Move day", "Tab", "Select entry"]),
            Row::new(vec!["Enter", "Open entry / new", "a", "New entry"]),
            Row::new(vec!["n / p", "Next/prev", "v", self.view.toggle_label()]),
            Row::new(vec!["t", "Today", "q/Ctrl+C", "Quit"]),
        ];
        let help_table = Table::new(
            key_rows,
            [
                Constraint::Length(10),
                Constraint::Length(20),
                Constraint::Length(10),
                Constraint::Length(20),
            ],
        )
        .block(Block::default().borders(Borders::NONE))
        .column_spacing(1);
        f.render_widget(help_table, chunks[1]);
    }

    fn render_editor(&self, f: &mut Frame, area: Rect) {
        f.render_widget(Clear, area);

        let input = if self.editor.draft.is_empty() {
            Line::from(vec![
                Span::raw("> "),
                Span::styled(PLACEHOLDER, Style::default().add_modifier(Modifier::DIM)),
            ])
        } else {
            Line::from(format!("> {}_", self.editor.draft))
        };

        let mut actions = vec![Span::styled(
            format!("[Enter] {}", self.editor.submit_label()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )];
        if self.editor.is_editing() {
            actions.push(Span::raw("   "));
            actions.push(Span::styled(
                "[Del] Delete",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        actions.push(Span::raw("   "));
        actions.push(Span::styled("[Esc] Close", Style::default().fg(Color::DarkGray)));

        let body = Paragraph::new(vec![input, Line::from(""), Line::from(actions)]).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    self.editor.title(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        );
        f.render_widget(body, area);
    }
}

fn render_day_cell(
    f: &mut Frame,
    area: Rect,
    cell: &DayCell,
    selected: bool,
    selected_entry: Option<usize>,
) {
    let border_style = if selected {
        Style::default().fg(SELECTED_COLOR).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if cell.is_today {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::TOP | Borders::LEFT)
        .border_style(border_style)
        .title(Span::styled(cell.label.clone(), title_style));
    let window = fit_entries(
        cell.entries.len(),
        block.inner(area).height as usize,
        selected_entry,
    );

    let mut lines: Vec<Line> = cell
        .entries
        .iter()
        .enumerate()
        .skip(window.start)
        .take(window.shown)
        .map(|(i, text)| {
            let style = if selected_entry == Some(i) {
                Style::default().fg(Color::Black).bg(ENTRY_COLOR)
            } else {
                Style::default().fg(ENTRY_COLOR)
            };
            if text.is_empty() {
                Line::from(Span::styled("(blank)", style.add_modifier(Modifier::DIM)))
            } else {
                Line::from(Span::styled(text.clone(), style))
            }
        })
        .collect();
    if let Some(more) = window.hint {
        lines.push(Line::from(Span::styled(
            more,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn split_columns(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, 7); 7])
        .split(area)
        .to_vec()
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}
