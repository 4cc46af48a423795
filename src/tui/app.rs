//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct, the root of the presentation layer.
//! It owns the task list and the per-row edit states, renders one card per
//! task, and turns key presses and mouse clicks into list intents.

use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{debug, info};

use crate::error::Result;
use crate::list::{Intent, TaskList};
use crate::task::{Direction, Field, Task, TaskId};
use crate::tui::{
    colors::{ACCENT, DARK_RED, SLATE, TEAL},
    enums::{AppState, EditMode, Hit},
    row::RowState,
    utils::{centered_rect, rect_contains},
};

/// Height of one task card, borders included.
const CARD_HEIGHT: u16 = 5;
const EMPTY_PLACEHOLDER: &str = "Consider adding some tasks!";

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    list: TaskList,
    rows: HashMap<TaskId, RowState>,
    selected: usize,
    scroll: usize,
    status_message: String,
    hits: Vec<(Rect, Hit)>,
    host_rx: Option<Receiver<String>>,
    tick_rate: Duration,
}

impl App {
    /// Create an App with an empty task list.
    pub fn new(tick_rate: Duration) -> Self {
        App {
            state: AppState::TaskList,
            list: TaskList::new(),
            rows: HashMap::new(),
            selected: 0,
            scroll: 0,
            status_message: String::new(),
            hits: Vec::new(),
            host_rx: None,
            tick_rate,
        }
    }

    /// Attach the channel on which the host shell posts lifecycle messages.
    pub fn with_host_channel(mut self, rx: Receiver<String>) -> Self {
        self.host_rx = Some(rx);
        self
    }

    /// Consume the app, returning the final task list.
    pub fn into_list(self) -> TaskList {
        self.list
    }

    /// Log any pending host messages. They carry no instructions for the UI.
    fn drain_host_messages(&mut self) {
        if let Some(rx) = &self.host_rx {
            while let Ok(message) = rx.try_recv() {
                info!(%message, "host message");
            }
        }
    }

    /// Replace the list with the result of `intent` and drop state for removed rows.
    fn dispatch(&mut self, intent: Intent) {
        self.list = self.list.apply(&intent);
        let list = &self.list;
        self.rows.retain(|id, _| list.index_of(*id).is_some());
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        if self.list.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.list.len() {
            self.selected = self.list.len() - 1;
        }
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// The row currently in an editing state, if any.
    fn editing_row(&self) -> Option<TaskId> {
        self.rows
            .iter()
            .find(|(_, row)| row.is_editing())
            .map(|(id, _)| *id)
    }

    /// Return every editing row to Idle.
    fn finish_editing(&mut self) {
        for row in self.rows.values_mut() {
            row.finish();
        }
    }

    /// Start editing `field` of the task at `index`. Focus leaves any other row.
    fn begin_edit(&mut self, index: usize, field: Field) {
        let Some(task) = self.list.get(index) else {
            return;
        };
        let id = task.id;
        for (row_id, row) in self.rows.iter_mut() {
            if *row_id != id {
                row.finish();
            }
        }
        let row = self.rows.entry(id).or_default();
        match field {
            Field::Name => row.click_name(task),
            Field::Description => row.click_description(task),
        }
        self.selected = index;
    }

    fn create_task(&mut self) {
        self.dispatch(Intent::Create);
        self.selected = self.list.len() - 1;
        self.set_status_message("Task added".to_string());
    }

    fn toggle_selected(&mut self) {
        if let Some(task) = self.list.get(self.selected) {
            let done = !task.completed;
            self.dispatch(Intent::ToggleComplete(self.selected));
            let msg = if done { "Task marked as completed" } else { "Task marked as open" };
            self.set_status_message(msg.to_string());
        }
    }

    fn delete_selected(&mut self) {
        if self.selected < self.list.len() {
            self.dispatch(Intent::Delete(self.selected));
            self.set_status_message("Task deleted".to_string());
        }
    }

    /// Move the selected task one step. The selection follows the task.
    fn move_selected(&mut self, direction: Direction) {
        if self.list.is_empty() {
            return;
        }
        match direction.neighbor(self.selected, self.list.len()) {
            Some(target) => {
                self.dispatch(Intent::Move(self.selected, direction));
                self.selected = target;
            }
            None => {
                let edge = match direction {
                    Direction::Up => "top",
                    Direction::Down => "bottom",
                };
                self.set_status_message(format!("Already at the {edge}"));
            }
        }
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.list.len() {
            self.selected += 1;
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Handle a single terminal event.
    ///
    /// Returns true if the application should quit.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.clear_status_message();
                self.handle_key(key)
            }
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                false
            }
            Event::FocusLost => {
                self.finish_editing();
                false
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        if self.state == AppState::Help {
            self.state = AppState::TaskList;
            return false;
        }
        if let Some(id) = self.editing_row() {
            self.handle_edit_key(id, key);
            return false;
        }
        self.handle_task_list_input(key)
    }

    /// Handle keyboard input when in the task list view.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input(&mut self, key: KeyEvent) -> bool {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        if is_chord(&key) {
            return false;
        }
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('K') => self.move_selected(Direction::Up),
            KeyCode::Char('J') => self.move_selected(Direction::Down),
            KeyCode::Up if shift => self.move_selected(Direction::Up),
            KeyCode::Down if shift => self.move_selected(Direction::Down),
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char('g') | KeyCode::Home => self.selected = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = self.list.len().saturating_sub(1);
            }
            KeyCode::Char('a') | KeyCode::Char('+') => self.create_task(),
            KeyCode::Char(' ') | KeyCode::Char('c') => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Enter | KeyCode::Char('e') => self.begin_edit(self.selected, Field::Name),
            KeyCode::Char('E') => self.begin_edit(self.selected, Field::Description),
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    /// Handle a key while a row is editing. Text changes are committed on every keystroke.
    fn handle_edit_key(&mut self, id: TaskId, key: KeyEvent) {
        let Some(index) = self.list.index_of(id) else {
            self.rows.remove(&id);
            return;
        };
        let task = self.list.get(index).cloned();
        let Some(row) = self.rows.get_mut(&id) else {
            return;
        };
        let changed = match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                row.finish();
                false
            }
            KeyCode::Tab | KeyCode::BackTab => {
                if let Some(task) = &task {
                    row.switch_field(task);
                }
                false
            }
            KeyCode::Char(_) if is_chord(&key) => false,
            KeyCode::Char(c) => {
                row.input_mut().handle_char(c);
                true
            }
            KeyCode::Backspace => row.input_mut().handle_backspace(),
            KeyCode::Delete => row.input_mut().handle_delete(),
            KeyCode::Left => {
                row.input_mut().move_cursor_left();
                false
            }
            KeyCode::Right => {
                row.input_mut().move_cursor_right();
                false
            }
            KeyCode::Home => {
                row.input_mut().move_home();
                false
            }
            KeyCode::End => {
                row.input_mut().move_end();
                false
            }
            _ => false,
        };
        if !changed {
            return;
        }
        if let Some(field) = row.mode().field() {
            let value = row.input().value.clone();
            self.dispatch(Intent::EditField(index, field, value));
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            MouseEventKind::ScrollDown => self.select_next(),
            MouseEventKind::ScrollUp => self.select_prev(),
            _ => {}
        }
    }

    /// Resolve a click against the hit map of the last frame.
    fn click(&mut self, column: u16, row: u16) {
        if self.state == AppState::Help {
            self.state = AppState::TaskList;
            return;
        }
        let hit = self
            .hits
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
            .map(|(_, hit)| *hit);

        // A click anywhere but the active input takes focus away from it.
        if let Some(editing) = self.editing_row() {
            let mode = self.rows.get(&editing).map(RowState::mode);
            let on_input = matches!(
                (hit, mode),
                (Some(Hit::Name(id)), Some(EditMode::EditingName))
                    | (Some(Hit::Description(id)), Some(EditMode::EditingDescription))
                    if id == editing
            );
            if !on_input {
                self.finish_editing();
            }
        }

        let Some(hit) = hit else {
            return;
        };
        debug!(?hit, column, row, "click");
        if hit == Hit::Add {
            self.create_task();
            return;
        }
        let Some(index) = hit.task().and_then(|id| self.list.index_of(id)) else {
            return;
        };
        self.selected = index;
        match hit {
            Hit::Name(_) => self.begin_edit(index, Field::Name),
            Hit::Description(_) => self.begin_edit(index, Field::Description),
            Hit::Toggle(_) => self.toggle_selected(),
            Hit::Delete(_) => self.delete_selected(),
            Hit::MoveUp(_) => self.move_selected(Direction::Up),
            Hit::MoveDown(_) => self.move_selected(Direction::Down),
            Hit::Card(_) | Hit::Add => {}
        }
    }

    /// Render the header line with task counts.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let counts = format!(
            "{} tasks, {} done",
            self.list.len(),
            self.list.completed_count()
        );
        let header = Paragraph::new(Line::from(vec![
            Span::styled("TASK LIST", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                counts,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .style(Style::default().bg(SLATE).fg(Color::White))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Render the visible task cards, or the placeholder when the list is empty.
    fn render_tasks(&mut self, f: &mut Frame, area: Rect) {
        if self.list.is_empty() {
            let placeholder = Paragraph::new(EMPTY_PLACEHOLDER)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                )
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            let height = CARD_HEIGHT.min(area.height);
            f.render_widget(placeholder, Rect { height, ..area });
            return;
        }

        let visible = usize::from(area.height / CARD_HEIGHT).max(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }
        self.scroll = self.scroll.min(self.list.len().saturating_sub(visible));

        let bottom = area.y + area.height;
        for (slot, index) in (self.scroll..self.list.len()).take(visible).enumerate() {
            let y = area.y + slot as u16 * CARD_HEIGHT;
            if y >= bottom {
                break;
            }
            let rect = Rect {
                x: area.x,
                y,
                width: area.width,
                height: CARD_HEIGHT.min(bottom - y),
            };
            self.render_card(f, rect, index);
        }
    }

    /// Render one task card and record its clickable regions.
    fn render_card(&mut self, f: &mut Frame, rect: Rect, index: usize) {
        let Some(task) = self.list.get(index).cloned() else {
            return;
        };
        let is_top = self.list.is_top(index);
        let is_bottom = self.list.is_bottom(index);
        let border = if index == self.selected { ACCENT } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        let columns = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Length(5), // ▲ / badge / ▼
                Constraint::Length(6), // delete
                Constraint::Min(10),   // name and description
                Constraint::Length(7), // completion toggle
            ])
            .split(inner);

        if !is_top {
            self.render_control(f, columns[0], 0, "▲", Style::default().fg(Color::Gray), Hit::MoveUp(task.id));
        }
        if let Some(line) = line_of(columns[0], 1) {
            let badge = Paragraph::new(task.badge())
                .style(Style::default().add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center);
            f.render_widget(badge, line);
        }
        if !is_bottom {
            self.render_control(f, columns[0], 2, "▼", Style::default().fg(Color::Gray), Hit::MoveDown(task.id));
        }

        self.render_control(f, columns[1], 1, "[del]", Style::default().fg(Color::White).bg(DARK_RED), Hit::Delete(task.id));

        let mode = self.rows.get(&task.id).map(RowState::mode).unwrap_or_default();
        let mut name_style = Style::default().add_modifier(Modifier::BOLD);
        let mut desc_style = Style::default().fg(Color::DarkGray);
        if task.completed {
            name_style = name_style.add_modifier(Modifier::CROSSED_OUT);
            desc_style = desc_style.add_modifier(Modifier::ITALIC);
        }
        self.render_text_line(f, columns[2], 0, &task, Field::Name, mode, name_style);
        self.render_text_line(f, columns[2], 1, &task, Field::Description, mode, desc_style);

        let (toggle, toggle_style) = if task.completed {
            ("[ ✗ ]", Style::default().fg(Color::Yellow))
        } else {
            ("[ ✓ ]", Style::default().fg(TEAL))
        };
        self.render_control(f, columns[3], 1, toggle, toggle_style, Hit::Toggle(task.id));

        self.hits.push((rect, Hit::Card(task.id)));
    }

    /// Render a clickable label on line `n` of `column`.
    fn render_control(&mut self, f: &mut Frame, column: Rect, n: u16, label: &str, style: Style, hit: Hit) {
        if let Some(line) = line_of(column, n) {
            let width = Line::raw(label).width() as u16;
            let control = Rect { width: width.min(line.width), ..line };
            f.render_widget(Paragraph::new(label).style(style), control);
            self.hits.push((control, hit));
        }
    }

    /// Render a name or description line, as an input when that field is being edited.
    #[allow(clippy::too_many_arguments)]
    fn render_text_line(
        &mut self,
        f: &mut Frame,
        column: Rect,
        n: u16,
        task: &Task,
        field: Field,
        mode: EditMode,
        style: Style,
    ) {
        let Some(line) = line_of(column, n) else {
            return;
        };
        let hit = match field {
            Field::Name => Hit::Name(task.id),
            Field::Description => Hit::Description(task.id),
        };
        let editing = mode.field() == Some(field);
        match self.rows.get(&task.id).filter(|_| editing) {
            Some(row) => {
                let input = row.input();
                // Scroll horizontally so the cursor stays on the last visible cell.
                let cursor = Line::raw(input.before_cursor()).width() as u16;
                let scroll = cursor.saturating_sub(line.width.saturating_sub(1));
                let paragraph = Paragraph::new(input.value.as_str())
                    .style(Style::default().fg(Color::Black).bg(Color::Gray))
                    .scroll((0, scroll));
                f.render_widget(paragraph, line);
                f.set_cursor_position((line.x + cursor - scroll, line.y));
            }
            None => {
                f.render_widget(Paragraph::new(task.field(field)).style(style), line);
            }
        }
        self.hits.push((line, hit));
    }

    /// Render the persistent add control.
    fn render_add(&mut self, f: &mut Frame, area: Rect) {
        let add = Paragraph::new("[ + Add task ]")
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(TEAL)))
            .style(Style::default().fg(TEAL).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(add, area);
        self.hits.push((area, Hit::Add));
    }

    /// Render the help popup over the list.
    fn render_help(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(70, 80, area);
        f.render_widget(Clear, area);

        let keys = [
            ("j / k, arrows", "Select next / previous task"),
            ("J / K, Shift+arrows", "Move task down / up"),
            ("g / G", "Select first / last task"),
            ("a, +", "Add a task"),
            ("space, c", "Toggle completed"),
            ("d, Delete", "Delete task"),
            ("Enter, e", "Edit title"),
            ("E", "Edit description"),
            ("Tab", "Switch field while editing"),
            ("Enter, Esc", "Stop editing"),
            ("h, ?", "Show this help"),
            ("q, Ctrl+C", "Quit"),
        ];
        let mut text = vec![
            Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
        ];
        text.extend(keys.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:<22}"), Style::default().fg(Color::Cyan)),
                Span::raw(*action),
            ])
        }));
        text.push(Line::from(""));
        text.push(Line::from("Click a title or description to edit it."));
        text.push(Line::from("Press any key to close."));

        let help = Paragraph::new(text)
            .block(Block::default().title("Help").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(help, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if self.editing_row().is_some() {
            "Editing (Enter/Esc to finish, Tab to switch field)".to_string()
        } else {
            match self.state {
                AppState::TaskList => format!("Tasks: {} | Press 'h' for help", self.list.len()),
                AppState::Help => "Help".to_string(),
            }
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(SLATE).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function. Rebuilds the hit map for the next click.
    pub fn render(&mut self, f: &mut Frame) {
        self.hits.clear();
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_tasks(f, chunks[1]);
        self.render_add(f, chunks[2]);
        self.render_status_bar(f, chunks[3]);
        if self.state == AppState::Help {
            self.render_help(f, chunks[1]);
        }
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.drain_host_messages();
            terminal.draw(|f| self.render(f))?;

            if event::poll(self.tick_rate)? && self.handle_event(event::read()?) {
                break;
            }
        }
        Ok(())
    }
}

/// A character typed with Ctrl or Alt held. These are not text or shortcuts.
fn is_chord(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(_))
        && key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Line `n` of `area`, if the area is tall enough.
fn line_of(area: Rect, n: u16) -> Option<Rect> {
    (n < area.height).then(|| Rect {
        y: area.y + n,
        height: 1,
        ..area
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use crossterm::event::KeyEventState;
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;

    use crate::task::DEFAULT_NAME;

    const TERM_W: u16 = 60;
    const TERM_H: u16 = 24;

    fn app() -> App {
        App::new(Duration::from_millis(10))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            assert!(!app.handle_event(key(*code)));
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }));
    }

    /// Click the top-left cell of the first region matching `hit`.
    fn click_hit(app: &mut App, hit: Hit) {
        let (rect, _) = *app
            .hits
            .iter()
            .find(|(_, h)| *h == hit)
            .unwrap_or_else(|| panic!("{hit:?} not rendered"));
        click(app, rect.x, rect.y);
    }

    /// Render into an in-memory buffer and return plain text (no styles).
    fn render_to_string(app: &mut App) -> String {
        let backend = TestBackend::new(TERM_W, TERM_H);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buf = terminal.backend().buffer().clone();
        let w = buf.area.width as usize;
        buf.content
            .chunks(w)
            .map(|row| {
                let s: String = row.iter().map(|cell| cell.symbol()).collect();
                s.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn names(app: &App) -> Vec<String> {
        app.list.iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn test_empty_list_shows_placeholder_and_add_control() {
        let mut app = app();
        let screen = render_to_string(&mut app);
        assert!(screen.contains(EMPTY_PLACEHOLDER));
        assert!(screen.contains("[ + Add task ]"));
        assert!(screen.contains("Tasks: 0"));
        assert!(app.hits.iter().all(|(_, hit)| *hit == Hit::Add));
    }

    #[test]
    fn test_single_task_hides_move_controls() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a')]);
        let screen = render_to_string(&mut app);
        assert!(screen.contains(DEFAULT_NAME));
        assert!(screen.contains("Task description."));
        assert!(!screen.contains(EMPTY_PLACEHOLDER));
        assert!(!screen.contains('▲'));
        assert!(!screen.contains('▼'));
        assert!(screen.contains("[del]"));
        assert!(screen.contains("[ ✓ ]"));
    }

    #[test]
    fn test_move_controls_follow_boundaries() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Char('a'), KeyCode::Char('a')]);
        render_to_string(&mut app);
        let ids: Vec<TaskId> = app.list.iter().map(|t| t.id).collect();
        let has = |app: &App, hit: Hit| app.hits.iter().any(|(_, h)| *h == hit);

        assert!(!has(&app, Hit::MoveUp(ids[0])));
        assert!(has(&app, Hit::MoveDown(ids[0])));
        assert!(has(&app, Hit::MoveUp(ids[1])));
        assert!(has(&app, Hit::MoveDown(ids[1])));
        assert!(has(&app, Hit::MoveUp(ids[2])));
        assert!(!has(&app, Hit::MoveDown(ids[2])));
    }

    #[test]
    fn test_keyboard_crud() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Char('a')]);
        assert_eq!(app.list.len(), 2);
        assert_eq!(app.selected, 1);

        press(&mut app, &[KeyCode::Char(' ')]);
        assert!(app.list.get(1).unwrap().completed);
        assert_eq!(app.status_message, "Task marked as completed");

        press(&mut app, &[KeyCode::Char('k'), KeyCode::Char('d')]);
        assert_eq!(app.list.len(), 1);
        let remaining = app.list.get(0).unwrap();
        assert_eq!(remaining.position, 0);
        assert!(remaining.completed);
        assert!(app.list.check_positions());
    }

    #[test]
    fn test_inline_edit_commits_every_keystroke() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Enter]);
        assert!(app.editing_row().is_some());

        type_text(&mut app, "!");
        assert_eq!(app.list.get(0).unwrap().name, format!("{DEFAULT_NAME}!"));
        press(&mut app, &[KeyCode::Backspace, KeyCode::Backspace]);
        assert_eq!(app.list.get(0).unwrap().name, "New task ");

        // 'd' is text while editing, not delete.
        type_text(&mut app, "d");
        assert_eq!(app.list.len(), 1);
        assert_eq!(app.list.get(0).unwrap().name, "New task d");

        press(&mut app, &[KeyCode::Esc]);
        assert!(app.editing_row().is_none());
        press(&mut app, &[KeyCode::Char('d')]);
        assert!(app.list.is_empty());
    }

    #[test]
    fn test_tab_switches_to_description() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Char('e'), KeyCode::Tab, KeyCode::End]);
        type_text(&mut app, " More.");
        press(&mut app, &[KeyCode::Enter]);

        let task = app.list.get(0).unwrap();
        assert_eq!(task.name, DEFAULT_NAME);
        assert_eq!(task.description, "Task description. More.");
        assert!(app.editing_row().is_none());
    }

    #[test]
    fn test_edit_description_shortcut() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Char('E'), KeyCode::Home]);
        type_text(&mut app, "> ");
        assert_eq!(app.list.get(0).unwrap().description, "> Task description.");
        let screen = render_to_string(&mut app);
        assert!(screen.contains("> Task description."));
        assert!(screen.contains("Editing"));
    }

    #[test]
    fn test_move_keys_respect_boundaries() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Char('a')]);
        press(&mut app, &[KeyCode::Char('g'), KeyCode::Char('e')]);
        type_text(&mut app, "1");
        press(&mut app, &[KeyCode::Esc]);

        press(&mut app, &[KeyCode::Char('K')]);
        assert_eq!(app.status_message, "Already at the top");
        assert_eq!(names(&app)[0], format!("{DEFAULT_NAME}1"));

        press(&mut app, &[KeyCode::Char('J')]);
        assert_eq!(names(&app)[1], format!("{DEFAULT_NAME}1"));
        assert_eq!(app.selected, 1);
        assert!(app.list.check_positions());

        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::SHIFT)));
        assert_eq!(app.status_message, "Already at the bottom");
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT)));
        assert_eq!(names(&app)[0], format!("{DEFAULT_NAME}1"));
    }

    #[test]
    fn test_mouse_controls_dispatch_intents() {
        let mut app = app();
        render_to_string(&mut app);
        click_hit(&mut app, Hit::Add);
        render_to_string(&mut app);
        click_hit(&mut app, Hit::Add);
        assert_eq!(app.list.len(), 2);

        render_to_string(&mut app);
        let first = app.list.get(0).unwrap().id;
        let second = app.list.get(1).unwrap().id;

        click_hit(&mut app, Hit::Toggle(second));
        assert!(app.list.get(1).unwrap().completed);

        render_to_string(&mut app);
        click_hit(&mut app, Hit::MoveDown(first));
        assert_eq!(app.list.index_of(first), Some(1));
        assert_eq!(app.selected, 1);

        render_to_string(&mut app);
        click_hit(&mut app, Hit::Delete(second));
        assert_eq!(app.list.len(), 1);
        assert_eq!(app.list.get(0).unwrap().id, first);
        assert_eq!(app.list.get(0).unwrap().position, 0);
    }

    #[test]
    fn test_click_to_edit_and_focus_loss() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Char('a')]);
        render_to_string(&mut app);
        let first = app.list.get(0).unwrap().id;
        let second = app.list.get(1).unwrap().id;

        click_hit(&mut app, Hit::Name(first));
        assert_eq!(app.rows[&first].mode(), EditMode::EditingName);
        assert_eq!(app.selected, 0);

        // Clicking the input itself keeps editing.
        render_to_string(&mut app);
        click_hit(&mut app, Hit::Name(first));
        assert_eq!(app.rows[&first].mode(), EditMode::EditingName);

        // Description of the same row switches field.
        render_to_string(&mut app);
        click_hit(&mut app, Hit::Description(first));
        assert_eq!(app.rows[&first].mode(), EditMode::EditingDescription);

        // Another row takes focus.
        render_to_string(&mut app);
        click_hit(&mut app, Hit::Description(second));
        assert_eq!(app.rows[&first].mode(), EditMode::Idle);
        assert_eq!(app.rows[&second].mode(), EditMode::EditingDescription);

        // Clicking empty space is a focus loss.
        click(&mut app, TERM_W - 1, 0);
        assert!(app.editing_row().is_none());
    }

    #[test]
    fn test_terminal_focus_lost_ends_editing() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Enter]);
        assert!(app.editing_row().is_some());
        app.handle_event(Event::FocusLost);
        assert!(app.editing_row().is_none());
    }

    #[test]
    fn test_row_state_dropped_with_task() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Enter, KeyCode::Esc]);
        let id = app.list.get(0).unwrap().id;
        assert!(app.rows.contains_key(&id));
        press(&mut app, &[KeyCode::Char('d')]);
        assert!(app.rows.is_empty());
    }

    #[test]
    fn test_completed_task_shows_uncomplete_toggle() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Char('c')]);
        let screen = render_to_string(&mut app);
        assert!(screen.contains("[ ✗ ]"));
        assert!(screen.contains("1 tasks, 1 done"));
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let mut app = app();
        for _ in 0..8 {
            press(&mut app, &[KeyCode::Char('a')]);
        }
        press(&mut app, &[KeyCode::Char('G')]);
        render_to_string(&mut app);
        let last = app.list.get(7).unwrap().id;
        assert!(app.hits.iter().any(|(_, h)| *h == Hit::Card(last)));
        let first = app.list.get(0).unwrap().id;
        assert!(!app.hits.iter().any(|(_, h)| *h == Hit::Card(first)));
    }

    #[test]
    fn test_help_overlay_closes_on_any_key() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('h')]);
        assert_eq!(app.state, AppState::Help);
        let screen = render_to_string(&mut app);
        assert!(screen.contains("Edit description"));
        press(&mut app, &[KeyCode::Char('a')]);
        assert_eq!(app.state, AppState::TaskList);
        assert!(app.list.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(app.handle_event(key(KeyCode::Char('q'))));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Enter]);
        assert!(app.handle_event(ctrl_c));
    }

    #[test]
    fn test_long_edit_scrolls_to_cursor() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Enter]);
        type_text(&mut app, " and then some more words to overflow QWERTYZ");
        assert!(app.list.get(0).unwrap().name.ends_with("QWERTYZ"));

        let screen = render_to_string(&mut app);
        assert!(screen.contains("overflow QWERTYZ"), "typed text hidden:\n{screen}");

        // Back at the start the head of the text is visible again.
        press(&mut app, &[KeyCode::Home]);
        let screen = render_to_string(&mut app);
        assert!(screen.contains("New task ✨"));
        assert!(!screen.contains("QWERTYZ"));
    }

    #[test]
    fn test_modifier_chords_are_not_text_or_shortcuts() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a')]);
        let chord = |c, m| Event::Key(KeyEvent::new(KeyCode::Char(c), m));

        assert!(!app.handle_event(chord('d', KeyModifiers::CONTROL)));
        assert!(!app.handle_event(chord('a', KeyModifiers::ALT)));
        assert_eq!(app.list.len(), 1);

        press(&mut app, &[KeyCode::Enter]);
        app.handle_event(chord('u', KeyModifiers::CONTROL));
        app.handle_event(chord('x', KeyModifiers::ALT));
        assert_eq!(app.list.get(0).unwrap().name, DEFAULT_NAME);
        // Shifted letters are still text.
        app.handle_event(chord('X', KeyModifiers::SHIFT));
        assert_eq!(app.list.get(0).unwrap().name, format!("{DEFAULT_NAME}X"));
        assert!(app.handle_event(chord('c', KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = app();
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(!app.handle_event(Event::Key(release)));
        assert!(app.list.is_empty());
    }

    #[test]
    fn test_host_messages_are_drained() {
        let (tx, rx) = mpsc::channel();
        let mut app = app().with_host_channel(rx);
        tx.send("session started".to_string()).unwrap();
        app.drain_host_messages();
        assert!(app.host_rx.as_ref().unwrap().try_recv().is_err());
        assert!(app.list.is_empty());
    }
}
