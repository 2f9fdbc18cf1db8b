//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store, manages
//! the TUI state, handles user input, and renders the interface across the
//! different screens (task list, forms, help, confirm dialog).

use std::collections::HashSet;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::store::TaskStore;
use crate::tui::{
    colors::{DARK_RED, DIM_GRAY, GOLD},
    enums::{AppState, InlineTarget},
    input::InputField,
    task_form::{TaskForm, DESCRIPTION_FIELD, FIRST_DRAFT_FIELD, TITLE_FIELD},
    utils::centered_rect,
};

/// One visible row in the list view: a task, or one of its subtasks when
/// the task is expanded.
#[derive(Clone, PartialEq)]
enum ListRow {
    Task(String),
    Subtask { task: String, subtask: String },
}

/// Main application state for the terminal user interface.
///
/// Selection bookkeeping and the expand/collapse set are presentation
/// state; everything that touches task data goes through the store.
pub struct App {
    store: TaskStore,
    state: AppState,
    rows: Vec<ListRow>,
    list_state: TableState,
    expanded: HashSet<String>,
    form: TaskForm,
    editing_task: Option<String>,
    inline_input: InputField,
    inline_target: Option<InlineTarget>,
    status_message: String,
    confirm_delete: Option<String>,
}

impl App {
    /// Create a new App instance around an already-loaded store.
    pub fn new(store: TaskStore) -> Self {
        let mut app = App {
            store,
            state: AppState::TaskList,
            rows: Vec::new(),
            list_state: TableState::default(),
            expanded: HashSet::new(),
            form: TaskForm::new(),
            editing_task: None,
            inline_input: InputField::new(),
            inline_target: None,
            status_message: String::new(),
            confirm_delete: None,
        };
        app.rebuild_rows();
        app
    }

    /// Recompute the visible rows from the store's derived view, keeping
    /// the selection on the same row where possible.
    fn rebuild_rows(&mut self) {
        let old = self
            .list_state
            .selected()
            .and_then(|i| self.rows.get(i).cloned());

        let mut rows = Vec::new();
        for task in self.store.filtered_view() {
            rows.push(ListRow::Task(task.id.clone()));
            if self.expanded.contains(&task.id) {
                for st in &task.subtasks {
                    rows.push(ListRow::Subtask {
                        task: task.id.clone(),
                        subtask: st.id.clone(),
                    });
                }
            }
        }
        self.rows = rows;

        let restored = old.and_then(|old_row| self.rows.iter().position(|r| *r == old_row));
        match restored {
            Some(i) => self.list_state.select(Some(i)),
            None => self.list_state.select(if self.rows.is_empty() {
                None
            } else {
                Some(0)
            }),
        }
    }

    fn selected_row(&self) -> Option<&ListRow> {
        self.list_state.selected().and_then(|i| self.rows.get(i))
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn move_selection(&mut self, down: bool) {
        if let Some(selected) = self.list_state.selected() {
            if down {
                if selected + 1 < self.rows.len() {
                    self.list_state.select(Some(selected + 1));
                }
            } else if selected > 0 {
                self.list_state.select(Some(selected - 1));
            }
        } else if !self.rows.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    fn expand_selected(&mut self) {
        if let Some(ListRow::Task(id)) = self.selected_row().cloned() {
            self.expanded.insert(id);
            self.rebuild_rows();
        }
    }

    fn collapse_selected(&mut self) {
        let target = match self.selected_row().cloned() {
            Some(ListRow::Task(id)) => Some(id),
            Some(ListRow::Subtask { task, .. }) => Some(task),
            None => None,
        };
        if let Some(id) = target {
            self.expanded.remove(&id);
            self.rebuild_rows();
            if let Some(i) = self
                .rows
                .iter()
                .position(|r| matches!(r, ListRow::Task(t) if *t == id))
            {
                self.list_state.select(Some(i));
            }
        }
    }

    fn toggle_selected(&mut self) {
        match self.selected_row().cloned() {
            Some(ListRow::Task(id)) => {
                self.store.toggle_task(&id);
                self.rebuild_rows();
            }
            Some(ListRow::Subtask { task, subtask }) => {
                self.store.toggle_subtask(&task, &subtask);
                self.rebuild_rows();
            }
            None => {}
        }
    }

    /// Open the inline input to add a subtask to the selected task (or to
    /// the parent of the selected subtask row).
    fn start_add_subtask(&mut self) {
        let target = match self.selected_row().cloned() {
            Some(ListRow::Task(id)) => Some(id),
            Some(ListRow::Subtask { task, .. }) => Some(task),
            None => None,
        };
        if let Some(task) = target {
            self.inline_input = InputField::new();
            self.inline_target = Some(InlineTarget::AddSubtask { task });
        }
    }

    /// Edit the selected row: a form for task rows, the inline input for
    /// subtask rows.
    fn start_edit(&mut self) {
        match self.selected_row().cloned() {
            Some(ListRow::Task(id)) => {
                if let Some(task) = self.store.get(&id) {
                    self.form = TaskForm::from_task(task);
                    self.editing_task = Some(id);
                    self.state = AppState::EditTask;
                }
            }
            Some(ListRow::Subtask { task, subtask }) => {
                let text = self
                    .store
                    .get(&task)
                    .and_then(|t| t.get_subtask(&subtask))
                    .map(|s| s.text.clone());
                if let Some(text) = text {
                    self.inline_input = InputField::with_value(&text);
                    self.inline_target = Some(InlineTarget::EditSubtask { task, subtask });
                }
            }
            None => {}
        }
    }

    /// Delete the selected row: confirm dialog for tasks, immediate for
    /// subtasks.
    fn delete_selected(&mut self) {
        match self.selected_row().cloned() {
            Some(ListRow::Task(id)) => {
                self.confirm_delete = Some(id);
                self.state = AppState::Confirm;
            }
            Some(ListRow::Subtask { task, subtask }) => {
                self.store.delete_subtask(&task, &subtask);
                self.rebuild_rows();
                self.set_status_message("Subtask deleted".to_string());
            }
            None => {}
        }
    }

    fn submit_inline(&mut self) {
        // A blank submission keeps the input open, matching the form's
        // "unchanged form" treatment of empty titles.
        if self.inline_input.is_blank() {
            self.set_status_message("Text is required".to_string());
            return;
        }
        let Some(target) = self.inline_target.take() else {
            return;
        };
        let text = self.inline_input.value.clone();
        match target {
            InlineTarget::AddSubtask { task } => {
                if self.store.add_subtask(&task, &text) {
                    self.expanded.insert(task);
                    self.set_status_message("Subtask added".to_string());
                }
            }
            InlineTarget::EditSubtask { task, subtask } => {
                if self.store.edit_subtask(&task, &subtask, &text) {
                    self.set_status_message("Subtask updated".to_string());
                }
            }
        }
        self.inline_input = InputField::new();
        self.rebuild_rows();
    }

    /// Handle keyboard input when in the task list view.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> io::Result<bool> {
        if self.inline_target.is_some() {
            match key {
                KeyCode::Esc => {
                    self.inline_target = None;
                    self.inline_input = InputField::new();
                }
                KeyCode::Enter => self.submit_inline(),
                KeyCode::Backspace => self.inline_input.handle_backspace(),
                KeyCode::Delete => self.inline_input.handle_delete(),
                KeyCode::Left => self.inline_input.move_cursor_left(),
                KeyCode::Right => self.inline_input.move_cursor_right(),
                KeyCode::Char(c) => self.inline_input.handle_char(c),
                _ => {}
            }
            return Ok(false);
        }

        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => self.move_selection(false),
            KeyCode::Down => self.move_selection(true),
            KeyCode::Right | KeyCode::Enter => self.expand_selected(),
            KeyCode::Left => self.collapse_selected(),
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('a') => {
                self.form = TaskForm::new();
                self.editing_task = None;
                self.state = AppState::AddTask;
            }
            KeyCode::Char('s') => self.start_add_subtask(),
            KeyCode::Char('e') => self.start_edit(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('f') => {
                let next = self.store.filter().next();
                self.store.set_filter(next);
                self.rebuild_rows();
                self.set_status_message(format!("Filter: {}", next.label()));
            }
            KeyCode::Char('h') | KeyCode::F(1) => self.state = AppState::Help,
            _ => {}
        }
        Ok(false)
    }

    fn handle_form_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Char('n') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.add_draft()
            }
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.remove_draft()
            }
            KeyCode::Esc => {
                self.editing_task = None;
                self.state = AppState::TaskList;
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Delete => self.form.handle_delete(),
            KeyCode::Enter => {
                if self.form.title.is_blank() {
                    // Validation no-op: the form stays open, unchanged.
                    self.set_status_message("Title is required".to_string());
                    return Ok(false);
                }
                match self.editing_task.take() {
                    Some(id) => {
                        self.store.edit_task(
                            &id,
                            &self.form.title.value,
                            Some(&self.form.description.value),
                        );
                        self.set_status_message("Task updated".to_string());
                    }
                    None => {
                        self.store.add_task_with_subtasks(
                            &self.form.title.value,
                            &self.form.description.value,
                            &self.form.draft_texts(),
                        );
                        self.set_status_message("Task added".to_string());
                    }
                }
                self.state = AppState::TaskList;
                self.rebuild_rows();
            }
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
        Ok(false)
    }

    fn handle_confirm_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(id) = self.confirm_delete.take() {
                    self.store.delete_task(&id);
                    self.expanded.remove(&id);
                    self.set_status_message("Task deleted".to_string());
                }
                self.state = AppState::TaskList;
                self.rebuild_rows();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_delete = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_help_input(&mut self, _key: KeyCode, _modifiers: KeyModifiers) -> io::Result<bool> {
        self.state = AppState::TaskList;
        Ok(false)
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                self.clear_status_message();

                let should_quit = match self.state {
                    AppState::TaskList => self.handle_task_list_input(key.code, key.modifiers)?,
                    AppState::AddTask | AppState::EditTask => {
                        self.handle_form_input(key.code, key.modifiers)?
                    }
                    AppState::Help => self.handle_help_input(key.code, key.modifiers)?,
                    AppState::Confirm => self.handle_confirm_input(key.code, key.modifiers)?,
                };
                if should_quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let stats = self.store.stats();
        let show_gauge = stats.total > 0;
        let constraints = if show_gauge {
            vec![
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ]
        } else {
            vec![Constraint::Length(3), Constraint::Min(0)]
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let header_text = vec![Line::from(vec![
            Span::styled("TICKLIST", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("Filter: {}", self.store.filter().label()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];
        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, chunks[0]);

        if show_gauge {
            let label = if stats.all_done() {
                "All tasks completed!".to_string()
            } else {
                format!(
                    "{} of {} completed ({}%)",
                    stats.completed,
                    stats.total,
                    stats.percent()
                )
            };
            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).title("Progress"))
                .gauge_style(Style::default().fg(Color::Green))
                .ratio(stats.completed as f64 / stats.total as f64)
                .label(label);
            f.render_widget(gauge, chunks[1]);
        }

        let list_area = chunks[chunks.len() - 1];

        if self.rows.is_empty() {
            let msg = if self.store.is_empty() {
                "No tasks yet - press 'a' to add one"
            } else {
                "No matching tasks"
            };
            let card = Paragraph::new(msg)
                .block(Block::default().borders(Borders::ALL).title("Tasks"))
                .alignment(Alignment::Center);
            f.render_widget(card, list_area);
            return;
        }

        let header_cells = ["", "Item", "Subtasks", "Description"].iter().map(|h| {
            Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))
        });
        let header = Row::new(header_cells)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .height(1);

        let rows: Vec<Row> = self
            .rows
            .iter()
            .filter_map(|row| match row {
                ListRow::Task(id) => {
                    let task = self.store.get(id)?;
                    let (done, total) = task.subtask_progress();
                    let counter = if total == 0 {
                        String::new()
                    } else {
                        format!("{done}/{total}")
                    };
                    let mark = if task.completed { "[x]" } else { "[ ]" };
                    let expander = if total == 0 {
                        "  "
                    } else if self.expanded.contains(id) {
                        "v "
                    } else {
                        "> "
                    };
                    let style = if task.completed {
                        Style::default()
                            .fg(DIM_GRAY)
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    Some(
                        Row::new(vec![
                            Cell::from(mark),
                            Cell::from(format!("{expander}{}", task.title)),
                            Cell::from(counter),
                            Cell::from(task.description.clone())
                                .style(Style::default().fg(DIM_GRAY)),
                        ])
                        .style(style),
                    )
                }
                ListRow::Subtask { task, subtask } => {
                    let st = self.store.get(task)?.get_subtask(subtask)?;
                    let mark = if st.completed { " [x]" } else { " [ ]" };
                    let style = if st.completed {
                        Style::default()
                            .fg(DIM_GRAY)
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    Some(
                        Row::new(vec![
                            Cell::from(mark),
                            Cell::from(format!("    {}", st.text)),
                            Cell::from(""),
                            Cell::from(""),
                        ])
                        .style(style),
                    )
                }
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Min(24),
            Constraint::Length(8),
            Constraint::Percentage(40),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Tasks ({}/{}) - Press 'h' for help",
                self.store.filtered_view().len(),
                self.store.len()
            )))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, list_area, &mut self.list_state);
    }

    fn render_task_form(&mut self, f: &mut Frame, area: Rect) {
        let is_edit = self.form.is_edit;
        let mut constraints = vec![Constraint::Length(3), Constraint::Length(3)];
        for _ in &self.form.drafts {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(3));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let title_style = if self.form.current_field == TITLE_FIELD {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let title_input = Paragraph::new(self.form.title.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Title *")
                .border_style(title_style),
        );
        f.render_widget(title_input, chunks[0]);

        let desc_style = if self.form.current_field == DESCRIPTION_FIELD {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let desc_input = Paragraph::new(self.form.description.value.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Description")
                    .border_style(desc_style),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(desc_input, chunks[1]);

        for (i, draft) in self.form.drafts.iter().enumerate() {
            let style = if self.form.current_field == FIRST_DRAFT_FIELD + i {
                Style::default().fg(GOLD)
            } else {
                Style::default()
            };
            let input = Paragraph::new(draft.value.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Subtask {}", i + 1))
                    .border_style(style),
            );
            f.render_widget(input, chunks[2 + i]);
        }

        let instructions = if is_edit {
            "Tab/Up/Down navigate  Enter save  Esc cancel"
        } else {
            "Tab/Up/Down navigate  Ctrl+N add subtask row  Ctrl+D remove row  Enter create  Esc cancel"
        };
        let hint = Paragraph::new(instructions)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(if is_edit { "Edit Task" } else { "New Task" }),
            );
        f.render_widget(hint, chunks[chunks.len() - 1]);
    }

    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let help_text = vec![
            Line::from(vec![Span::styled(
                "Ticklist Help",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Task List:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from("  Up/Down      Navigate rows"),
            Line::from("  Right/Enter  Expand selected task"),
            Line::from("  Left         Collapse"),
            Line::from("  Space        Toggle completion (task or subtask)"),
            Line::from("  a            Add new task"),
            Line::from("  s            Add subtask to selected task"),
            Line::from("  e            Edit selected task/subtask"),
            Line::from("  d            Delete (confirm for tasks)"),
            Line::from("  f            Cycle filter All/Active/Completed"),
            Line::from("  h/F1         Show this help"),
            Line::from("  q/Esc/Ctrl+C Quit"),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Forms:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from("  Tab/Up/Down  Navigate between fields"),
            Line::from("  Ctrl+N       Add a subtask draft row (new task only)"),
            Line::from("  Ctrl+D       Remove the focused draft row"),
            Line::from("  Enter        Save/Create task"),
            Line::from("  Esc          Cancel and return"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Press any key to return"),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render a confirmation dialog for task deletion.
    fn render_confirm(&mut self, f: &mut Frame, area: Rect) {
        let title = self
            .confirm_delete
            .as_ref()
            .and_then(|id| self.store.get(id))
            .map(|t| t.title.clone())
            .unwrap_or_default();

        let block = Block::default()
            .title("Confirm Delete")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 20, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Delete this task and its subtasks?",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(title),
            Line::from(""),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let status_text = if let Some(target) = &self.inline_target {
            let prompt = match target {
                InlineTarget::AddSubtask { .. } => "New subtask",
                InlineTarget::EditSubtask { .. } => "Edit subtask",
            };
            format!(
                "{}: {} (Enter to save, Esc to cancel)",
                prompt, self.inline_input.value
            )
        } else if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::TaskList => format!(
                    "Tasks: {} | Filter: {} | Press 'h' for help",
                    self.store.filtered_view().len(),
                    self.store.filter().label()
                ),
                AppState::AddTask => "Add New Task".to_string(),
                AppState::EditTask => "Edit Task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Delete".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the appropriate view.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(f.area());

        match self.state {
            AppState::TaskList => self.render_task_list(f, chunks[0]),
            AppState::AddTask | AppState::EditTask => self.render_task_form(f, chunks[0]),
            AppState::Help => self.render_help(f, chunks[0]),
            AppState::Confirm => {
                self.render_task_list(f, chunks[0]);
                self.render_confirm(f, chunks[0]);
            }
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
