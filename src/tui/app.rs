//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the list and form
//! controllers, turns key presses into controller calls, sends requests
//! through the [`Dispatcher`] and renders the task table, the form dialog,
//! the delete confirmation and the help screen.

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::{
    fields::{format_choice, Field},
    form::{FormController, FormState},
    format::{format_due_relative, parse_due_input, truncate, DUE_FORMAT},
    list::ListController,
    sequence::Applied,
    surface::{Notice, Surface},
    task::{Task, TaskId},
    tui::{
        colors::{finish_color, priority_color, DARK_GREEN, DARK_RED, GOLD},
        dispatch::{Completion, Dispatcher, Job, SharedStore},
        enums::AppState,
        task_form::TaskFormView,
        utils::{centered_rect, centered_rect_with_height},
    },
};

/// The UI port as seen by the controllers. The modal flag mirrors the form
/// dialog; the confirmation reply is set by the delete dialog just before
/// the controller asks for it.
#[derive(Default)]
struct TuiSurface {
    modal_open: bool,
    confirmed: bool,
    status: Option<Notice>,
}

impl Surface for TuiSurface {
    fn open_modal(&mut self) {
        self.modal_open = true;
    }

    fn close_modal(&mut self) {
        self.modal_open = false;
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        let reply = std::mem::take(&mut self.confirmed);
        tracing::debug!(prompt, reply, "delete confirmation");
        reply
    }

    fn notify(&mut self, notice: Notice) {
        self.status = Some(notice);
    }
}

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    list: ListController,
    form: FormController,
    form_view: TaskFormView,
    surface: TuiSurface,
    dispatcher: Dispatcher,
    task_list_state: TableState,
    pending_delete: Option<TaskId>,
    saving: bool,
    collection_url: String,
}

impl App {
    /// Create the app and issue the initial refresh.
    pub fn new(store: SharedStore, collection_url: String) -> Self {
        let form = FormController::new();
        let form_view = TaskFormView::from_fields(form.fields());
        let mut app = App {
            state: AppState::TaskList,
            list: ListController::new(),
            form,
            form_view,
            surface: TuiSurface::default(),
            dispatcher: Dispatcher::new(store),
            task_list_state: TableState::default(),
            pending_delete: None,
            saving: false,
            collection_url,
        };
        app.request_refresh();
        app
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.surface.notify(Notice::Info(msg.into()));
    }

    fn clear_status_message(&mut self) {
        self.surface.status = None;
    }

    fn selected_task(&self) -> Option<&Task> {
        self.task_list_state
            .selected()
            .and_then(|i| self.list.tasks().get(i))
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.selected_task().and_then(|t| t.id.clone())
    }

    fn clamp_selection(&mut self) {
        let len = self.list.tasks().len();
        match self.task_list_state.selected() {
            _ if len == 0 => self.task_list_state.select(None),
            Some(i) if i >= len => self.task_list_state.select(Some(len - 1)),
            None => self.task_list_state.select(Some(0)),
            Some(_) => {}
        }
    }

    /// Keep the screen in step with the modal flag the controllers drive.
    fn sync_modal(&mut self) {
        if self.surface.modal_open {
            if self.state != AppState::Form {
                self.state = AppState::Form;
            }
        } else if self.state == AppState::Form {
            self.state = AppState::TaskList;
        }
    }

    fn load_form(&mut self) {
        if let Some(draft) = self.list.draft() {
            self.form.load(draft);
        }
        self.form_view = TaskFormView::from_fields(self.form.fields());
    }

    // ---- requests ----

    fn request_refresh(&mut self) {
        let ticket = self.list.issue_refresh();
        self.dispatcher.submit(Job::List(ticket));
    }

    fn begin_create(&mut self) {
        self.list.begin_create(&mut self.surface);
        self.load_form();
        self.sync_modal();
    }

    fn begin_edit(&mut self) {
        let Some(id) = self.selected_id() else {
            self.set_status_message("Selected task has no ID");
            return;
        };
        let ticket = self.list.issue_edit();
        self.dispatcher.submit(Job::Get(ticket, id));
        self.set_status_message("Loading task...");
    }

    fn ask_delete(&mut self) {
        match self.selected_id() {
            Some(id) => {
                self.pending_delete = Some(id);
                self.state = AppState::Confirm;
            }
            None => self.set_status_message("Selected task has no ID"),
        }
    }

    fn answer_delete(&mut self, confirmed: bool) {
        self.state = AppState::TaskList;
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        self.surface.confirmed = confirmed;
        if let Some(id) = self.list.request_delete(&id, &mut self.surface) {
            self.dispatcher.submit(Job::Delete(id));
            self.set_status_message("Deleting...");
        }
    }

    fn save(&mut self) {
        if self.saving {
            self.set_status_message("Save in progress...");
            return;
        }
        self.normalize_due_input();
        match self.form.prepare_save(&mut self.surface) {
            Ok(Some(submission)) => {
                self.saving = true;
                self.dispatcher.submit(Job::Save(submission));
                self.set_status_message("Saving...");
            }
            Ok(None) => {}
            // The validation notice is already on the status bar.
            Err(e) => tracing::debug!("save rejected: {e}"),
        }
    }

    /// Rewrite a natural due date ("tomorrow", "next fri") as `YYYY-MM-DD`.
    fn normalize_due_input(&mut self) {
        let raw = self.form.fields().due_day.clone();
        if raw.trim().is_empty() {
            return;
        }
        if let Some(date) = parse_due_input(&raw, Local::now().date_naive()) {
            let formatted = date.format(DUE_FORMAT).to_string();
            if formatted != raw {
                self.form.set_field(Field::DueDay, formatted);
                let current = self.form_view.current_field;
                self.form_view = TaskFormView::from_fields(self.form.fields());
                self.form_view.current_field = current;
            }
        }
    }

    fn apply_change(&mut self, change: Option<(Field, String)>) {
        if let Some((field, value)) = change {
            self.form.set_field(field, value);
        }
    }

    // ---- completions ----

    /// Apply every finished request. Called once per tick.
    pub fn drain_completions(&mut self) {
        while let Some(completion) = self.dispatcher.poll() {
            self.apply_completion(completion);
        }
    }

    fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Listed(ticket, result) => match self.list.apply_refresh(ticket, result) {
                Ok(Applied::Current) => self.clamp_selection(),
                Ok(Applied::Superseded) => {}
                Err(e) => self.surface.notify(Notice::Failure(format!("Could not load tasks: {e}"))),
            },
            Completion::Fetched(ticket, result) => {
                match self.list.apply_edit(ticket, result, &mut self.surface) {
                    Ok(Applied::Current) => {
                        self.clear_status_message();
                        self.load_form();
                    }
                    Ok(Applied::Superseded) => {}
                    Err(e) => self.surface.notify(Notice::Failure(format!("Could not load task: {e}"))),
                }
                self.sync_modal();
            }
            Completion::Saved(ticket, result) => {
                self.saving = false;
                let list = &mut self.list;
                let dispatcher = &mut self.dispatcher;
                let saved = self.form.apply_save(ticket, result, &mut self.surface, || {
                    let refresh = list.issue_refresh();
                    dispatcher.submit(Job::List(refresh));
                });
                if saved.is_ok() && self.form.state() == FormState::Idle {
                    self.set_status_message("Task saved");
                }
                self.sync_modal();
            }
            Completion::Deleted(result) => {
                let dispatcher = &mut self.dispatcher;
                let deleted = self.list.apply_delete(result, &mut self.surface, |list| {
                    let ticket = list.issue_refresh();
                    dispatcher.submit(Job::List(ticket));
                });
                if deleted.is_ok() {
                    self.set_status_message("Task deleted");
                }
            }
        }
    }

    // ---- input ----

    fn handle_task_list_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.list.tasks().len();
                if len > 0 {
                    let next = self.task_list_state.selected().map_or(0, |i| (i + 1).min(len - 1));
                    self.task_list_state.select(Some(next));
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if !self.list.tasks().is_empty() {
                    let prev = self.task_list_state.selected().map_or(0, |i| i.saturating_sub(1));
                    self.task_list_state.select(Some(prev));
                }
            }
            KeyCode::Char('a') => self.begin_create(),
            KeyCode::Char('e') | KeyCode::Enter => self.begin_edit(),
            KeyCode::Char('d') => self.ask_delete(),
            KeyCode::Char('r') => {
                self.request_refresh();
                self.set_status_message("Refreshing...");
            }
            KeyCode::Char('h') | KeyCode::F(1) => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    fn handle_form_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Esc => {
                self.form.close(&mut self.surface);
                self.sync_modal();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => self.save(),
            KeyCode::Enter => self.save(),
            KeyCode::Tab | KeyCode::Down => self.form_view.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form_view.prev_field(),
            KeyCode::Left => {
                let change = self.form_view.handle_left_right(false);
                self.apply_change(change);
            }
            KeyCode::Right => {
                let change = self.form_view.handle_left_right(true);
                self.apply_change(change);
            }
            KeyCode::Home => self.form_view.handle_home_end(false),
            KeyCode::End => self.form_view.handle_home_end(true),
            KeyCode::Backspace => {
                let change = self.form_view.handle_backspace();
                self.apply_change(change);
            }
            KeyCode::Delete => {
                let change = self.form_view.handle_delete();
                self.apply_change(change);
            }
            KeyCode::Char(c) => {
                let change = self.form_view.handle_char(c);
                self.apply_change(change);
            }
            _ => {}
        }
        false
    }

    fn handle_confirm_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.answer_delete(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.answer_delete(false),
            _ => {}
        }
        false
    }

    fn handle_help_input(&mut self, key: KeyCode) -> bool {
        if matches!(key, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::F(1)) {
            self.state = AppState::TaskList;
        }
        false
    }

    /// Route one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.state != AppState::Form {
            self.clear_status_message();
        }
        match self.state {
            AppState::TaskList => self.handle_task_list_input(key, modifiers),
            AppState::Form => self.handle_form_input(key, modifiers),
            AppState::Confirm => self.handle_confirm_input(key),
            AppState::Help => self.handle_help_input(key),
        }
    }

    /// Poll for and handle keyboard events based on current application state.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key.code, key.modifiers));
            }
        }
        Ok(false)
    }

    // ---- rendering ----

    /// Render the task table with a header naming the collection.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let today = Local::now().date_naive();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let header_text = vec![Line::from(vec![
            Span::styled("TASK LIST", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                self.collection_url.as_str(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];
        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, chunks[0]);

        let header_cells = ["ID", "Title", "Due", "Finish", "Priority", "Category", "Detail"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells)
            .style(Style::default().bg(DARK_GREEN).fg(Color::White))
            .height(1);

        let rows: Vec<Row> = self
            .list
            .tasks()
            .iter()
            .map(|task| {
                let fields = &task.fields;
                let id = task.id.as_ref().map(TaskId::to_string).unwrap_or_else(|| "-".into());
                let due = if fields.due_day.is_empty() {
                    String::new()
                } else {
                    format!("{} ({})", fields.due_day, format_due_relative(&fields.due_day, today))
                };
                Row::new(vec![
                    Cell::from(id),
                    Cell::from(fields.title.clone()),
                    Cell::from(due),
                    Cell::from(format_choice(&fields.finish).to_string())
                        .style(Style::default().fg(finish_color(&fields.finish))),
                    Cell::from(format_choice(&fields.priority).to_string())
                        .style(Style::default().fg(priority_color(&fields.priority))),
                    Cell::from(fields.category.clone()),
                    Cell::from(truncate(&fields.detail, 40)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(5),  // ID
            Constraint::Min(20),    // Title
            Constraint::Length(24), // Due
            Constraint::Length(8),  // Finish
            Constraint::Length(9),  // Priority
            Constraint::Length(12), // Category
            Constraint::Min(20),    // Detail
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Tasks ({}) - Press 'h' for help",
                self.list.tasks().len()
            )))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, chunks[1], &mut self.task_list_state);
    }

    /// Render the add/edit form as a dialog over the list.
    fn render_task_form(&mut self, f: &mut Frame, area: Rect) {
        let area = centered_rect_with_height(60, 23, area);
        f.render_widget(Clear, area);
        let block = Block::default()
            .title(self.form.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GOLD));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut constraints = vec![Constraint::Length(3); Field::ALL.len()];
        constraints.push(Constraint::Min(1));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (order, field) in Field::ALL.into_iter().enumerate() {
            let focused = self.form_view.current_field == order;
            let border = if focused { Style::default().fg(GOLD) } else { Style::default() };
            let label = match field {
                Field::Title | Field::DueDay => format!("{} *", field.label()),
                _ => field.label().to_string(),
            };
            let text = if field.is_selector() {
                format!("< {} >", format_choice(self.form.fields().get(field)))
            } else {
                self.form_view.input(field).map(|i| i.value.clone()).unwrap_or_default()
            };
            let widget = Paragraph::new(text).block(
                Block::default().borders(Borders::ALL).title(label).border_style(border),
            );
            f.render_widget(widget, chunks[order]);

            if focused {
                if let Some(input) = self.form_view.input(field) {
                    let max_x = chunks[order].width.saturating_sub(2);
                    let x = (input.cursor() as u16).min(max_x);
                    f.set_cursor_position((chunks[order].x + 1 + x, chunks[order].y + 1));
                }
            }
        }

        let instructions = Paragraph::new(
            "Tab/↑↓ move  ←→ cursor/choice  Enter or Ctrl+S save  Esc close",
        )
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        f.render_widget(instructions, chunks[Field::ALL.len()]);
    }

    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(vec![Span::styled("Task List Help", bold)]),
            Line::from(""),
            Line::from(vec![Span::styled("Task List:", bold)]),
            Line::from("  ↑/k, ↓/j     Navigate tasks"),
            Line::from("  a            Add new task"),
            Line::from("  e/Enter      Edit selected task"),
            Line::from("  d            Delete selected task"),
            Line::from("  r            Reload tasks from the server"),
            Line::from("  h/F1         Show this help"),
            Line::from("  q/Ctrl+C     Quit"),
            Line::from(""),
            Line::from(vec![Span::styled("Form:", bold)]),
            Line::from("  Tab/↑↓       Navigate between fields"),
            Line::from("  ←/→          Move cursor, or change Finish/Priority"),
            Line::from("  Enter/Ctrl+S Save task"),
            Line::from("  Esc          Close without saving"),
            Line::from(""),
            Line::from(vec![Span::styled("Due Day Formats:", bold)]),
            Line::from("  YYYY-MM-DD   Specific date (e.g., 2024-12-25)"),
            Line::from("  today        Today's date"),
            Line::from("  tomorrow     Tomorrow's date"),
            Line::from("  next fri     A weekday"),
            Line::from("  in 3d        3 days from today"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help - Esc to return"))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render the delete confirmation dialog.
    fn render_confirm(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Confirm Delete")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 20, area);
        f.render_widget(Clear, area);

        let target = self.pending_delete.as_ref().map(|id| {
            let title = self.list.get(id).map(|t| t.fields.title.as_str()).unwrap_or("");
            if title.is_empty() {
                format!("Delete task #{id}")
            } else {
                format!("Delete task #{id} \"{title}\"")
            }
        });

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Are you sure you want to:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(target.unwrap_or_default()),
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
        let (status_text, bg) = match &self.surface.status {
            Some(notice) if notice.is_error() => (notice.message().to_string(), DARK_RED),
            Some(notice) => (notice.message().to_string(), DARK_GREEN),
            None => {
                let text = match self.state {
                    AppState::TaskList => format!("Tasks: {} | Press 'h' for help", self.list.tasks().len()),
                    AppState::Form => self.form.title().to_string(),
                    AppState::Confirm => "Confirm Delete".to_string(),
                    AppState::Help => "Help".to_string(),
                };
                (text, DARK_GREEN)
            }
        };
        let busy = if self.dispatcher.in_flight() > 0 { " ⟳" } else { "" };

        let status = Paragraph::new(format!("{status_text}{busy}"))
            .style(Style::default().bg(bg).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to appropriate view renderers.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            AppState::TaskList => self.render_task_list(f, chunks[0]),
            AppState::Form => {
                self.render_task_list(f, chunks[0]);
                self.render_task_form(f, chunks[0]);
            }
            AppState::Confirm => {
                self.render_task_list(f, chunks[0]);
                self.render_confirm(f, chunks[0]);
            }
            AppState::Help => self.render_help(f, chunks[0]),
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Applies finished requests, renders, and handles input until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.drain_completions();
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
