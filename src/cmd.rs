//! Command implementations for the CLI interface.
//!
//! Each command drives the same controllers the terminal UI uses, through a
//! [`Board`]. Notices go to the console; failures exit with status 1.

use std::io::{self, Write};

use chrono::Local;
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::api::TaskStore;
use crate::board::Board;
use crate::cli::Cli;
use crate::config::Config;
use crate::fields::{Field, Finish, Priority};
use crate::format::{parse_due_input, print_card, print_table, DUE_FORMAT};
use crate::normalize::normalize_item;
use crate::surface::{Notice, Surface};
use crate::task::TaskId;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI (the default).
    Ui,

    /// Fetch and list all tasks.
    List {
        /// Print the normalized records as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Fetch a single task by ID.
    Show {
        /// Task ID
        id: String,
        /// Print the normalized record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Add a new task.
    Add {
        /// Task title.
        title: String,
        #[command(flatten)]
        edits: FieldArgs,
    },

    /// Change fields on an existing task.
    Edit {
        /// Task ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        edits: FieldArgs,
    },

    /// Delete a task by ID.
    Delete {
        /// Task ID
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Optional field values shared by `add` and `edit`.
#[derive(clap::Args, Debug, Default)]
pub struct FieldArgs {
    /// Due day: YYYY-MM-DD, "today", "tomorrow", "friday", "next mon", "in 3d", "eow", "eom".
    #[arg(long)]
    pub due: Option<String>,
    /// Free-text detail.
    #[arg(long)]
    pub detail: Option<String>,
    /// Finished: yes | no | none.
    #[arg(long, value_enum)]
    pub finish: Option<Finish>,
    /// Priority: low | medium | high | none.
    #[arg(long, value_enum)]
    pub priority: Option<Priority>,
    /// Free-text category.
    #[arg(long)]
    pub category: Option<String>,
}

impl FieldArgs {
    /// Resolve into field changes. Due input is normalized to `YYYY-MM-DD`;
    /// an empty due value is passed through so the form can reject it.
    pub fn into_changes(self) -> Result<Vec<(Field, String)>, String> {
        let mut changes = Vec::new();
        if let Some(raw) = self.due {
            let value = if raw.trim().is_empty() {
                String::new()
            } else {
                parse_due_input(&raw, Local::now().date_naive())
                    .map(|d| d.format(DUE_FORMAT).to_string())
                    .ok_or_else(|| format!("Invalid due date '{raw}'"))?
            };
            changes.push((Field::DueDay, value));
        }
        if let Some(detail) = self.detail {
            changes.push((Field::Detail, detail));
        }
        if let Some(finish) = self.finish {
            changes.push((Field::Finish, finish.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            changes.push((Field::Priority, priority.as_str().to_string()));
        }
        if let Some(category) = self.category {
            changes.push((Field::Category, category));
        }
        Ok(changes)
    }
}

/// Console implementation of the UI port. The "modal" is implicit: a command
/// that opens the form runs to completion.
pub struct ConsoleSurface {
    assume_yes: bool,
}

impl ConsoleSurface {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Surface for ConsoleSurface {
    fn open_modal(&mut self) {
        tracing::debug!("form opened");
    }

    fn close_modal(&mut self) {
        tracing::debug!("form closed");
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{prompt} [y/N] ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(_) => matches!(line.trim(), "y" | "Y" | "yes" | "Yes"),
            Err(_) => false,
        }
    }

    fn notify(&mut self, notice: Notice) {
        if notice.is_error() {
            eprintln!("{notice}");
        } else {
            println!("{notice}");
        }
    }
}

fn parse_id(raw: &str) -> TaskId {
    TaskId::new(raw).unwrap_or_else(|| {
        eprintln!("Task ID must not be empty");
        std::process::exit(1);
    })
}

fn resolve_changes(edits: FieldArgs) -> Vec<(Field, String)> {
    edits.into_changes().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

/// Launch the terminal user interface.
pub fn cmd_ui(config: &Config) {
    if let Err(e) = run_tui(config) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Fetch the collection and print it.
pub fn cmd_list<S: TaskStore>(board: &mut Board<S>, json: bool) {
    if let Err(e) = board.refresh() {
        eprintln!("Failed to load tasks: {e}");
        std::process::exit(1);
    }
    if json {
        match serde_json::to_string_pretty(board.tasks()) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Failed to encode tasks: {e}");
                std::process::exit(1);
            }
        }
    } else if board.tasks().is_empty() {
        println!("No tasks.");
    } else {
        print_table(board.tasks());
    }
}

/// Fetch one record and print it.
pub fn cmd_show<S: TaskStore>(board: &Board<S>, id: String, json: bool) {
    let id = parse_id(&id);
    let task = match board.store().get(&id) {
        Ok(raw) => normalize_item(&raw),
        Err(e) => {
            eprintln!("Failed to load task {id}: {e}");
            std::process::exit(1);
        }
    };
    if json {
        match serde_json::to_string_pretty(&task) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Failed to encode task: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print_card(&task);
    }
}

/// Create a task: empty draft, field changes, save.
pub fn cmd_add<S: TaskStore>(board: &mut Board<S>, surface: &mut ConsoleSurface, title: String, edits: FieldArgs) {
    let changes = resolve_changes(edits);
    board.begin_create(surface);
    board.set_field(Field::Title, title);
    for (field, value) in changes {
        board.set_field(field, value);
    }
    save_or_exit(board, surface, "Task created");
}

/// Update a task: fetch as draft, field changes, save.
pub fn cmd_edit<S: TaskStore>(
    board: &mut Board<S>,
    surface: &mut ConsoleSurface,
    id: String,
    title: Option<String>,
    edits: FieldArgs,
) {
    let id = parse_id(&id);
    let changes = resolve_changes(edits);
    if let Err(e) = board.begin_edit(&id, surface) {
        eprintln!("Failed to load task {id}: {e}");
        std::process::exit(1);
    }
    if let Some(title) = title {
        board.set_field(Field::Title, title);
    }
    for (field, value) in changes {
        board.set_field(field, value);
    }
    save_or_exit(board, surface, "Task updated");
}

fn save_or_exit<S: TaskStore>(board: &mut Board<S>, surface: &mut ConsoleSurface, done: &str) {
    match board.save(surface) {
        Ok(true) => surface.notify(Notice::Info(format!("{done} ({} tasks)", board.tasks().len()))),
        Ok(false) => {}
        // The surface has already reported the failure.
        Err(_) => std::process::exit(1),
    }
}

/// Delete a task after confirmation.
pub fn cmd_delete<S: TaskStore>(board: &mut Board<S>, surface: &mut ConsoleSurface, id: String) {
    let id = parse_id(&id);
    match board.delete(&id, surface) {
        Ok(true) => surface.notify(Notice::Info(format!("Deleted task #{id}"))),
        Ok(false) => println!("Cancelled."),
        Err(_) => std::process::exit(1),
    }
}

/// Print a shell completion script.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "tasks", &mut io::stdout());
}
