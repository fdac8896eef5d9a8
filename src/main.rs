//! # Tasks - a task list for a remote REST collection
//!
//! A command-line task manager whose records live in a remote JSON collection,
//! with an interactive terminal user interface (TUI) as the default mode.
//!
//! ## Key Features
//!
//! - **Remote Storage**: Tasks are read from and written to a REST collection
//!   (`GET`/`POST` on the collection, `GET`/`PUT`/`DELETE` on `{collection}/{id}`)
//! - **Tolerant Reading**: Records with differently-cased keys (`title`/`Title`,
//!   `dueDay`/`DueDay`/`due`/`Due`, ...) are normalized into one shape
//! - **One Form for Both Modes**: The same form creates new tasks and modifies
//!   existing ones; title and due day are required
//! - **Stale Responses Ignored**: A slow reply never overwrites a newer one
//! - **Multiple Interfaces**: Full CLI for scripting + interactive TUI
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! tasks
//!
//! # Add a task via CLI
//! tasks add "Buy milk" --due tomorrow --priority high
//!
//! # List tasks
//! tasks list
//!
//! # Point at another collection
//! tasks --api https://example.mockapi.io list
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `~/.tasklist/config.toml` (or `--config`), then
//! `TASKLIST_API_URL` / `TASKLIST_LOG`, then command-line flags. The TUI logs
//! to `~/.tasklist/tasklist.log`; the CLI logs to stderr.

use clap::Parser;

pub mod api;
pub mod board;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fields;
pub mod form;
pub mod format;
pub mod list;
pub mod normalize;
pub mod sequence;
pub mod surface;
pub mod task;
pub mod telemetry;
#[cfg(test)]
mod test_harness;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod dispatch;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use api::HttpTaskStore;
use board::Board;
use cli::Cli;
use cmd::*;
use telemetry::LogSink;

fn main() {
    let cli = Cli::parse();

    let (mut config, config_warnings) = match config::load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    if let Some(api) = cli.api {
        config.api.base_url = api;
    }

    let command = cli.command.unwrap_or(Commands::Ui);

    // The TUI owns the terminal, so its logs go to a file.
    let log_path = config.logging.file.clone().unwrap_or_else(config::default_log_path);
    let sink = match command {
        Commands::Ui => LogSink::File(&log_path),
        _ => LogSink::Stderr,
    };
    telemetry::init(cli.verbose, &config.logging, sink);
    for warning in &config_warnings {
        tracing::warn!("{warning}");
    }
    tracing::debug!(url = %config.api.collection_url(), "configuration loaded");

    let mut board = Board::new(HttpTaskStore::new(&config.api));

    match command {
        Commands::Ui => cmd_ui(&config),

        Commands::List { json } => cmd_list(&mut board, json),

        Commands::Show { id, json } => cmd_show(&board, id, json),

        Commands::Add { title, edits } => {
            cmd_add(&mut board, &mut ConsoleSurface::new(false), title, edits)
        }

        Commands::Edit { id, title, edits } => {
            cmd_edit(&mut board, &mut ConsoleSurface::new(false), id, title, edits)
        }

        Commands::Delete { id, yes } => cmd_delete(&mut board, &mut ConsoleSurface::new(yes), id),

        Commands::Completions { shell } => cmd_completions(shell),
    }
}
