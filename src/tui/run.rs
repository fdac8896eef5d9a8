//! TUI entry point and terminal setup.

use std::io;
use std::panic;
use std::sync::Arc;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::api::HttpTaskStore;
use crate::config::Config;
use crate::error::Result;
use crate::tui::{app::App, dispatch::SharedStore};

/// Initialise and run the terminal user interface against the configured collection.
pub fn run_tui(config: &Config) -> Result<()> {
    let store: SharedStore = Arc::new(HttpTaskStore::new(&config.api));
    tracing::info!(url = %config.api.collection_url(), "starting terminal UI");

    restore_terminal_on_panic();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, config.api.collection_url());
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(result?)
}

/// Leave raw mode and the alternate screen before the panic message is printed.
fn restore_terminal_on_panic() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));
}
