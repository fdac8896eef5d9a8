//! Logging setup.
//!
//! The CLI logs to stderr. The TUI owns the screen, so it logs to a file; if
//! that file cannot be opened, logging is skipped.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, DEFAULT_LOG_FILTER};

pub enum LogSink<'a> {
    Stderr,
    File(&'a Path),
}

/// Filter directive for the given `-v` count; zero keeps the configured one.
pub fn filter_directive(verbosity: u8, configured: &str) -> String {
    match verbosity {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

pub fn init(verbosity: u8, logging: &LoggingConfig, sink: LogSink<'_>) {
    let directive = filter_directive(verbosity, &logging.filter);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter {directive:?} ({e}), using {DEFAULT_LOG_FILTER}");
        EnvFilter::new(DEFAULT_LOG_FILTER)
    });
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let result = match sink {
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogSink::File(path) => {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).try_init(),
                Err(_) => return,
            }
        }
    };
    // A subscriber may already be installed; keep the first one.
    let _ = result;
}
