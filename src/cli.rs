use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::cmd::Commands;

/// Task list backed by a remote REST collection.
/// Runs the interactive UI when no subcommand is given.
#[derive(Parser)]
#[command(name = "tasks", version, about = "Task list manager for a remote REST collection")]
pub struct Cli {
    /// Base URL of the task service (overrides the config file and TASKLIST_API_URL).
    #[arg(long, global = true)]
    pub api: Option<String>,

    /// Path to a TOML config file. Defaults to ~/.tasklist/config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
