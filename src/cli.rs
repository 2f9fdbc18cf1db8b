use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Single-user to-do tracker with nested subtasks.
/// Storage defaults to ~/.ticklist/todos.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "tick", version, about = "To-do tracker with nested subtasks")]
pub struct Cli {
    /// Path to the JSON snapshot file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Defaults to launching the TUI when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
