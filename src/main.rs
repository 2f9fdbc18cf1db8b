//! # tick - to-do tracker with nested subtasks
//!
//! A single-user task tracker: create, edit, complete, and delete tasks and
//! their subtasks, filter by status, and watch completion progress. State
//! lives in one local JSON snapshot; there is no server and no account.
//!
//! ## Key Features
//!
//! - **Nested Subtasks**: each task carries an ordered checklist; completing
//!   a task ticks every subtask, and ticking the last open subtask completes
//!   the task.
//! - **Multiple Interfaces**: full CLI for scripting + an interactive TUI
//!   for visual management.
//! - **Local File Storage**: a single JSON snapshot, rewritten after every
//!   change. Missing or corrupt data just starts you fresh.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! tick
//!
//! # Add a task with subtasks via the CLI
//! tick add "Plan the trip" --desc "long weekend" --subtask "book train" --subtask "pack"
//!
//! # List open tasks with their subtasks
//! tick list --filter active --subtasks
//!
//! # Tick one off (by id prefix or exact title)
//! tick toggle "book train"
//! ```
//!
//! Data is stored in `~/.ticklist/todos.json`; pass `--db <path>` to use a
//! different snapshot file.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use store::TaskStore;

fn main() {
    let cli = Cli::parse();

    // Completions need no store at all.
    if let Some(Commands::Completions { shell }) = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let db_path = cli.db.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let data_dir = PathBuf::from(home).join(".ticklist");
        if let Err(e) = std::fs::create_dir_all(&data_dir) {
            eprintln!("Failed to create data directory {}: {}", data_dir.display(), e);
            std::process::exit(1);
        }
        data_dir.join("todos.json")
    });

    let mut store = TaskStore::open(&db_path);

    match cli.command {
        None | Some(Commands::Ui) => cmd_ui(store),

        Some(Commands::Add { title, desc, subtasks }) => cmd_add(&mut store, title, desc, subtasks),

        Some(Commands::List { filter, subtasks }) => cmd_list(&mut store, filter, subtasks),

        Some(Commands::Toggle { task }) => cmd_toggle(&mut store, task),

        Some(Commands::Edit { task, title, desc }) => cmd_edit(&mut store, task, title, desc),

        Some(Commands::Delete { task }) => cmd_delete(&mut store, task),

        Some(Commands::Subtask { task, action }) => cmd_subtask(&mut store, task, action),

        Some(Commands::Stats) => cmd_stats(&store),

        Some(Commands::Completions { .. }) => unreachable!("completions handled above"),
    }
}
