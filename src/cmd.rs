//! Command implementations for the CLI interface.
//!
//! This module contains the command handlers for the subcommands, from the
//! CRUD operations on tasks and subtasks to the TUI launcher. The store
//! itself treats bad input as a silent no-op; the handlers here turn those
//! no-ops and unresolvable identifiers into stderr messages and exit code 1.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::store::{
    print_table, resolve_subtask_identifier, resolve_task_identifier, short_id, TaskStore,
};
use crate::task::FilterMode;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI.
    Ui,

    /// Add a new task.
    Add {
        /// Title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// Seed a subtask. May be repeated.
        #[arg(long = "subtask")]
        subtasks: Vec<String>,
    },

    /// List tasks.
    List {
        /// Which tasks to include: all | active | completed.
        #[arg(long, value_enum, default_value_t = FilterMode::All)]
        filter: FilterMode,
        /// Also print subtask rows.
        #[arg(long)]
        subtasks: bool,
    },

    /// Flip a task's completion flag.
    Toggle {
        /// Task id, id prefix, or exact title.
        task: String,
    },

    /// Edit a task's title and, optionally, its description.
    Edit {
        /// Task id, id prefix, or exact title.
        task: String,
        /// New title.
        title: String,
        /// New description. Omit to keep the current one; pass "" to clear.
        #[arg(long)]
        desc: Option<String>,
    },

    /// Delete a task and its subtasks.
    Delete {
        /// Task id, id prefix, or exact title.
        task: String,
    },

    /// Work with a task's subtasks.
    Subtask {
        /// Parent task id, id prefix, or exact title.
        task: String,
        #[command(subcommand)]
        action: SubtaskAction,
    },

    /// Show completion statistics.
    Stats,

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SubtaskAction {
    /// Append a subtask.
    Add {
        /// Subtask text.
        text: String,
    },
    /// Flip a subtask's completion flag.
    Toggle {
        /// Subtask id, id prefix, or exact text.
        subtask: String,
    },
    /// Change a subtask's text.
    Edit {
        /// Subtask id, id prefix, or exact text.
        subtask: String,
        /// New text.
        text: String,
    },
    /// Remove a subtask.
    Delete {
        /// Subtask id, id prefix, or exact text.
        subtask: String,
    },
}

fn resolve_or_exit(identifier: &str, store: &TaskStore) -> String {
    match resolve_task_identifier(identifier, store) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn resolve_subtask_or_exit(store: &TaskStore, task_id: &str, identifier: &str) -> String {
    let Some(task) = store.get(task_id) else {
        eprintln!("Task {} not found", short_id(task_id));
        std::process::exit(1);
    };
    match resolve_subtask_identifier(task, identifier) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Launch the terminal user interface.
pub fn cmd_ui(store: TaskStore) {
    if let Err(e) = run_tui(store) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task, optionally seeded with subtasks.
pub fn cmd_add(store: &mut TaskStore, title: String, desc: Option<String>, subtasks: Vec<String>) {
    let desc = desc.unwrap_or_default();
    let added = if subtasks.is_empty() {
        store.add_task(&title, &desc)
    } else {
        store.add_task_with_subtasks(&title, &desc, &subtasks)
    };
    if !added {
        eprintln!("Title cannot be empty.");
        std::process::exit(1);
    }
    if let Some(task) = store.tasks().last() {
        println!("Added task {}", short_id(&task.id));
    }
}

/// List tasks through the derived view for the requested filter.
pub fn cmd_list(store: &mut TaskStore, filter: FilterMode, subtasks: bool) {
    store.set_filter(filter);
    let view = store.filtered_view();
    if view.is_empty() {
        if store.is_empty() {
            println!("No tasks yet.");
        } else {
            println!("No {} tasks.", filter.label().to_lowercase());
        }
        return;
    }
    print_table(&view, subtasks);
}

/// Toggle a task's completion flag.
pub fn cmd_toggle(store: &mut TaskStore, identifier: String) {
    let id = resolve_or_exit(&identifier, store);
    store.toggle_task(&id);
    if let Some(task) = store.get(&id) {
        let verb = if task.completed { "Completed" } else { "Reopened" };
        println!("{} {}", verb, short_id(&task.id));
    }
}

/// Edit a task's title and, when given, its description.
pub fn cmd_edit(store: &mut TaskStore, identifier: String, title: String, desc: Option<String>) {
    let id = resolve_or_exit(&identifier, store);
    if !store.edit_task(&id, &title, desc.as_deref()) {
        eprintln!("Title cannot be empty.");
        std::process::exit(1);
    }
    println!("Updated {}", short_id(&id));
}

/// Delete a task and all its subtasks.
pub fn cmd_delete(store: &mut TaskStore, identifier: String) {
    let id = resolve_or_exit(&identifier, store);
    store.delete_task(&id);
    println!("Deleted {}", short_id(&id));
}

/// Dispatch a subtask action against its parent task.
pub fn cmd_subtask(store: &mut TaskStore, identifier: String, action: SubtaskAction) {
    let task_id = resolve_or_exit(&identifier, store);
    match action {
        SubtaskAction::Add { text } => {
            if !store.add_subtask(&task_id, &text) {
                eprintln!("Subtask text cannot be empty.");
                std::process::exit(1);
            }
            if let Some(st) = store.get(&task_id).and_then(|t| t.subtasks.last()) {
                println!("Added subtask {}", short_id(&st.id));
            }
        }
        SubtaskAction::Toggle { subtask } => {
            let sub_id = resolve_subtask_or_exit(store, &task_id, &subtask);
            store.toggle_subtask(&task_id, &sub_id);
            if let Some(st) = store.get(&task_id).and_then(|t| t.get_subtask(&sub_id)) {
                let verb = if st.completed { "Completed" } else { "Reopened" };
                println!("{} subtask {}", verb, short_id(&st.id));
            }
        }
        SubtaskAction::Edit { subtask, text } => {
            let sub_id = resolve_subtask_or_exit(store, &task_id, &subtask);
            if !store.edit_subtask(&task_id, &sub_id, &text) {
                eprintln!("Subtask text cannot be empty.");
                std::process::exit(1);
            }
            println!("Updated subtask {}", short_id(&sub_id));
        }
        SubtaskAction::Delete { subtask } => {
            let sub_id = resolve_subtask_or_exit(store, &task_id, &subtask);
            store.delete_subtask(&task_id, &sub_id);
            println!("Deleted subtask {}", short_id(&sub_id));
        }
    }
}

/// Print completion statistics over top-level tasks.
pub fn cmd_stats(store: &TaskStore) {
    let stats = store.stats();
    if stats.total == 0 {
        println!("No tasks yet.");
        return;
    }
    println!(
        "{} of {} completed ({}%)",
        stats.completed,
        stats.total,
        stats.percent()
    );
    if stats.all_done() {
        println!("All tasks completed!");
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
