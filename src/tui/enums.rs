//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq)]
pub enum AppState {
    TaskList,
    AddTask,
    EditTask,
    Help,
    Confirm,
}

/// Target of the inline one-line input shown in the status bar.
#[derive(Clone, PartialEq)]
pub enum InlineTarget {
    /// Adding a subtask to the task with this id.
    AddSubtask { task: String },
    /// Editing an existing subtask.
    EditSubtask { task: String, subtask: String },
}
