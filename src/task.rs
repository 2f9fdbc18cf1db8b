//! Task and subtask data structures.
//!
//! This module defines the `Task` and `Subtask` structs that make up the
//! to-do collection, plus the filter modes and completion statistics the
//! views are derived from.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A top-level to-do item with an ordered checklist of subtasks.
///
/// The wire format matches the snapshot layout earlier versions of the app
/// wrote: the title travels as `text`, the creation time as an RFC 3339
/// `createdAt` string, and `description`/`subtasks` are optional so old
/// snapshots still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(rename = "text")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

/// A child checklist item belonging to exactly one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Create an incomplete task with a fresh id and no subtasks.
    /// Callers are expected to pass already-trimmed text.
    pub fn new(title: &str, description: &str) -> Self {
        Task {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            completed: false,
            created_at: Utc::now(),
            subtasks: Vec::new(),
        }
    }

    /// Completed subtask count alongside the total.
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        (done, self.subtasks.len())
    }

    /// Get a subtask by id.
    pub fn get_subtask(&self, id: &str) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == id)
    }
}

impl Subtask {
    /// Create an incomplete subtask with a fresh id.
    pub fn new(text: &str) -> Self {
        Subtask {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            completed: false,
        }
    }
}

/// Which tasks the derived list view includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    /// Whether a task passes this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Active => !task.completed,
            FilterMode::Completed => task.completed,
        }
    }

    /// Next mode in the All -> Active -> Completed cycle.
    pub fn next(self) -> Self {
        match self {
            FilterMode::All => FilterMode::Active,
            FilterMode::Active => FilterMode::Completed,
            FilterMode::Completed => FilterMode::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "All",
            FilterMode::Active => "Active",
            FilterMode::Completed => "Completed",
        }
    }
}

/// Completion counts over top-level tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub completed: usize,
    pub total: usize,
}

impl Stats {
    /// Completion percentage rounded to the nearest whole number, 0 when
    /// there are no tasks.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.completed as f64 / self.total as f64 * 100.0).round() as u32
        }
    }

    /// True when there is at least one task and every task is completed.
    pub fn all_done(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_uses_legacy_field_names() {
        let task = Task::new("Ship release", "cut a tag");
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"text\":\"Ship release\""));
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("\"title\""));
    }

    #[test]
    fn legacy_task_without_subtasks_or_description_loads() {
        let json = r#"{"id":"t1","text":"old","completed":true,"createdAt":"2024-05-01T10:00:00Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.title, "old");
        assert!(task.completed);
        assert!(task.description.is_empty());
        assert!(task.subtasks.is_empty());
    }

    #[test]
    fn filter_mode_cycle_wraps() {
        assert_eq!(FilterMode::All.next(), FilterMode::Active);
        assert_eq!(FilterMode::Active.next(), FilterMode::Completed);
        assert_eq!(FilterMode::Completed.next(), FilterMode::All);
    }

    #[test]
    fn stats_percent_rounds() {
        assert_eq!(Stats { completed: 0, total: 0 }.percent(), 0);
        assert_eq!(Stats { completed: 1, total: 3 }.percent(), 33);
        assert_eq!(Stats { completed: 2, total: 3 }.percent(), 67);
        assert_eq!(Stats { completed: 3, total: 3 }.percent(), 100);
    }

    #[test]
    fn all_done_requires_at_least_one_task() {
        assert!(!Stats { completed: 0, total: 0 }.all_done());
        assert!(!Stats { completed: 1, total: 2 }.all_done());
        assert!(Stats { completed: 2, total: 2 }.all_done());
    }
}
