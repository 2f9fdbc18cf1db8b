//! The task store: owns the collection, derives views, persists snapshots.
//!
//! This module provides the `TaskStore` struct plus the identifier
//! resolution and table-printing helpers shared by the CLI commands.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::task::{FilterMode, Stats, Subtask, Task};

/// In-memory task collection mirrored to a durable JSON snapshot.
///
/// Constructed once at startup and handed by `&mut` to whichever surface
/// drives it (CLI handlers or the TUI). Mutating operations return whether
/// the collection changed; any change is flushed to disk before the
/// operation returns. A failed flush is logged and otherwise ignored, so
/// the in-memory state never depends on the write succeeding.
pub struct TaskStore {
    tasks: Vec<Task>,
    filter: FilterMode,
    path: PathBuf,
}

impl TaskStore {
    /// Load the snapshot at `path`, starting empty when the file is missing.
    /// Never fails: unreadable or corrupt data is logged and discarded.
    pub fn open(path: &Path) -> Self {
        let tasks = if path.exists() {
            let mut buf = String::new();
            match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
                Ok(_) => match serde_json::from_str(&buf) {
                    Ok(tasks) => tasks,
                    Err(e) => {
                        eprintln!("Error parsing todos, starting fresh: {e}");
                        Vec::new()
                    }
                },
                Err(e) => {
                    eprintln!("Error reading todos, starting fresh: {e}");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        TaskStore {
            tasks,
            filter: FilterMode::All,
            path: path.to_path_buf(),
        }
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a task by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Set the current filter mode. Pure state set, nothing is flushed;
    /// the filter is not part of the snapshot.
    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter = mode;
    }

    /// Tasks passing the current filter, incomplete before completed, newest
    /// first within each partition. Recomputed on every call.
    pub fn filtered_view(&self) -> Vec<&Task> {
        let mut view: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect();
        view.sort_by(|a, b| {
            a.completed
                .cmp(&b.completed)
                .then(b.created_at.cmp(&a.created_at))
        });
        view
    }

    /// Completion counts over top-level tasks.
    pub fn stats(&self) -> Stats {
        Stats {
            completed: self.tasks.iter().filter(|t| t.completed).count(),
            total: self.tasks.len(),
        }
    }

    /// Append a task. No-op when the title trims to empty.
    pub fn add_task(&mut self, title: &str, description: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        self.tasks.push(Task::new(title, description.trim()));
        self.flush();
        true
    }

    /// Append a task seeded with subtasks. Drafts whose text trims to empty
    /// are dropped; a draft list that is all blanks still creates the task.
    pub fn add_task_with_subtasks(
        &mut self,
        title: &str,
        description: &str,
        drafts: &[String],
    ) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        let mut task = Task::new(title, description.trim());
        task.subtasks = drafts
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .map(Subtask::new)
            .collect();
        self.tasks.push(task);
        self.flush();
        true
    }

    /// Flip a task's completion flag. Completing a task also completes every
    /// subtask; un-completing leaves the subtasks as they are.
    pub fn toggle_task(&mut self, id: &str) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        if task.completed {
            for st in &mut task.subtasks {
                st.completed = true;
            }
        }
        self.flush();
        true
    }

    /// Remove a task and its subtasks. No-op when the id is unknown.
    pub fn delete_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let changed = self.tasks.len() != before;
        if changed {
            self.flush();
        }
        changed
    }

    /// Update a task's title, and its description only when one is given:
    /// an explicit empty string clears it, `None` leaves it alone.
    pub fn edit_task(&mut self, id: &str, title: &str, description: Option<&str>) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.title = title.to_string();
        if let Some(desc) = description {
            task.description = desc.trim().to_string();
        }
        self.flush();
        true
    }

    /// Append a subtask to a task. No-op when the text trims to empty or the
    /// task id is unknown.
    pub fn add_subtask(&mut self, task_id: &str, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return false;
        };
        task.subtasks.push(Subtask::new(text));
        self.flush();
        true
    }

    /// Flip a subtask's completion flag. When that leaves every subtask of
    /// the task completed, the task itself is marked completed; it is never
    /// forced back to incomplete from here.
    pub fn toggle_subtask(&mut self, task_id: &str, subtask_id: &str) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return false;
        };
        let Some(st) = task.subtasks.iter_mut().find(|s| s.id == subtask_id) else {
            return false;
        };
        st.completed = !st.completed;
        if !task.subtasks.is_empty() && task.subtasks.iter().all(|s| s.completed) {
            task.completed = true;
        }
        self.flush();
        true
    }

    /// Remove a subtask. The parent's completion flag is left untouched even
    /// when the removal leaves all remaining subtasks completed.
    pub fn delete_subtask(&mut self, task_id: &str, subtask_id: &str) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return false;
        };
        let before = task.subtasks.len();
        task.subtasks.retain(|s| s.id != subtask_id);
        let changed = task.subtasks.len() != before;
        if changed {
            self.flush();
        }
        changed
    }

    /// Change a subtask's text. No-op when the text trims to empty.
    pub fn edit_subtask(&mut self, task_id: &str, subtask_id: &str, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return false;
        };
        let Some(st) = task.subtasks.iter_mut().find(|s| s.id == subtask_id) else {
            return false;
        };
        st.text = text.to_string();
        self.flush();
        true
    }

    /// Write the snapshot, logging a failed write without touching the
    /// in-memory collection.
    fn flush(&self) {
        if let Err(e) = self.write_snapshot() {
            eprintln!("Error saving todos: {e}");
        }
    }

    fn write_snapshot(&self) -> io::Result<()> {
        // Atomic-ish write via temp + rename.
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(&self.tasks)?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

/// First segment of a hyphenated UUID, enough to pick out a task by hand.
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

/// Resolve a task identifier (full id, unique id prefix, or exact
/// case-insensitive title) to a task id.
pub fn resolve_task_identifier(identifier: &str, store: &TaskStore) -> Result<String, String> {
    let needle = identifier.trim();
    if needle.is_empty() {
        return Err("Empty task identifier".to_string());
    }
    if let Some(t) = store.tasks().iter().find(|t| t.id == needle) {
        return Ok(t.id.clone());
    }
    let mut matches: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|t| t.id.starts_with(needle))
        .collect();
    if matches.is_empty() {
        matches = store
            .tasks()
            .iter()
            .filter(|t| t.title.eq_ignore_ascii_case(needle))
            .collect();
    }
    match matches.len() {
        0 => Err(format!("No task found matching '{needle}'")),
        1 => Ok(matches[0].id.clone()),
        _ => {
            let mut msg = format!("'{needle}' matches multiple tasks:\n");
            for t in matches {
                msg.push_str(&format!("  {}  {}\n", short_id(&t.id), t.title));
            }
            msg.push_str("Please use a longer id prefix.");
            Err(msg)
        }
    }
}

/// Resolve a subtask identifier (full id, unique id prefix, or exact
/// case-insensitive text) within one task.
pub fn resolve_subtask_identifier(task: &Task, identifier: &str) -> Result<String, String> {
    let needle = identifier.trim();
    if needle.is_empty() {
        return Err("Empty subtask identifier".to_string());
    }
    if let Some(s) = task.subtasks.iter().find(|s| s.id == needle) {
        return Ok(s.id.clone());
    }
    let mut matches: Vec<&Subtask> = task
        .subtasks
        .iter()
        .filter(|s| s.id.starts_with(needle))
        .collect();
    if matches.is_empty() {
        matches = task
            .subtasks
            .iter()
            .filter(|s| s.text.eq_ignore_ascii_case(needle))
            .collect();
    }
    match matches.len() {
        0 => Err(format!(
            "No subtask of '{}' matches '{needle}'",
            task.title
        )),
        1 => Ok(matches[0].id.clone()),
        _ => {
            let mut msg = format!("'{needle}' matches multiple subtasks:\n");
            for s in matches {
                msg.push_str(&format!("  {}  {}\n", short_id(&s.id), s.text));
            }
            msg.push_str("Please use a longer id prefix.");
            Err(msg)
        }
    }
}

/// Format a creation time relative to now ("today", "3d ago").
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now.date_naive() - created_at.date_naive()).num_days();
    if days <= 0 {
        "today".to_string()
    } else if days == 1 {
        "1d ago".to_string()
    } else {
        format!("{days}d ago")
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Print tasks in a formatted table, optionally with indented subtask rows.
pub fn print_table(tasks: &[&Task], with_subtasks: bool) {
    // Header.
    println!(
        "{:<10} {:<4} {:<9} {:<9} {}",
        "ID", "", "Subtasks", "Created", "Title"
    );
    let now = Utc::now();
    for t in tasks {
        let (done, total) = t.subtask_progress();
        let counter = if total == 0 {
            "-".to_string()
        } else {
            format!("{done}/{total}")
        };
        let mark = if t.completed { "[x]" } else { "[ ]" };
        let title = if t.description.is_empty() {
            t.title.clone()
        } else {
            format!("{} - {}", t.title, truncate(&t.description, 40))
        };
        println!(
            "{:<10} {:<4} {:<9} {:<9} {}",
            short_id(&t.id),
            mark,
            counter,
            format_age(t.created_at, now),
            title
        );
        if with_subtasks {
            for st in &t.subtasks {
                let mark = if st.completed { "[x]" } else { "[ ]" };
                println!("{:<10} {:<4} {:<9} {:<9}   {}", short_id(&st.id), mark, "", "", st.text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> TaskStore {
        TaskStore::open(&dir.path().join("todos.json"))
    }

    fn last_id(store: &TaskStore) -> String {
        store.tasks().last().map(|t| t.id.clone()).unwrap()
    }

    #[test]
    fn add_task_appends_incomplete_task() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(store.add_task("Water plants", ""));
        assert_eq!(store.len(), 1);
        let task = &store.tasks()[0];
        assert_eq!(task.title, "Water plants");
        assert!(!task.completed);
        assert!(task.subtasks.is_empty());
    }

    #[test]
    fn blank_titles_are_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(!store.add_task("", "desc"));
        assert!(!store.add_task("   ", "desc"));
        assert!(!store.add_task_with_subtasks("  ", "", &["a".to_string()]));
        assert!(store.is_empty());
    }

    #[test]
    fn titles_and_descriptions_are_stored_trimmed() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(store.add_task("  Pack bags  ", "  for the trip  "));
        let task = &store.tasks()[0];
        assert_eq!(task.title, "Pack bags");
        assert_eq!(task.description, "for the trip");
    }

    #[test]
    fn blank_drafts_are_dropped_when_seeding_subtasks() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let drafts = vec![
            "  first ".to_string(),
            "   ".to_string(),
            "second".to_string(),
            String::new(),
        ];
        assert!(store.add_task_with_subtasks("Trip", "", &drafts));
        let task = &store.tasks()[0];
        assert_eq!(task.subtasks.len(), 2);
        assert_eq!(task.subtasks[0].text, "first");
        assert_eq!(task.subtasks[1].text, "second");
        assert!(task.subtasks.iter().all(|s| !s.completed));
    }

    #[test]
    fn all_blank_drafts_still_create_the_task() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(store.add_task_with_subtasks("Trip", "", &["  ".to_string()]));
        assert_eq!(store.len(), 1);
        assert!(store.tasks()[0].subtasks.is_empty());
    }

    #[test]
    fn completing_a_task_completes_every_subtask() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_task_with_subtasks("Move", "", &["box".to_string(), "van".to_string()]);
        let id = last_id(&store);
        assert!(store.toggle_task(&id));
        let task = store.get(&id).unwrap();
        assert!(task.completed);
        assert!(task.subtasks.iter().all(|s| s.completed));
    }

    #[test]
    fn reopening_a_task_leaves_subtasks_completed() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_task_with_subtasks("Move", "", &["box".to_string()]);
        let id = last_id(&store);
        store.toggle_task(&id);
        store.toggle_task(&id);
        let task = store.get(&id).unwrap();
        assert!(!task.completed);
        assert!(task.subtasks[0].completed);
    }

    #[test]
    fn completing_the_last_subtask_completes_the_parent() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_task_with_subtasks("Launch", "", &["x".to_string(), "y".to_string()]);
        let id = last_id(&store);
        let (x, y) = {
            let t = store.get(&id).unwrap();
            (t.subtasks[0].id.clone(), t.subtasks[1].id.clone())
        };
        assert!(store.toggle_subtask(&id, &y));
        assert!(!store.get(&id).unwrap().completed);
        assert!(store.toggle_subtask(&id, &x));
        assert!(store.get(&id).unwrap().completed);
    }

    #[test]
    fn untoggling_a_subtask_does_not_reopen_the_parent() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_task_with_subtasks("Launch", "", &["x".to_string(), "y".to_string()]);
        let id = last_id(&store);
        let (x, y) = {
            let t = store.get(&id).unwrap();
            (t.subtasks[0].id.clone(), t.subtasks[1].id.clone())
        };
        store.toggle_subtask(&id, &x);
        store.toggle_subtask(&id, &y);
        assert!(store.get(&id).unwrap().completed);
        store.toggle_subtask(&id, &x);
        let task = store.get(&id).unwrap();
        assert!(task.completed);
        assert!(!task.subtasks[0].completed);
    }

    #[test]
    fn deleting_a_subtask_never_touches_the_parent_flag() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_task_with_subtasks("Launch", "", &["x".to_string(), "y".to_string()]);
        let id = last_id(&store);
        let (x, y) = {
            let t = store.get(&id).unwrap();
            (t.subtasks[0].id.clone(), t.subtasks[1].id.clone())
        };
        // y completed, x still open; removing x leaves only completed
        // subtasks but the parent stays incomplete.
        store.toggle_subtask(&id, &y);
        assert!(store.delete_subtask(&id, &x));
        let task = store.get(&id).unwrap();
        assert!(!task.completed);
        assert_eq!(task.subtasks.len(), 1);
        // Deleting the last subtask leaves the flag alone too.
        assert!(store.delete_subtask(&id, &y));
        assert!(!store.get(&id).unwrap().completed);
    }

    #[test]
    fn operations_on_deleted_ids_are_noops() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_task("Gone soon", "");
        let id = last_id(&store);
        assert!(store.delete_task(&id));
        assert!(!store.toggle_task(&id));
        assert!(!store.delete_task(&id));
        assert!(!store.edit_task(&id, "new title", None));
        assert!(!store.add_subtask(&id, "sub"));
        assert!(!store.toggle_subtask(&id, "nope"));
        assert!(!store.delete_subtask(&id, "nope"));
        assert!(!store.edit_subtask(&id, "nope", "text"));
        assert!(store.is_empty());
    }

    #[test]
    fn edit_task_distinguishes_missing_and_empty_description() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_task("Title", "keep me");
        let id = last_id(&store);
        assert!(store.edit_task(&id, "New title", None));
        assert_eq!(store.get(&id).unwrap().description, "keep me");
        assert!(store.edit_task(&id, "New title", Some("")));
        assert!(store.get(&id).unwrap().description.is_empty());
        assert!(!store.edit_task(&id, "  ", Some("ignored")));
        assert_eq!(store.get(&id).unwrap().title, "New title");
    }

    #[test]
    fn edit_subtask_rejects_blank_text() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_task_with_subtasks("T", "", &["original".to_string()]);
        let id = last_id(&store);
        let sub = store.get(&id).unwrap().subtasks[0].id.clone();
        assert!(!store.edit_subtask(&id, &sub, "   "));
        assert_eq!(store.get(&id).unwrap().subtasks[0].text, "original");
        assert!(store.edit_subtask(&id, &sub, "  rewritten "));
        assert_eq!(store.get(&id).unwrap().subtasks[0].text, "rewritten");
    }

    #[test]
    fn filtered_view_partitions_and_sorts() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_task("A", "");
        let a = last_id(&store);
        store.add_task("B", "");
        let b = last_id(&store);
        // Make A strictly older than B regardless of clock resolution.
        store.get_mut(&a).unwrap().created_at = Utc::now() - Duration::hours(1);

        let view: Vec<&str> = store.filtered_view().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(view, vec!["B", "A"]);

        store.toggle_task(&a);
        let view: Vec<&str> = store.filtered_view().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(view, vec!["B", "A"]);

        store.set_filter(FilterMode::Active);
        let view: Vec<&str> = store.filtered_view().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(view, vec![b.as_str()]);

        store.set_filter(FilterMode::Completed);
        let view: Vec<&str> = store.filtered_view().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(view, vec![a.as_str()]);
    }

    #[test]
    fn snapshot_round_trip_preserves_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.json");
        let mut store = TaskStore::open(&path);
        store.add_task_with_subtasks("Trip", "to the coast", &["pack".to_string()]);
        store.add_task("Solo", "");
        let trip = store.tasks()[0].clone();
        store.toggle_subtask(&trip.id, &trip.subtasks[0].id);

        let reloaded = TaskStore::open(&path);
        assert_eq!(reloaded.len(), 2);
        let t = reloaded.get(&trip.id).unwrap();
        assert_eq!(t.title, "Trip");
        assert_eq!(t.description, "to the coast");
        assert_eq!(t.created_at, trip.created_at);
        assert!(t.completed);
        assert_eq!(t.subtasks.len(), 1);
        assert_eq!(t.subtasks[0].id, trip.subtasks[0].id);
        assert!(t.subtasks[0].completed);
    }

    #[test]
    fn missing_and_corrupt_snapshots_start_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.json");
        assert!(TaskStore::open(&path).is_empty());

        fs::write(&path, "not json at all").unwrap();
        assert!(TaskStore::open(&path).is_empty());
    }

    #[test]
    fn legacy_snapshot_without_subtasks_normalises() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.json");
        fs::write(
            &path,
            r#"[{"id":"t1","text":"old one","completed":false,"createdAt":"2024-05-01T10:00:00Z"}]"#,
        )
        .unwrap();
        let store = TaskStore::open(&path);
        assert_eq!(store.len(), 1);
        let task = store.get("t1").unwrap();
        assert_eq!(task.title, "old one");
        assert!(task.subtasks.is_empty());
        assert!(task.description.is_empty());
    }

    #[test]
    fn mutations_are_flushed_to_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.json");
        let mut store = TaskStore::open(&path);
        store.add_task("Persist me", "");
        let data = fs::read_to_string(&path).unwrap();
        assert!(data.contains("\"text\": \"Persist me\""));
        assert!(data.contains("\"createdAt\""));
    }

    #[test]
    fn resolves_ids_prefixes_and_titles() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_task("Buy milk", "");
        let id = last_id(&store);

        assert_eq!(resolve_task_identifier(&id, &store).unwrap(), id);
        assert_eq!(resolve_task_identifier(short_id(&id), &store).unwrap(), id);
        assert_eq!(resolve_task_identifier("buy MILK", &store).unwrap(), id);
        assert!(resolve_task_identifier("nope", &store).is_err());
        assert!(resolve_task_identifier("", &store).is_err());
    }

    #[test]
    fn ambiguous_titles_are_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_task("Call mum", "");
        store.add_task("Call mum", "");
        let err = resolve_task_identifier("call mum", &store).unwrap_err();
        assert!(err.contains("multiple"));
    }

    #[test]
    fn resolves_subtasks_within_a_task() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_task_with_subtasks("T", "", &["alpha".to_string(), "beta".to_string()]);
        let id = last_id(&store);
        let task = store.get(&id).unwrap();
        let alpha = task.subtasks[0].id.clone();

        assert_eq!(resolve_subtask_identifier(task, &alpha).unwrap(), alpha);
        assert_eq!(resolve_subtask_identifier(task, "ALPHA").unwrap(), alpha);
        assert_eq!(
            resolve_subtask_identifier(task, short_id(&alpha)).unwrap(),
            alpha
        );
        assert!(resolve_subtask_identifier(task, "gamma").is_err());
    }

    #[test]
    fn stats_counts_top_level_tasks_only() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_task_with_subtasks("T", "", &["a".to_string(), "b".to_string()]);
        store.add_task("U", "");
        let id = store.tasks()[0].id.clone();
        store.toggle_task(&id);
        let stats = store.stats();
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.percent(), 50);
    }
}
