//! Task form handling for the terminal user interface.
//!
//! The add form carries a title, a description, and a growable column of
//! subtask draft rows. The edit form reuses the same struct with the draft
//! rows hidden; subtasks are managed from the list view instead.

use crate::task::Task;
use crate::tui::input::InputField;

/// Navigation order: title, description, then one slot per draft row.
pub const TITLE_FIELD: usize = 0;
pub const DESCRIPTION_FIELD: usize = 1;
pub const FIRST_DRAFT_FIELD: usize = 2;

/// Form state for creating or editing a task.
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub drafts: Vec<InputField>,
    pub current_field: usize,
    pub is_edit: bool,
}

impl TaskForm {
    /// Empty add form with one blank subtask draft row.
    pub fn new() -> Self {
        let mut form = Self {
            title: InputField::new(),
            description: InputField::new(),
            drafts: vec![InputField::new()],
            current_field: TITLE_FIELD,
            is_edit: false,
        };
        form.update_active_field();
        form
    }

    /// Edit form prefilled from an existing task.
    pub fn from_task(task: &Task) -> Self {
        let mut form = Self {
            title: InputField::with_value(&task.title),
            description: InputField::with_value(&task.description),
            drafts: Vec::new(),
            current_field: TITLE_FIELD,
            is_edit: true,
        };
        form.update_active_field();
        form
    }

    pub fn field_count(&self) -> usize {
        2 + self.drafts.len()
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % self.field_count();
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            self.field_count() - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    /// Append another draft row and focus it. No-op on the edit form.
    pub fn add_draft(&mut self) {
        if self.is_edit {
            return;
        }
        self.drafts.push(InputField::new());
        self.current_field = FIRST_DRAFT_FIELD + self.drafts.len() - 1;
        self.update_active_field();
    }

    /// Remove the focused draft row, keeping at least one.
    pub fn remove_draft(&mut self) {
        if self.current_field < FIRST_DRAFT_FIELD || self.drafts.len() <= 1 {
            return;
        }
        let idx = self.current_field - FIRST_DRAFT_FIELD;
        self.drafts.remove(idx);
        if idx >= self.drafts.len() {
            self.current_field = FIRST_DRAFT_FIELD + self.drafts.len() - 1;
        }
        self.update_active_field();
    }

    /// Draft texts in row order. Blanks are kept; the store drops them.
    pub fn draft_texts(&self) -> Vec<String> {
        self.drafts.iter().map(|d| d.value.clone()).collect()
    }

    fn current_input_mut(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_FIELD => Some(&mut self.title),
            DESCRIPTION_FIELD => Some(&mut self.description),
            n => self.drafts.get_mut(n - FIRST_DRAFT_FIELD),
        }
    }

    /// Update which field is currently active for editing.
    pub fn update_active_field(&mut self) {
        let current = self.current_field;
        self.title.active = current == TITLE_FIELD;
        self.description.active = current == DESCRIPTION_FIELD;
        for (i, d) in self.drafts.iter_mut().enumerate() {
            d.active = current == FIRST_DRAFT_FIELD + i;
        }
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        if let Some(f) = self.current_input_mut() {
            f.handle_char(c);
        }
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        if let Some(f) = self.current_input_mut() {
            f.handle_backspace();
        }
    }

    /// Handle forward-delete for the currently active field.
    pub fn handle_delete(&mut self) {
        if let Some(f) = self.current_input_mut() {
            f.handle_delete();
        }
    }

    /// Handle left/right arrow keys for cursor movement.
    pub fn handle_left_right(&mut self, right: bool) {
        if let Some(f) = self.current_input_mut() {
            if right {
                f.move_cursor_right()
            } else {
                f.move_cursor_left()
            }
        }
    }
}
