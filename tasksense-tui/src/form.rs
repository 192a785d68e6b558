//! Modal create/edit form state.
//!
//! The form is plain text-buffer state; rendering lives in [`crate::ui`]
//! and submission in [`crate::dashboard`]. Due dates are typed as
//! `YYYY-MM-DD` and parsed to midnight UTC on submit.

use chrono::{NaiveDate, TimeZone, Utc};
use tasksense_shared::models::task::{Task, TaskDraft, TaskStatus};
use validator::Validate;

/// Which form field currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    DueDate,
    Status,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::DueDate,
            FormField::DueDate => FormField::Status,
            FormField::Status => FormField::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            FormField::Title => FormField::Status,
            FormField::Description => FormField::Title,
            FormField::DueDate => FormField::Description,
            FormField::Status => FormField::DueDate,
        }
    }
}

/// Editable task form, used for both create and edit.
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub status: TaskStatus,
    pub focus: FormField,
    /// The task being edited, `None` when creating.
    pub editing: Option<Task>,
}

impl TaskForm {
    /// Empty form for creating a new task.
    pub fn new() -> Self {
        TaskForm {
            title: String::new(),
            description: String::new(),
            due_date: String::new(),
            status: TaskStatus::Pending,
            focus: FormField::Title,
            editing: None,
        }
    }

    /// Form pre-filled from an existing task.
    pub fn editing(task: Task) -> Self {
        TaskForm {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: task
                .due_date
                .map(|due| due.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            status: task.status,
            focus: FormField::Title,
            editing: Some(task),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Window title for the modal.
    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Edit Task"
        } else {
            "New Task"
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Appends a character to the focused text field.
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            FormField::Title => self.title.push(c),
            FormField::Description => self.description.push(c),
            FormField::DueDate => self.due_date.push(c),
            FormField::Status => {}
        }
    }

    /// Removes the last character from the focused text field.
    pub fn pop_char(&mut self) {
        match self.focus {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::DueDate => {
                self.due_date.pop();
            }
            FormField::Status => {}
        }
    }

    pub fn cycle_status(&mut self) {
        self.status = self.status.next();
    }

    /// Validates the buffers and produces a draft ready for submission.
    ///
    /// Returns a user-facing message on invalid input.
    pub fn to_draft(&self) -> Result<TaskDraft, String> {
        let title = self.title.trim().to_string();
        let description = match self.description.trim() {
            "" => None,
            text => Some(text.to_string()),
        };
        let due_date = match self.due_date.trim() {
            "" => None,
            text => {
                let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .map_err(|_| "Due date must be in YYYY-MM-DD format".to_string())?;
                let midnight = date
                    .and_hms_opt(0, 0, 0)
                    .ok_or_else(|| "Due date must be in YYYY-MM-DD format".to_string())?;
                Some(Utc.from_utc_datetime(&midnight))
            }
        };

        let draft = TaskDraft {
            title,
            description,
            status: self.status,
            due_date,
        };
        draft.validate().map_err(|errors| first_message(&errors))?;
        Ok(draft)
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        TaskForm::new()
    }
}

fn first_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|field| field.iter())
        .filter_map(|error| error.message.as_ref())
        .map(|message| message.to_string())
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}
