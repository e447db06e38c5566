use crate::models::{Task, Theme};

/// The whole session state. Owned by the event loop and handed to commands
/// by `&mut`; there is exactly one writer at a time.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    tasks: Vec<Task>,
    theme: Theme,
}

impl AppState {
    /// The theme always starts at its default; it is never restored.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            theme: Theme::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Appends a task built from `raw` once trimmed. Blank input adds nothing.
    pub fn add_task(&mut self, raw: &str) -> Option<Task> {
        let text = trim_input(raw);
        if text.is_empty() {
            return None;
        }
        let task = Task::new(text.to_string());
        self.tasks.push(task.clone());
        Some(task)
    }

    pub fn toggle_task(&mut self, task_id: &str) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == task_id)?;
        task.completed = !task.completed;
        Some(task.clone())
    }

    pub fn remove_task(&mut self, task_id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != task_id);
        self.tasks.len() != before
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

/// Strips surrounding whitespace, including a stray byte order mark.
fn trim_input(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
