use serde::{Deserialize, Serialize};

/// Storage key the task list is saved under.
pub const TASKS_KEY: &str = "tasks";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Builds a fresh, not yet completed task. `text` must already be trimmed.
    pub fn new(text: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text,
            completed: false,
        }
    }
}

/// Session-only; serialized for state updates but never read back.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_not_completed_and_has_uuid_id() {
        let task = Task::new("Buy milk".to_string());
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert!(uuid::Uuid::parse_str(&task.id).is_ok());
    }

    #[test]
    fn new_tasks_get_distinct_ids() {
        let a = Task::new("a".to_string());
        let b = Task::new("a".to_string());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn task_serializes_to_flat_object() {
        let task = Task {
            id: "t1".to_string(),
            text: "Walk dog".to_string(),
            completed: true,
        };
        let value = serde_json::to_value(&task).expect("serialize task");
        assert_eq!(
            value,
            serde_json::json!({
              "id": "t1",
              "text": "Walk dog",
              "completed": true
            })
        );
    }

    #[test]
    fn task_deserialize_ignores_unknown_fields() {
        let json = r#"{ "id": "t1", "text": "x", "completed": false, "extra": 1 }"#;
        let task: Task = serde_json::from_str(json).expect("task should deserialize");
        assert_eq!(task.id, "t1");
    }

    #[test]
    fn task_deserialize_rejects_missing_completed() {
        let json = r#"{ "id": "t1", "text": "x" }"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn theme_defaults_to_light_and_toggles() {
        let theme = Theme::default();
        assert_eq!(theme, Theme::Light);
        assert!(!theme.is_dark());
        assert_eq!(theme.toggled(), Theme::Dark);
        assert_eq!(theme.toggled().toggled(), Theme::Light);
    }
}
