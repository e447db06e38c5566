use crate::models::{Task, Theme};

pub const EVENT_STATE_UPDATED: &str = "state_updated";

#[derive(Debug, Clone, serde::Serialize)]
pub struct StatePayload {
    pub tasks: Vec<Task>,
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_payload_serializes_tasks_and_theme() {
        let payload = StatePayload {
            tasks: vec![Task {
                id: "t1".to_string(),
                text: "Buy milk".to_string(),
                completed: false,
            }],
            theme: Theme::Dark,
        };
        let value = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(
            value,
            serde_json::json!({
              "tasks": [{ "id": "t1", "text": "Buy milk", "completed": false }],
              "theme": "dark"
            })
        );
    }
}
