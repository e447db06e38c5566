use std::path::PathBuf;

use crate::events::StatePayload;
use crate::models::{Task, Theme};
use crate::state::AppState;
use crate::storage::{Storage, StorageError};

#[derive(Debug, serde::Serialize)]
pub struct CommandResult<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Everything a command needs from the host: where data lives and how to
/// tell the front-end that the state changed.
pub trait CommandCtx {
    fn app_data_dir(&self) -> Result<PathBuf, StorageError>;
    fn emit_state_updated(&self, payload: StatePayload);
}

fn ok<T>(data: T) -> CommandResult<T> {
    CommandResult {
        ok: true,
        data: Some(data),
        error: None,
    }
}

fn err<T>(message: &str) -> CommandResult<T> {
    CommandResult {
        ok: false,
        data: None,
        error: Some(message.to_string()),
    }
}

fn payload(state: &AppState) -> StatePayload {
    StatePayload {
        tasks: state.tasks().to_vec(),
        theme: state.theme(),
    }
}

fn persist(ctx: &impl CommandCtx, state: &AppState) -> Result<(), StorageError> {
    let storage = Storage::new(ctx.app_data_dir()?);
    storage.ensure_dirs()?;
    storage.save_tasks(state.tasks())?;
    log::debug!("persisted {} tasks", state.tasks().len());
    ctx.emit_state_updated(payload(state));
    Ok(())
}

/// Reads the stored list (empty when absent or malformed) and writes it
/// straight back, so the store always holds a decodable value afterwards.
/// A value that exists but cannot be read is left untouched.
pub fn load_state(ctx: &impl CommandCtx) -> CommandResult<AppState> {
    let root = match ctx.app_data_dir() {
        Ok(path) => path,
        Err(e) => return err(&format!("app_data_dir error: {e}")),
    };
    let storage = Storage::new(root);
    if let Err(error) = storage.ensure_dirs() {
        return err(&format!("storage error: {error}"));
    }
    let tasks = match storage.load_tasks() {
        Ok(tasks) => tasks,
        Err(error) => {
            log::warn!("stored tasks unreadable, leaving them in place: {error}");
            return err(&format!("storage error: {error}"));
        }
    };
    let state = AppState::new(tasks);
    log::info!("loaded {} tasks", state.tasks().len());
    if let Err(error) = persist(ctx, &state) {
        return err(&format!("storage error: {error}"));
    }
    ok(state)
}

/// `data: Some(None)` means the trimmed input was empty and nothing was added.
pub fn create_task(
    ctx: &impl CommandCtx,
    state: &mut AppState,
    text: &str,
) -> CommandResult<Option<Task>> {
    let Some(task) = state.add_task(text) else {
        return ok(None);
    };
    log::info!("task created id={}", task.id);
    if let Err(error) = persist(ctx, state) {
        log::warn!("persist after create failed: {error}");
        return err(&format!("storage error: {error}"));
    }
    ok(Some(task))
}

/// Returns the toggled task, or `None` when the id is unknown.
pub fn toggle_task(
    ctx: &impl CommandCtx,
    state: &mut AppState,
    task_id: &str,
) -> CommandResult<Option<Task>> {
    let toggled = state.toggle_task(task_id);
    match &toggled {
        Some(task) => log::info!("task toggled id={} completed={}", task.id, task.completed),
        None => log::debug!("toggle ignored, unknown id={task_id}"),
    }
    if let Err(error) = persist(ctx, state) {
        log::warn!("persist after toggle failed: {error}");
        return err(&format!("storage error: {error}"));
    }
    ok(toggled)
}

/// Returns whether a task was actually removed.
pub fn delete_task(
    ctx: &impl CommandCtx,
    state: &mut AppState,
    task_id: &str,
) -> CommandResult<bool> {
    let removed = state.remove_task(task_id);
    if removed {
        log::info!("task deleted id={task_id}");
    } else {
        log::debug!("delete ignored, unknown id={task_id}");
    }
    if let Err(error) = persist(ctx, state) {
        log::warn!("persist after delete failed: {error}");
        return err(&format!("storage error: {error}"));
    }
    ok(removed)
}

/// Presentation only: never touches storage.
pub fn toggle_theme(ctx: &impl CommandCtx, state: &mut AppState) -> CommandResult<Theme> {
    let theme = state.toggle_theme();
    log::debug!("theme switched to {theme:?}");
    ctx.emit_state_updated(payload(state));
    ok(theme)
}
