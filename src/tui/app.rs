use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::Backend;
use ratatui::Terminal;

use super::ui;
use crate::commands::{self, CommandCtx, CommandResult};
use crate::models::Task;
use crate::state::AppState;

/// Which part of the screen receives plain key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    List,
}

/// Terminal front-end: owns the session state and turns keys into commands.
pub struct App<C: CommandCtx> {
    ctx: C,
    state: AppState,
    input: String,
    focus: Focus,
    selected: usize,
    status_message: Option<String>,
    should_quit: bool,
}

impl<C: CommandCtx> App<C> {
    pub fn new(ctx: C, state: AppState) -> Self {
        Self {
            ctx,
            state,
            input: String::new(),
            focus: Focus::Input,
            selected: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// Draw, then block on the next terminal event. One event is fully
    /// handled (including its write) before the next one is read.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> std::io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('t') => self.toggle_theme(),
                _ => {}
            }
            return;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Tab | KeyCode::Esc | KeyCode::Down => self.focus = Focus::List,
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Esc | KeyCode::Char('a') | KeyCode::Char('i') => {
                self.focus = Focus::Input;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.state.tasks().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn submit_input(&mut self) {
        let before = self.state.tasks().len();
        let result = commands::create_task(&self.ctx, &mut self.state, &self.input);
        self.report(result);
        // The input is cleared only when a task was actually appended.
        if self.state.tasks().len() > before {
            self.input.clear();
            self.selected = self.state.tasks().len() - 1;
        }
    }

    fn toggle_selected(&mut self) {
        let Some(task_id) = self.selected_task().map(|task| task.id.clone()) else {
            return;
        };
        let result = commands::toggle_task(&self.ctx, &mut self.state, &task_id);
        self.report(result);
    }

    fn delete_selected(&mut self) {
        let Some(task_id) = self.selected_task().map(|task| task.id.clone()) else {
            return;
        };
        let result = commands::delete_task(&self.ctx, &mut self.state, &task_id);
        self.report(result);
        let len = self.state.tasks().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        if len == 0 {
            self.focus = Focus::Input;
        }
    }

    fn toggle_theme(&mut self) {
        let result = commands::toggle_theme(&self.ctx, &mut self.state);
        self.report(result);
    }

    fn report<T>(&mut self, result: CommandResult<T>) {
        self.status_message = if result.ok { None } else { result.error };
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.state.tasks().get(self.selected)
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::StatePayload;
    use crate::models::Theme;
    use crate::storage::{Storage, StorageError};
    use std::path::PathBuf;

    struct DirCtx {
        root: tempfile::TempDir,
        fail: bool,
    }

    impl CommandCtx for DirCtx {
        fn app_data_dir(&self) -> Result<PathBuf, StorageError> {
            if self.fail {
                return Err(StorageError::Io(std::io::Error::other("disk gone")));
            }
            Ok(self.root.path().to_path_buf())
        }

        fn emit_state_updated(&self, _payload: StatePayload) {}
    }

    fn make_app() -> App<DirCtx> {
        let ctx = DirCtx {
            root: tempfile::tempdir().unwrap(),
            fail: false,
        };
        App::new(ctx, AppState::default())
    }

    fn press(app: &mut App<DirCtx>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App<DirCtx>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn stored(app: &App<DirCtx>) -> Vec<Task> {
        Storage::new(app.ctx.root.path().to_path_buf())
            .load_tasks()
            .unwrap()
    }

    #[test]
    fn focus_default_is_input() {
        assert_eq!(Focus::default(), Focus::Input);
        assert_eq!(make_app().focus(), Focus::Input);
    }

    #[test]
    fn typing_and_enter_adds_task_and_clears_input() {
        let mut app = make_app();
        type_text(&mut app, "  Buy milk ");
        assert_eq!(app.input(), "  Buy milk ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input(), "");
        assert_eq!(app.state().tasks().len(), 1);
        assert_eq!(app.state().tasks()[0].text, "Buy milk");
        assert_eq!(stored(&app), app.state().tasks());
    }

    #[test]
    fn blank_submit_keeps_input_and_adds_nothing() {
        let mut app = make_app();
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input(), "   ");
        assert!(app.state().tasks().is_empty());
    }

    #[test]
    fn backspace_edits_input() {
        let mut app = make_app();
        type_text(&mut app, "ab");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input(), "a");
    }

    #[test]
    fn list_keys_move_toggle_and_delete() {
        let mut app = make_app();
        for text in ["one", "two", "three"] {
            type_text(&mut app, text);
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.selected(), 2);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::List);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected(), 0);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_task().unwrap().text, "two");

        press(&mut app, KeyCode::Char(' '));
        assert!(app.state().tasks()[1].completed);
        assert!(stored(&app)[1].completed);

        press(&mut app, KeyCode::Char('d'));
        let texts: Vec<_> = app.state().tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "three"]);
        assert_eq!(stored(&app).len(), 2);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected(), 1);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.selected(), 0);
        press(&mut app, KeyCode::Delete);
        assert!(app.state().tasks().is_empty());
        assert_eq!(app.focus(), Focus::Input);
    }

    #[test]
    fn list_actions_on_empty_list_do_nothing() {
        let mut app = make_app();
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('d'));
        assert!(app.state().tasks().is_empty());
        assert!(app.status_message().is_none());
    }

    #[test]
    fn theme_toggles_from_list_and_with_ctrl_t() {
        let mut app = make_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(app.state().theme(), Theme::Dark);
        assert_eq!(app.input(), "");

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.state().theme(), Theme::Light);
    }

    #[test]
    fn quit_with_q_or_ctrl_c() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());
        assert_eq!(app.input(), "q");

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());

        let mut app = make_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn persist_failure_shows_status_and_keeps_task() {
        let ctx = DirCtx {
            root: tempfile::tempdir().unwrap(),
            fail: true,
        };
        let mut app = App::new(ctx, AppState::default());
        type_text(&mut app, "x");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state().tasks().len(), 1);
        assert_eq!(app.input(), "");
        assert!(app.status_message().unwrap().contains("disk gone"));

        app.ctx.fail = false;
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.status_message().is_none());
    }
}
