//! Terminal front-end

mod app;
mod ui;

use std::io::{self, Stdout};
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;

pub use app::{App, Focus};
pub use ui::{draw, palette, Palette};

use crate::commands::CommandCtx;
use crate::events::{StatePayload, EVENT_STATE_UPDATED};
use crate::storage::StorageError;

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Host context for the terminal binary. Re-rendering happens on every loop
/// turn, so a state update only needs to be logged.
pub struct TerminalCtx {
    data_dir: PathBuf,
}

impl TerminalCtx {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

impl CommandCtx for TerminalCtx {
    fn app_data_dir(&self) -> Result<PathBuf, StorageError> {
        Ok(self.data_dir.clone())
    }

    fn emit_state_updated(&self, payload: StatePayload) {
        log::trace!(
            "{EVENT_STATE_UPDATED} tasks={} theme={:?}",
            payload.tasks.len(),
            payload.theme
        );
    }
}

/// Switches to raw mode on the alternate screen. Any step that fails undoes
/// the earlier ones, and a panic from here on restores the terminal before
/// the previously installed hook reports it.
pub fn init_terminal() -> io::Result<Terminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(error) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(error);
    }
    chain_panic_hook(|| {
        let _ = restore_terminal();
    });
    ratatui::Terminal::new(CrosstermBackend::new(stdout)).inspect_err(|_| {
        let _ = restore_terminal();
    })
}

/// Runs `before` ahead of whatever hook is currently installed.
fn chain_panic_hook<F>(before: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info: &std::panic::PanicHookInfo<'_>| {
        before();
        previous(info);
    }));
}

pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
