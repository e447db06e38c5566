pub mod commands;
pub mod config;
pub mod events;
pub mod logging;
pub mod models;
pub mod state;
pub mod storage;
pub mod tui;

#[cfg(feature = "app")]
use crate::commands::CommandResult;
#[cfg(feature = "app")]
use crate::config::AppConfig;
#[cfg(feature = "app")]
use crate::tui::{App, TerminalCtx};

/// Loads the stored tasks, then hands the terminal to the UI until the user
/// quits. The terminal is restored even when the loop fails.
#[cfg(feature = "app")]
pub fn run(config: AppConfig) -> anyhow::Result<()> {
    log::info!("starting data_dir={}", config.data_dir.display());
    let ctx = TerminalCtx::new(config.data_dir);

    let CommandResult { data, error, .. } = commands::load_state(&ctx);
    let Some(state) = data else {
        anyhow::bail!("loading tasks failed: {}", error.unwrap_or_default());
    };

    let mut terminal = tui::init_terminal()?;
    let mut app = App::new(ctx, state);
    let result = app.run(&mut terminal);
    tui::restore_terminal()?;
    result?;

    log::info!("exiting");
    Ok(())
}
