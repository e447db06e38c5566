use task_tracker_lib::config::AppConfig;
use task_tracker_lib::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    // Keep the handle alive so buffered log lines are flushed on exit.
    let _logger = match init_logging(&config.data_dir) {
        Ok(handle) => Some(handle),
        Err(error) => {
            eprintln!("file logging disabled: {error}");
            None
        }
    };
    task_tracker_lib::run(config)
}
