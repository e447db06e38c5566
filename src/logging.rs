use std::path::Path;

pub const LOG_ENV: &str = "TASK_TRACKER_LOG";
pub const LOG_FILE_BASENAME: &str = "task-tracker";
pub const LOG_FILE_SUFFIX: &str = "log";
pub const LOG_ROTATE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
pub const LOG_ROTATE_KEEP_FILES: usize = 5;

/// Log files sit next to the stored tasks.
pub fn log_directory(app_data_dir: &Path) -> &Path {
    app_data_dir
}

/// `TASK_TRACKER_LOG` first, then `RUST_LOG`, then a build-dependent default.
pub fn log_spec(primary: Option<String>, fallback: Option<String>) -> String {
    let default_spec = if cfg!(debug_assertions) {
        "warn,task_tracker_lib=debug"
    } else {
        "warn,task_tracker_lib=info"
    };
    primary
        .filter(|value| !value.trim().is_empty())
        .or_else(|| fallback.filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| default_spec.to_string())
}

#[cfg(all(feature = "app", not(test)))]
pub fn init_logging(
    app_data_dir: &Path,
) -> Result<flexi_logger::LoggerHandle, flexi_logger::FlexiLoggerError> {
    use flexi_logger::{detailed_format, Cleanup, Criterion, FileSpec, Logger, Naming, WriteMode};

    std::fs::create_dir_all(app_data_dir)?;

    let spec = log_spec(std::env::var(LOG_ENV).ok(), std::env::var("RUST_LOG").ok());

    // The terminal is owned by the UI, so nothing is duplicated to stdout.
    let handle = Logger::try_with_str(spec)?
        .log_to_file(
            FileSpec::default()
                .directory(log_directory(app_data_dir))
                .basename(LOG_FILE_BASENAME)
                .suffix(LOG_FILE_SUFFIX),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .format_for_files(detailed_format)
        .rotate(
            Criterion::Size(LOG_ROTATE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(LOG_ROTATE_KEEP_FILES),
        )
        .start()?;

    install_panic_hook();

    log::info!(
        "logger initialized dir={} rotate_size_bytes={} keep_files={}",
        log_directory(app_data_dir).display(),
        LOG_ROTATE_SIZE_BYTES,
        LOG_ROTATE_KEEP_FILES
    );
    Ok(handle)
}

/// Text carried by a panic, for the two payload types `panic!` produces.
pub fn panic_payload_text(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.as_str()
    } else {
        "<opaque panic payload>"
    }
}

/// Writes the panic into the log file, then hands over to the hook that was
/// installed before. The terminal UI chains its own restore hook on top.
#[cfg(all(feature = "app", not(test)))]
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info: &std::panic::PanicHookInfo<'_>| {
        let location = info
            .location()
            .map_or_else(|| "<unknown>".to_string(), ToString::to_string);
        log::error!(
            "panic at {location}: {}\n{}",
            panic_payload_text(info.payload()),
            std::backtrace::Backtrace::force_capture()
        );
        previous(info);
    }));
}
