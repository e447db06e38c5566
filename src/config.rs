use std::path::PathBuf;

pub const APP_NAME: &str = "task-tracker";
pub const DATA_DIR_ENV: &str = "TASK_TRACKER_DATA_DIR";
const FALLBACK_DATA_DIR: &str = ".task-tracker";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::resolve(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    /// An explicit, non-empty override wins; otherwise the platform data dir,
    /// and a dot directory under the working dir when there is no home.
    pub fn resolve(override_dir: Option<PathBuf>) -> Self {
        let data_dir = override_dir
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| {
                directories::ProjectDirs::from("", "", APP_NAME)
                    .map(|dirs| dirs.data_dir().to_path_buf())
            })
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR));
        Self { data_dir }
    }
}
