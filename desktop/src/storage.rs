use directories::ProjectDirs;
use log::{debug, warn};
use mq_core::StatsStore;
use std::env;
use std::path::PathBuf;

const APP_NAME: &str = "math_quiz";
const ORG_NAME: &str = "practice";
const SAVE_FILE: &str = "stats.json";

/// Overrides the stats file location when set.
pub const STATS_PATH_ENV: &str = "MATH_QUIZ_STATS";

fn get_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", ORG_NAME, APP_NAME).map(|dirs| dirs.data_dir().to_path_buf())
}

fn resolve_stats_path(override_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> PathBuf {
    if let Some(path) = override_path {
        return path;
    }
    match data_dir {
        Some(dir) => dir.join(SAVE_FILE),
        None => {
            warn!("Could not determine data directory, keeping stats in the working directory");
            PathBuf::from(SAVE_FILE)
        }
    }
}

pub fn stats_path() -> PathBuf {
    let override_path = env::var_os(STATS_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let path = resolve_stats_path(override_path, get_data_dir());
    debug!("Stats file: {:?}", path);
    path
}

pub fn open_store() -> StatsStore {
    StatsStore::new(stats_path())
}
