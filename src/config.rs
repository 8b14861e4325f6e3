use std::path::PathBuf;

use crate::view::table::TABLE_PAGE_SIZE;

/// Application-level constants
pub const APP_NAME: &str = "Tweet Explorer";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming the dataset file.
pub const DATA_PATH_ENV: &str = "TWEET_EXPLORER_DATA";
/// Dataset file used when neither an argument nor the env var is given.
pub const DEFAULT_DATA_FILE: &str = "ProcessedTweets.csv";

/// Runtime configuration for one process.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub page_size: usize,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            page_size: TABLE_PAGE_SIZE,
            window_size: [1200.0, 900.0],
            min_window_size: [600.0, 400.0],
        }
    }
}

impl AppConfig {
    /// Read the process arguments and environment.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::args().skip(1),
            std::env::var(DATA_PATH_ENV).ok(),
        )
    }

    /// Data path precedence: first positional argument, then the env var,
    /// then [`DEFAULT_DATA_FILE`].
    pub fn resolve(mut args: impl Iterator<Item = String>, env_path: Option<String>) -> Self {
        let data_path = args
            .find(|a| !a.starts_with('-'))
            .or(env_path.filter(|p| !p.trim().is_empty()))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        Self {
            data_path,
            ..Self::default()
        }
    }

    /// Window title, e.g. `Tweet Explorer – ProcessedTweets.csv`.
    pub fn window_title(&self) -> String {
        match self.data_path.file_name() {
            Some(name) => format!("{APP_NAME} – {}", name.to_string_lossy()),
            None => APP_NAME.to_string(),
        }
    }
}
