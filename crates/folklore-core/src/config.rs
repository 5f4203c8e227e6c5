use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{DEFAULT_API_BASE, POLL_INTERVAL_SECS, STORIES_PER_PAGE};

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub api_base: String,
    pub data_dir: PathBuf,
    pub per_page: u32,
    pub poll_interval: Duration,
}

impl CoreConfig {
    pub fn new<S: Into<String>, P: AsRef<Path>>(api_base: S, data_dir: P) -> Self {
        Self {
            api_base: api_base.into(),
            data_dir: data_dir.as_ref().to_path_buf(),
            per_page: STORIES_PER_PAGE,
            poll_interval: Duration::from_secs(POLL_INTERVAL_SECS),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folklore");
        Self::new(DEFAULT_API_BASE, data_dir)
    }
}
