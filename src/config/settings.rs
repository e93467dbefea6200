//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;

use super::constants::DEFAULT_DATA_FILE;

/// Application configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Snapshot file backing the document store
    pub data_file: PathBuf,
    /// Signed-in user; `None` means no session
    pub user_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            user_id: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            data_file: env::var("INTERVIEWS_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE)),
            user_id: env::var("INTERVIEWS_USER_ID")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, data_file: Option<PathBuf>, user_id: Option<String>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        if let Some(user) = user_id.filter(|v| !v.trim().is_empty()) {
            self.user_id = Some(user);
        }
        self
    }
}
