//! User configuration, stored as JSON next to the database.
use crate::error::Result;
use crate::models::{QuestionDirection, SessionOptions};
use crate::models::learning_session::{DEFAULT_FEEDBACK_DELAY, DEFAULT_RETYPE_REPETITIONS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

const APP_NAME: &str = "vocab-trainer";
pub const CONFIG_FILE: &str = "config.json";

/// Where config and database live by default. Nothing is created here.
pub fn get_app_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    /// Every list and word is stored under this user id.
    pub owner_id: String,
    pub feedback_delay_ms: u64,
    pub question_direction: QuestionDirection,
    pub retype_repetitions: u8,
    pub log_session_results: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: get_app_data_dir().join("vocab.sqlite3"),
            owner_id: "local".to_string(),
            feedback_delay_ms: DEFAULT_FEEDBACK_DELAY.as_millis() as u64,
            question_direction: QuestionDirection::default(),
            retype_repetitions: DEFAULT_RETYPE_REPETITIONS,
            log_session_results: true,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        get_app_data_dir().join(CONFIG_FILE)
    }

    /// Reads the config at `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Like [`AppConfig::load_from`], falling back to defaults on a broken file.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "invalid configuration, using defaults");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        ensure_parent_dir(path)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Creates the directory that will hold the database file.
    pub fn prepare_data_dir(&self) -> Result<()> {
        ensure_parent_dir(&self.database_path)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            feedback_delay: Duration::from_millis(self.feedback_delay_ms),
            question_direction: self.question_direction,
            retype_repetitions: self.retype_repetitions.max(1),
        }
    }
}
