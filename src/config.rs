//! Application configuration
//!
//! Stored as JSON at `<config dir>/scurry/config.json`. A missing file
//! means defaults; `SCURRY_DATA_DIR` overrides the data directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::{DomainError, DomainResult};

pub const APP_DIR: &str = "scurry";
pub const DATA_DIR_ENV: &str = "SCURRY_DATA_DIR";
const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_file: String,
    pub log_dir: Option<PathBuf>,
    pub app_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self {
            data_dir,
            db_file: "scurry.db".into(),
            log_dir: None,
            app_name: "Scurry".into(),
        }
    }
}

impl AppConfig {
    /// Load from the default location, applying the env override
    pub fn load() -> DomainResult<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> DomainResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Internal(format!("Failed to read {}: {}", path.display(), e)))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> DomainResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> DomainResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DomainError::Internal(format!("Failed to create config dir: {}", e)))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| DomainError::Internal(format!("Failed to write {}: {}", path.display(), e)))
    }

    pub fn config_path() -> DomainResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| DomainError::Internal("No config directory on this platform".into()))?;
        Ok(base.join(APP_DIR).join("config.json"))
    }

    /// Throwaway configuration backed by an in-memory database
    pub fn in_memory() -> Self {
        Self {
            db_file: IN_MEMORY.into(),
            ..Self::default()
        }
    }

    pub fn db_path(&self) -> PathBuf {
        if self.db_file == IN_MEMORY {
            PathBuf::from(IN_MEMORY)
        } else {
            self.data_dir.join(&self.db_file)
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("logs"))
    }
}
