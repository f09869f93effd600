use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    errors::{ConfigError, StorageError},
    ledger::ExpenseDate,
    storage::{FileStore, KeyValuePersistence, DEFAULT_STORAGE_KEY},
    utils::{atomic, paths},
    validation::{ValidationRules, DEFAULT_MAX_DESCRIPTION_CHARS},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_description_chars: usize,
    pub reject_future_dates: bool,
    pub storage_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_description_chars: DEFAULT_MAX_DESCRIPTION_CHARS,
            reject_future_dates: false,
            storage_key: DEFAULT_STORAGE_KEY.into(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_description_chars == 0 {
            return Err(ConfigError::Invalid(
                "max_description_chars must be at least 1".into(),
            ));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be blank".into()));
        }
        Ok(())
    }

    /// Rules for the validator; the future-date bound is today's local date.
    pub fn validation_rules(&self) -> ValidationRules {
        let rules =
            ValidationRules::default().with_max_description_chars(self.max_description_chars);
        match ExpenseDate::new(Local::now().date_naive()) {
            Some(today) if self.reject_future_dates => rules.with_latest_date(today),
            _ => rules,
        }
    }

    /// Directory holding stored expenses, defaulting under the app data dir.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| paths::store_dir_in(&paths::app_data_dir()))
    }

    /// File-backed persistence rooted at [`Config::resolved_data_dir`].
    pub fn open_storage(&self) -> Result<KeyValuePersistence<FileStore>, StorageError> {
        let store = FileStore::new(self.resolved_data_dir())?;
        Ok(KeyValuePersistence::new(store, self.storage_key.clone()))
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    /// Reads the stored configuration, falling back to defaults when absent.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        atomic::write_atomic(&self.path, json.as_bytes())?;
        info!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
