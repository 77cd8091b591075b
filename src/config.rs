use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const APP_DIR_NAME: &str = "ticketdash";
const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_API_ENDPOINT: &str = "TICKETDASH_API_ENDPOINT";
pub const ENV_JWT_SECRET: &str = "TICKETDASH_JWT_SECRET";

/// Resolved runtime configuration: stored values with environment overrides.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub api_endpoint: Option<String>,
    pub jwt_secret: Option<String>,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Ok(Self::resolve(stored, |key| std::env::var(key).ok()))
    }

    pub fn resolve(stored: StoredConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |key: &str, fallback: Option<String>| {
            env(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .or(fallback)
        };

        Self {
            api_endpoint: pick(ENV_API_ENDPOINT, stored.api_endpoint),
            jwt_secret: pick(ENV_JWT_SECRET, stored.jwt_secret),
        }
    }
}

/// On-disk configuration, edited through `config init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    pub api_endpoint: Option<String>,
    pub jwt_secret: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid config file: {err}"))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration("could not determine configuration directory".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}
