use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::infra::webhook::DEFAULT_TIMEOUT_SECS;

const APP_DIR_NAME: &str = "deskline";
const CONFIG_FILE_NAME: &str = "config.json";

pub const ENDPOINT_ENV: &str = "DESKLINE_ENDPOINT_URL";
pub const TIMEOUT_ENV: &str = "DESKLINE_TIMEOUT_SECS";

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| AppError::Configuration("could not locate a config directory".to_string()))
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

/// Settings persisted by `deskline config init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_office: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid config file: {err}"))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint_url: Option<String>,
    pub timeout: Duration,
    pub default_email: Option<String>,
    pub default_floor: Option<String>,
    pub default_office: Option<String>,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Self::resolve(
            stored,
            env::var(ENDPOINT_ENV).ok(),
            env::var(TIMEOUT_ENV).ok(),
        )
    }

    /// Environment values win over the stored file; blank values count as unset.
    pub fn resolve(
        stored: StoredConfig,
        endpoint_override: Option<String>,
        timeout_override: Option<String>,
    ) -> AppResult<Self> {
        let endpoint_url = non_blank(endpoint_override).or_else(|| non_blank(stored.endpoint_url));
        let timeout = match non_blank(timeout_override).or_else(|| non_blank(stored.timeout_secs)) {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            endpoint_url,
            timeout,
            default_email: non_blank(stored.default_email),
            default_floor: non_blank(stored.default_floor),
            default_office: non_blank(stored.default_office),
        })
    }
}

fn parse_timeout(raw: &str) -> AppResult<Duration> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AppError::Configuration(format!(
            "timeout must be a positive number of seconds, got '{raw}'"
        ))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
