use std::fs::File;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use directories::UserDirs;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    API_URL_ENV, CONFIG_DIR, CONFIG_FILE, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, LOCAL_STORAGE_DIR,
    SESSION_FILE,
};
use crate::external_api::ApiError;

/// Where records are persisted
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PHP endpoints
    #[default]
    Remote,
    /// JSON files in the data directory
    Local,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base url of the PHP endpoints
    pub api_base_url: String,
    pub storage: StorageBackend,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Directory for the session and local storage, `~/.config/webfolio` when unset
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            storage: StorageBackend::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: None,
        }
    }
}

impl Config {
    /// Reads `~/.config/webfolio/config.json` (defaults when absent), then applies
    /// the `WEBFOLIO_API_URL` override.
    pub fn load() -> Result<Self, ApiError> {
        let path = config_dir()?.join(CONFIG_FILE);
        let config = if path.exists() {
            Self::from_path(&path)?
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };
        config.with_api_url_override(std::env::var(API_URL_ENV).ok())
    }

    pub fn from_path(path: &Path) -> Result<Self, ApiError> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        Ok(Self {
            api_base_url: validate_url(config.api_base_url.clone())?,
            ..config
        })
    }

    pub fn with_api_url_override(self, api_url: Option<String>) -> Result<Self, ApiError> {
        match api_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => Ok(Self {
                api_base_url: validate_url(url.trim().to_string())?,
                ..self
            }),
            None => Ok(self),
        }
    }

    pub fn data_dir(&self) -> Result<PathBuf, ApiError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => config_dir(),
        }
    }

    pub fn local_storage_dir(&self) -> Result<PathBuf, ApiError> {
        Ok(self.data_dir()?.join(LOCAL_STORAGE_DIR))
    }

    pub fn session_path(&self) -> Result<PathBuf, ApiError> {
        Ok(self.data_dir()?.join(SESSION_FILE))
    }
}

fn config_dir() -> Result<PathBuf, ApiError> {
    UserDirs::new()
        .ok_or(ApiError::NotFoundUserDir)
        .map(|user_dirs| user_dirs.home_dir().join(CONFIG_DIR))
}

/// The entered string must be a URL
fn validate_url(mut value: String) -> Result<String, ApiError> {
    let regex = Regex::new(r"^https?://.+$").map_err(|e| ApiError::Parse(e.to_string()))?;
    if !regex.is_match(&value) {
        return Err(ApiError::InvalidUrl);
    }
    if value.ends_with('/') {
        value.pop();
    }
    Ok(value)
}
