//! Application configuration.
//!
//! Loaded from a TOML file. Resolution order for the file:
//! 1. An explicit path (the CLI's `--config`)
//! 2. The `CRM_CONFIG` environment variable
//! 3. None: built-in defaults
//!
//! `CRM_BASE_URL` and `CRM_TOKEN` override the file's `base_url` and `token`.
//!
//! ```toml
//! base_url = "https://api.example.kg/api"
//! token = "..."
//! page_size = 12
//! max_pages = 500
//! request_timeout_secs = 30
//! utc_offset_hours = 6
//!
//! [query]
//! company = "7"
//! ```

use chrono::FixedOffset;
use list_framework::{FetchError, HttpTransport, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_ENV: &str = "CRM_CONFIG";
pub const BASE_URL_ENV: &str = "CRM_BASE_URL";
pub const TOKEN_ENV: &str = "CRM_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the REST API; relative endpoints are appended to it.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Rows per local page.
    pub page_size: usize,
    /// Upper bound on pages per collection. Unset means only the repeated-cursor guard
    /// stops a walk.
    pub max_pages: Option<usize>,
    pub request_timeout_secs: u64,
    /// Offset of the business's local time from UTC, used to bucket visits into days.
    pub utc_offset_hours: i32,
    /// Parameters added to every request.
    pub query: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
            request_timeout_secs: 30,
            utc_offset_hours: 6,
            query: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Resolve, load, apply environment overrides and validate.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(std::env::var(BASE_URL_ENV).ok(), std::env::var(TOKEN_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read one file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Replace `base_url` / `token` with the given values when present and non-empty.
    pub fn apply_overrides(&mut self, base_url: Option<String>, token: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url is empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".to_string()));
        }
        self.utc_offset()?;
        Ok(())
    }

    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .ok_or_else(|| ConfigError::Invalid(format!("utc_offset_hours out of range: {}", self.utc_offset_hours)))
    }

    /// The HTTP transport these settings describe.
    pub fn transport(&self) -> Result<HttpTransport, FetchError> {
        let mut transport =
            HttpTransport::new(&self.base_url)?.with_timeout(Duration::from_secs(self.request_timeout_secs))?;
        if let Some(token) = &self.token {
            transport = transport.with_token(token.clone());
        }
        for (key, value) in &self.query {
            transport = transport.with_query(key.clone(), value.clone());
        }
        Ok(transport)
    }
}
