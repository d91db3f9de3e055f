use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::debounce::DEFAULT_SEARCH_DEBOUNCE;
use crate::domain::pagination::DEFAULT_PAGE_SIZE;

pub const API_URL_ENV: &str = "SCHOOL_ADMIN_API_URL";
pub const PAGE_SIZE_ENV: &str = "SCHOOL_ADMIN_PAGE_SIZE";
pub const DEBOUNCE_ENV: &str = "SCHOOL_ADMIN_DEBOUNCE_MS";

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: usize,
    pub search_debounce_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE.as_millis() as u64,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Reads `config.json` from the config directory, then applies the
    /// environment overrides. Falls back to defaults when the directory
    /// cannot be resolved.
    pub fn load() -> Self {
        let from_file = match default_config_path() {
            Ok(path) => Self::load_from(&path).unwrap_or_else(|err| {
                log::warn!("ignoring config file: {err:#}");
                Self::default()
            }),
            Err(err) => {
                log::warn!("{err:#}, using default config");
                Self::default()
            }
        };
        from_file
            .with_overrides(|name| std::env::var(name).ok())
            .sanitized()
    }

    /// A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
        if let Some(raw) = lookup(PAGE_SIZE_ENV) {
            match raw.trim().parse() {
                Ok(size) => self.page_size = size,
                Err(_) => log::warn!("{PAGE_SIZE_ENV}={raw} is not a number"),
            }
        }
        if let Some(raw) = lookup(DEBOUNCE_ENV) {
            match raw.trim().parse() {
                Ok(ms) => self.search_debounce_ms = ms,
                Err(_) => log::warn!("{DEBOUNCE_ENV}={raw} is not a number"),
            }
        }
        self
    }

    pub fn sanitized(mut self) -> Self {
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        self.page_size = self.page_size.max(1);
        self.request_timeout_secs = self.request_timeout_secs.max(1);
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(crate::project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let config: AppConfig =
            serde_json::from_str(r#"{"apiBaseUrl":"ignored","page_size":25}"#).expect("config");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.api_base_url, AppConfig::default().api_base_url);
        assert_eq!(config.search_debounce(), DEFAULT_SEARCH_DEBOUNCE);
    }

    #[test]
    fn environment_overrides_file_values() {
        let config = AppConfig::default()
            .with_overrides(|name| match name {
                API_URL_ENV => Some("https://admin.example.org/api/".to_string()),
                PAGE_SIZE_ENV => Some(" 50 ".to_string()),
                DEBOUNCE_ENV => Some("fast".to_string()),
                _ => None,
            })
            .sanitized();

        assert_eq!(config.api_base_url, "https://admin.example.org/api");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.search_debounce_ms, 300, "bad value is ignored");
    }

    #[test]
    fn sanitize_clamps_zero_sizes() {
        let config = AppConfig {
            page_size: 0,
            request_timeout_secs: 0,
            ..AppConfig::default()
        }
        .sanitized();
        assert_eq!(config.page_size, 1);
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
