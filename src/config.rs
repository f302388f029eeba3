#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::auth::Locale;

pub const APP_DIR_NAME: &str = "goodsale-pos";
pub const DEFAULT_BASE_URL: &str = "https://good-sale-pos-backend.onrender.com/api";

pub const ENV_API_URL: &str = "GOODSALE_API_URL";
pub const ENV_LOCALE: &str = "GOODSALE_LOCALE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Backend connection
    pub api: ApiSettings,
    /// Session handling
    pub session: SessionSettings,
    /// Language of user-facing messages
    pub locale: Locale,
    /// Fallback log filter when RUST_LOG is unset
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Keep the session cookie across restarts
    pub persist: bool,
    /// Queue session operations instead of letting them race
    pub serialize_operations: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            session: SessionSettings::default(),
            locale: Locale::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            persist: true,
            serialize_operations: false,
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl AppSettings {
    /// Apply `GOODSALE_*` environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(locale) = lookup(ENV_LOCALE) {
            match locale.parse() {
                Ok(locale) => self.locale = locale,
                Err(e) => log::warn!("Ignoring {}: {}", ENV_LOCALE, e),
            }
        }
    }
}

pub struct SettingsManager {
    settings_path: PathBuf,
    settings: AppSettings,
}

impl SettingsManager {
    /// Load from the default location, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn new() -> Result<Self> {
        Self::at(Self::get_settings_path()?)
    }

    pub fn at(settings_path: impl Into<PathBuf>) -> Result<Self> {
        let settings_path = settings_path.into();
        let settings = Self::load_from_file(&settings_path).unwrap_or_else(|e| {
            log::warn!("Using default settings: {:#}", e);
            AppSettings::default()
        });

        Ok(Self {
            settings_path,
            settings,
        })
    }

    pub fn get_settings_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_DIR_NAME).join("settings.json"))
    }

    fn load_from_file(path: &Path) -> Result<AppSettings> {
        if !path.exists() {
            return Ok(AppSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings: AppSettings = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.settings_path, content)?;
        log::info!("Settings saved to: {}", self.settings_path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }

    pub fn get(&self) -> &AppSettings {
        &self.settings
    }

    pub fn update<F>(&mut self, updater: F) -> Result<()>
    where
        F: FnOnce(&mut AppSettings),
    {
        updater(&mut self.settings);
        self.save()
    }
}
