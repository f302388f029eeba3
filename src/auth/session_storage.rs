#[cfg(test)]
#[path = "session_storage_test.rs"]
mod session_storage_test;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::User;
use crate::config::APP_DIR_NAME;

/// What survives a restart: the backend's session cookie and the last
/// known user. Passwords are never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub base_url: String,
    pub cookie: Option<String>,
    pub user: Option<User>,
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(base_url: impl Into<String>, cookie: Option<String>, user: Option<User>) -> Self {
        Self {
            base_url: base_url.into(),
            cookie,
            user,
            saved_at: Utc::now(),
        }
    }

    /// Whether this session was issued by the backend at `base_url`.
    pub fn matches(&self, base_url: &str) -> bool {
        self.base_url.trim_end_matches('/') == base_url.trim_end_matches('/')
    }
}

pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/goodsale-pos/session.json`
    pub fn default_location() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(Self::new(config_dir.join(APP_DIR_NAME).join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let session_data = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, session_data)
            .with_context(|| format!("writing {}", self.path.display()))?;
        log::info!("Session saved successfully");
        Ok(())
    }

    pub fn load(&self) -> Result<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let session_data = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let stored: StoredSession = serde_json::from_str(&session_data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        log::info!(
            "Session loaded successfully for user: {}",
            stored
                .user
                .as_ref()
                .map(User::display_name)
                .unwrap_or_else(|| "<none>".to_string())
        );
        Ok(Some(stored))
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("removing {}", self.path.display()))?;
            log::info!("Session cleared successfully");
        }
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
