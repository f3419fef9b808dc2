use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{FintrackError, Result};

/// Environment variable that overrides `auth.service_key`.
pub const ENV_SERVICE_KEY: &str = "FINTRACK_SERVICE_KEY";
/// Environment variable that overrides `server.port`.
pub const ENV_PORT: &str = "FINTRACK_PORT";
/// Environment variable that overrides `general.data_dir`.
pub const ENV_DATA_DIR: &str = "FINTRACK_DATA_DIR";

/// Top-level configuration for the fintrack backend.
///
/// Loaded from `~/.fintrack/config.toml` by default. Every section falls back
/// to its defaults when absent from the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FintrackConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl FintrackConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FintrackConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| FintrackError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject settings that cannot be served.
    pub fn validate(&self) -> Result<()> {
        if self.auth.require_service_key && self.auth.service_key.is_none() {
            return Err(FintrackError::Config(
                "auth.require_service_key is set but no service key is configured".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_SERVICE_KEY) {
            if !key.trim().is_empty() {
                self.auth.service_key = Some(key.trim().to_string());
            }
        }
        if let Some(port) = lookup(ENV_PORT) {
            match port.parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(e) => warn!(value = %port, error = %e, "Ignoring invalid {}", ENV_PORT),
            }
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            if !dir.trim().is_empty() {
                self.general.data_dir = dir;
            }
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory holding the SQLite database.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.fintrack/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Origins allowed by the CORS layer.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

/// Finance chatbot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Dashboard link appended to suggested actions. Empty disables the link.
    pub dashboard_url: String,
    /// Answer language when a request does not name one: "vi" or "en".
    pub default_locale: String,
    /// Timezone label assumed when a request does not carry one.
    pub default_timezone: String,
    /// Transactions listed by the recent-transactions answer.
    pub recent_limit: u32,
    /// Transactions returned by the raw rows endpoint.
    pub rows_recent_limit: u32,
    /// Categories fetched for the breakdown answer.
    pub category_limit: u32,
    /// Months covered by the trend answer.
    pub trend_months: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            dashboard_url: "http://localhost:8088".to_string(),
            default_locale: "vi".to_string(),
            default_timezone: "Asia/Bangkok".to_string(),
            recent_limit: 10,
            rows_recent_limit: 20,
            category_limit: 10,
            trend_months: 6,
        }
    }
}

/// Service-key settings for the chatbot endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared key callers pass as `?service_key=`. `None` rejects every
    /// supplied key.
    pub service_key: Option<String>,
    /// Reject requests that omit the key entirely.
    pub require_service_key: bool,
}
