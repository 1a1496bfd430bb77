//! Plugin configuration.
//!
//! [`PluginConfig`] is the JSON config file (`api` credentials + `sites` registry). A missing file is
//! bootstrapped with defaults. [`AppConfig`] is the env layer on top: config path, log file, delivery
//! timeout and optional credential overrides.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PluginError, Result};
use crate::gewe::mask_token;
use crate::site::SiteRegistry;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_LOG_FILE: &str = "logs/card-bot.log";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Gateway credentials and target.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCredentials {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub app_id: String,
}

impl ApiCredentials {
    /// Placeholder credentials written to a fresh config file.
    pub fn placeholder() -> Self {
        Self {
            token: "gewechat_token".to_string(),
            base_url: "gewechat_base_url".to_string(),
            app_id: "gewechat_app_id".to_string(),
        }
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("token", &mask_token(&self.token))
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id)
            .finish()
    }
}

/// Contents of the plugin config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default)]
    pub api: ApiCredentials,
    #[serde(default)]
    pub sites: SiteRegistry,
}

impl PluginConfig {
    /// Placeholder credentials and the five default sites.
    pub fn default_config() -> Self {
        Self {
            api: ApiCredentials::placeholder(),
            sites: SiteRegistry::default_sites(),
        }
    }

    /// Parses a config document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads `path`; when it does not exist, writes the default config there and returns it.
    pub fn load_or_init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config = Self::from_json(&content)?;
            info!(
                path = %path.display(),
                sites = config.sites.len(),
                "Loaded card plugin config"
            );
            return Ok(config);
        }

        let config = Self::default_config();
        config.write_to(path)?;
        info!(path = %path.display(), "Wrote default card plugin config");
        Ok(config)
    }

    /// Writes the config as 4-space indented JSON, non-ASCII kept as-is.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_pretty_json()?)?;
        Ok(())
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| PluginError::Config(e.to_string()))
    }
}

/// Runtime config: the plugin file plus environment settings. Use [`AppConfig::load`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// CARD_CONFIG_PATH
    pub config_path: PathBuf,
    /// LOG_FILE
    pub log_file: String,
    /// GEWE_TIMEOUT_SECS
    pub timeout_secs: u64,
    pub plugin: PluginConfig,
}

impl AppConfig {
    /// Loads from environment variables; `config_path` overrides CARD_CONFIG_PATH.
    /// GEWE_BASE_URL, GEWE_TOKEN and GEWE_APP_ID override the file's `api` section when set.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = config_path
            .or_else(|| env::var("CARD_CONFIG_PATH").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let timeout_secs = match env::var("GEWE_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                PluginError::Config(format!("GEWE_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let mut plugin = PluginConfig::load_or_init(&config_path)?;
        if let Some(base_url) = non_empty_env("GEWE_BASE_URL") {
            plugin.api.base_url = base_url;
        }
        if let Some(token) = non_empty_env("GEWE_TOKEN") {
            plugin.api.token = token;
        }
        if let Some(app_id) = non_empty_env("GEWE_APP_ID") {
            plugin.api.app_id = app_id;
        }

        Ok(Self {
            config_path,
            log_file,
            timeout_secs,
            plugin,
        })
    }

    /// Fails fast on an unusable base URL or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        let base_url = &self.plugin.api.base_url;
        if reqwest::Url::parse(base_url).is_err() {
            return Err(PluginError::Config(format!(
                "api.base_url is not a valid URL: {} (edit {})",
                base_url,
                self.config_path.display()
            )));
        }
        if self.timeout_secs == 0 {
            return Err(PluginError::Config(
                "GEWE_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn credentials(&self) -> &ApiCredentials {
        &self.plugin.api
    }

    pub fn sites(&self) -> &SiteRegistry {
        &self.plugin.sites
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests;
