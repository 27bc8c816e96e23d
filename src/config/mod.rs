//! Configuration for the ClickUp MCP server.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::clickup::{DEFAULT_V2_URL, DEFAULT_V3_URL};
use crate::core::{ClickUpClient, keychain};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "CLICKUP_API_KEY";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub clickup: ClickUpConfig,
}

/// `[clickup]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickUpConfig {
    /// Lowest-precedence source for the API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Root of the v2 API.
    pub base_url_v2: String,

    /// Root of the v3 API.
    pub base_url_v3: String,
}

impl Default for ClickUpConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url_v2: DEFAULT_V2_URL.to_string(),
            base_url_v3: DEFAULT_V3_URL.to_string(),
        }
    }
}

/// Where the API key was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Environment,
    Keychain,
    ConfigFile,
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Environment => API_KEY_ENV,
            Self::Keychain => "keychain",
            Self::ConfigFile => "config file",
        })
    }
}

/// Pick the API key: environment, then keychain, then config file.
///
/// Surrounding whitespace is dropped and blank values are skipped.
///
/// The keychain is only consulted when the environment has no key, since
/// reading it can prompt the user.
pub fn resolve_api_key(
    env: Option<String>,
    keychain: impl FnOnce() -> Option<String>,
    file: Option<&str>,
) -> Option<(String, KeySource)> {
    if let Some(key) = env.as_deref().and_then(usable_key) {
        return Some((key, KeySource::Environment));
    }
    if let Some(key) = keychain().as_deref().and_then(usable_key) {
        return Some((key, KeySource::Keychain));
    }
    file.and_then(usable_key)
        .map(|key| (key, KeySource::ConfigFile))
}

/// Trimmed key, or `None` when nothing is left.
fn usable_key(key: &str) -> Option<String> {
    let key = key.trim();
    (!key.is_empty()).then(|| key.to_string())
}

/// Mask all but the first few characters of a key.
#[must_use]
pub fn redact(key: &str) -> String {
    let visible: String = key.chars().take(5).collect();
    format!("{visible}****")
}

impl Config {
    /// Load from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Get the configuration file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the config directory path (`~/.config/clickup-mcp/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined.
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg_config_home).join("clickup-mcp"));
        }

        if cfg!(target_os = "macos") {
            if let Ok(home) = std::env::var("HOME") {
                return Ok(PathBuf::from(home).join(".config").join("clickup-mcp"));
            }
        }

        let base = directories::BaseDirs::new()
            .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;

        Ok(base.config_dir().join("clickup-mcp"))
    }

    /// API key from the environment, keychain or this config, with its source.
    #[must_use]
    pub fn api_key(&self) -> Option<(String, KeySource)> {
        resolve_api_key(
            std::env::var(API_KEY_ENV).ok(),
            keychain::get_api_key,
            self.clickup.api_key.as_deref(),
        )
    }

    /// API key, or an error naming the variable to set.
    ///
    /// # Errors
    ///
    /// Returns error if no source has a key.
    pub fn require_api_key(&self) -> anyhow::Result<String> {
        self.api_key()
            .map(|(key, source)| {
                tracing::debug!(%source, "using API key");
                key
            })
            .ok_or_else(|| anyhow::anyhow!("{API_KEY_ENV} environment variable is required"))
    }

    /// Build a client with this configuration's key and base URLs.
    ///
    /// # Errors
    ///
    /// Returns error if no API key is configured.
    pub fn client(&self) -> anyhow::Result<ClickUpClient> {
        Ok(self.client_with_key(self.require_api_key()?)?)
    }

    pub(crate) fn client_with_key(&self, api_key: String) -> crate::core::Result<ClickUpClient> {
        Ok(ClickUpClient::new(api_key)?
            .with_base_urls(&self.clickup.base_url_v2, &self.clickup.base_url_v3))
    }

    /// Render for `config show`, with the key masked.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_redacted_toml(&self) -> anyhow::Result<String> {
        let mut shown = self.clone();
        shown.clickup.api_key = shown.clickup.api_key.as_deref().map(redact);
        Ok(toml::to_string_pretty(&shown)?)
    }
}
