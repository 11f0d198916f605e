//! Configuration for rolod.
//!
//! Loads settings from a TOML file or falls back to defaults. The API
//! key is never written to the config by the installer; it comes from
//! the `ROLO_API_KEY` environment variable unless the file sets it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Default config file path.
pub const CONFIG_PATH: &str = "/etc/rolo/config.toml";

/// Environment variable consulted when the file has no API key.
pub const API_KEY_ENV: &str = "ROLO_API_KEY";

/// Remote LLM settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Chat completions endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key; `None` disables the remote path entirely and every
    /// query runs through the local classifier.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model for query classification.
    #[serde(default = "default_classifier_model")]
    pub classifier_model: String,

    /// Model for engagement advice. Smaller and cheaper than the
    /// classifier model; advice quality degrades gracefully to the
    /// rule-based generator anyway.
    #[serde(default = "default_advice_model")]
    pub advice_model: String,

    /// Per-call timeout in seconds. An unresponsive remote must never
    /// hold a request open indefinitely.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Token cap per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_api_url() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

fn default_classifier_model() -> String {
    "claude-3-opus-20240229".to_string()
}

fn default_advice_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            classifier_model: default_classifier_model(),
            advice_model: default_advice_model(),
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Top-level daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolodConfig {
    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_listen_addr() -> String {
    "127.0.0.1:7810".to_string()
}

impl Default for RolodConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            listen_addr: default_listen_addr(),
        }
    }
}

impl RolodConfig {
    /// Load from `path`, falling back to defaults when the file is
    /// missing. A present-but-invalid file is an error; silently
    /// ignoring a typo'd config is worse than failing startup.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            let config: RolodConfig = toml::from_str(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            config
        } else {
            warn!("No config at {}, using defaults", path.display());
            RolodConfig::default()
        };

        if config.llm.api_key.is_none() {
            config.llm.api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        }
        if config.llm.api_key.is_none() {
            warn!("No API key configured; remote classification disabled");
        }

        Ok(config)
    }
}
