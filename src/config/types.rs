// Configuration type definitions

use std::time::Duration;

use serde::Deserialize;

use crate::error::NotesError;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 4000;

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_notification_timeout_ms() -> u64 {
    DEFAULT_NOTIFICATION_TIMEOUT_MS
}

/// Completion service section (`[ai]`)
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Validated settings the completion gateway is built from
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AiConfig {
    /// Resolve the gateway settings, failing fast on anything unusable
    ///
    /// `env_api_key` (from `OPENAI_API_KEY`) wins over the file's `api_key`;
    /// `model_override` (from `--model`) wins over the file's `model`.
    /// `config_location` is only used to make the missing-key message useful.
    pub fn resolve(
        &self,
        env_api_key: Option<String>,
        model_override: Option<String>,
        config_location: &str,
    ) -> Result<GatewayConfig, NotesError> {
        let api_key = env_api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                self.api_key
                    .as_ref()
                    .filter(|k| !k.trim().is_empty())
                    .cloned()
            })
            .ok_or_else(|| NotesError::MissingApiKey(config_location.to_string()))?;

        let model = model_override.unwrap_or_else(|| self.model.clone());
        if model.trim().is_empty() {
            return Err(NotesError::Config("ai.model must not be empty".to_string()));
        }

        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(NotesError::Config(format!(
                "ai.endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }

        if self.timeout_secs == 0 {
            return Err(NotesError::Config(
                "ai.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(GatewayConfig {
            api_key: api_key.trim().to_string(),
            model: model.trim().to_string(),
            endpoint: self.endpoint.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

/// Notification section (`[notifications]`)
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_notification_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        NotificationConfig {
            timeout_ms: default_notification_timeout_ms(),
        }
    }
}

impl NotificationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}
