//! Secrets from the environment and tunables from TOML.

use crate::ScheduleType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tr4c3_error::{ConfigError, Tr4c3Result};
use tr4c3_models::{DEFAULT_OPENAI_BASE_URL, GenerationSettings};
use tr4c3_social::{DEFAULT_API_BASE_URL, OAuthCredentials};

/// Environment variable holding the completion API key.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable holding the OAuth consumer key.
pub const TWITTER_API_KEY: &str = "TWITTER_API_KEY";
/// Environment variable holding the OAuth consumer secret.
pub const TWITTER_API_SECRET: &str = "TWITTER_API_SECRET";
/// Environment variable holding the OAuth access token.
pub const TWITTER_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
/// Environment variable holding the OAuth access token secret.
pub const TWITTER_ACCESS_SECRET: &str = "TWITTER_ACCESS_SECRET";
/// Optional override for the completion API host.
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
/// Optional override for the Twitter API host.
pub const TWITTER_API_BASE_URL: &str = "TWITTER_API_BASE_URL";

/// Every secret the bot needs before it can run a cycle.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    openai_api_key: String,
    twitter: OAuthCredentials,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &"<redacted>")
            .field("twitter", &self.twitter)
            .finish()
    }
}

impl Credentials {
    /// Read secrets from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first variable that is unset or
    /// blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read secrets through an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| -> Result<String, ConfigError> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                Some(_) => Err(ConfigError::new(format!(
                    "Environment variable {} is empty",
                    name
                ))),
                None => Err(ConfigError::new(format!(
                    "Missing required environment variable {}",
                    name
                ))),
            }
        };

        let openai_api_key = require(OPENAI_API_KEY)?;
        let twitter = OAuthCredentials::new(
            require(TWITTER_API_KEY)?,
            require(TWITTER_API_SECRET)?,
            require(TWITTER_ACCESS_TOKEN)?,
            require(TWITTER_ACCESS_SECRET)?,
        );

        Ok(Self {
            openai_api_key,
            twitter,
        })
    }

    /// Completion API key.
    pub fn openai_api_key(&self) -> &str {
        &self.openai_api_key
    }

    /// OAuth 1.0a user-context credentials.
    pub fn twitter(&self) -> &OAuthCredentials {
        &self.twitter
    }
}

/// Hosts the bot talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEndpoints {
    /// OpenAI-compatible completion host
    pub openai_base_url: String,
    /// Twitter API host
    pub twitter_base_url: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            twitter_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl ApiEndpoints {
    /// Production hosts, overridden by environment variables when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Production hosts, overridden through an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let pick = |name: &str, fallback: String| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(fallback)
        };

        Self {
            openai_base_url: pick(OPENAI_BASE_URL, defaults.openai_base_url),
            twitter_base_url: pick(TWITTER_API_BASE_URL, defaults.twitter_base_url),
        }
    }
}

/// Configuration for the bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// When cycles run
    pub schedule: ScheduleType,
    /// Run a cycle as soon as the scheduler starts
    pub run_on_start: bool,
    /// Only answer mentions newer than this id on the first cycle
    pub since_id: Option<String>,
    /// Mention reply behavior
    pub replies: ReplyConfig,
    /// Completion and post-processing settings
    pub generation: GenerationSettings,
    /// Manual trigger server
    pub server: ServerConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            schedule: ScheduleType::default(),
            run_on_start: true,
            since_id: None,
            replies: ReplyConfig::default(),
            generation: GenerationSettings::default(),
            server: ServerConfig::default(),
        }
    }
}

impl BotConfig {
    /// Load bot configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Tr4c3Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse and validate bot configuration from TOML text.
    pub fn from_toml(content: &str) -> Tr4c3Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.schedule.validate()?;
        if !(5..=100).contains(&self.replies.page_size) {
            return Err(ConfigError::new(format!(
                "replies.page_size must be between 5 and 100, got {}",
                self.replies.page_size
            )));
        }
        if *self.generation.max_length() == 0 {
            return Err(ConfigError::new("generation.max_length must be at least 1"));
        }
        Ok(())
    }
}

/// Configuration for the mention reply loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    /// Whether cycles answer mentions at all
    pub enabled: bool,
    /// Most mentions answered per cycle
    pub max_per_cycle: usize,
    /// Pause between successive replies (seconds)
    pub delay_seconds: u64,
    /// Page size requested from the mentions endpoint
    pub page_size: u32,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_per_cycle: 3,
            delay_seconds: 2,
            page_size: 10,
        }
    }
}

impl ReplyConfig {
    /// Pause between successive replies.
    pub fn delay(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.delay_seconds)
    }
}

/// Configuration for the manual trigger server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".to_string(),
        }
    }
}
