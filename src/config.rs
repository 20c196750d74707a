//! # Unified Application Configuration
//!
//! This module consolidates all application settings into a single,
//! structured configuration object loaded from environment variables.
//! Every section has sensible defaults and its own validation.

use crate::errors::{AppError, AppResult};
use crate::observability_config::ObservabilityConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default nutrition API endpoint
pub const DEFAULT_NUTRITION_API_URL: &str = "https://api.api-ninjas.com/v1/nutrition";

/// Primary environment variable holding the nutrition API key
pub const NUTRITION_API_KEY_ENV: &str = "NINJAS_API_KEY";

/// Secondary environment variable consulted when the primary one is unset
pub const NUTRITION_API_KEY_FALLBACK_ENV: &str = "NUTRITION_API_KEY";

/// Bot-specific configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,
    /// HTTP client timeout in seconds
    pub http_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            http_timeout_secs: 30,
        }
    }
}

impl BotConfig {
    /// Validate bot configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.token.trim().is_empty() {
            return Err(AppError::Config("Bot token cannot be empty".to_string()));
        }

        // Telegram bot tokens look like "<numeric id>:<secret>"
        let parts: Vec<&str> = self.token.split(':').collect();
        if parts.len() != 2 {
            return Err(AppError::Config(
                "Bot token format is invalid. Expected format: 'bot_id:bot_token'".to_string(),
            ));
        }

        if parts[0].parse::<u64>().is_err() {
            return Err(AppError::Config(
                "Bot token bot ID must be numeric".to_string(),
            ));
        }

        if parts[1].len() < 20 {
            return Err(AppError::Config(
                "Bot token appears to be too short. Please verify it's a valid token".to_string(),
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(AppError::Config("HTTP timeout cannot be 0".to_string()));
        }

        if self.http_timeout_secs > 300 {
            return Err(AppError::Config(
                "HTTP timeout cannot be greater than 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Nutrition lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// API key for the nutrition endpoint; `None` means fallback-only mode
    pub api_key: Option<String>,
    /// Nutrition endpoint URL
    pub api_url: String,
    /// Per-request timeout in seconds
    pub http_timeout_secs: u64,
    /// How long an analyzed query stays cached
    pub cache_ttl_secs: u64,
    /// Attempts per candidate query on retryable statuses
    pub max_attempts: u32,
    /// First backoff delay; doubles on every further attempt
    pub retry_base_delay_ms: u64,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_NUTRITION_API_URL.to_string(),
            http_timeout_secs: 15,
            cache_ttl_secs: 6 * 60 * 60, // 6 hours
            max_attempts: 4,
            retry_base_delay_ms: 600,
        }
    }
}

impl NutritionConfig {
    /// Load nutrition settings from the environment, keeping defaults for unset values
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            api_key: api_key_from_env(),
            api_url: env::var("NUTRITION_API_URL").unwrap_or(defaults.api_url),
            http_timeout_secs: parse_env("NUTRITION_HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            cache_ttl_secs: parse_env("NUTRITION_CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
            max_attempts: parse_env("NUTRITION_MAX_ATTEMPTS", defaults.max_attempts)?,
            retry_base_delay_ms: parse_env(
                "NUTRITION_RETRY_BASE_DELAY_MS",
                defaults.retry_base_delay_ms,
            )?,
        })
    }

    /// Validate nutrition configuration
    pub fn validate(&self) -> AppResult<()> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "Nutrition API URL must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }

        if let Some(key) = &self.api_key {
            if key.trim().is_empty() {
                return Err(AppError::Config(
                    "Nutrition API key cannot be blank when set".to_string(),
                ));
            }
        }

        if self.http_timeout_secs == 0 || self.http_timeout_secs > 300 {
            return Err(AppError::Config(
                "Nutrition HTTP timeout must be between 1 and 300 seconds".to_string(),
            ));
        }

        if self.cache_ttl_secs == 0 {
            return Err(AppError::Config("Nutrition cache TTL cannot be 0".to_string()));
        }

        if self.max_attempts == 0 || self.max_attempts > 10 {
            return Err(AppError::Config(
                "Nutrition max attempts must be between 1 and 10".to_string(),
            ));
        }

        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }
}

/// Unified application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Bot configuration
    pub bot: BotConfig,
    /// Nutrition lookup configuration
    pub nutrition: NutritionConfig,
    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        config.bot.token = env::var("TELEGRAM_BOT_TOKEN").map_err(|_| {
            AppError::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
        })?;
        config.bot.http_timeout_secs =
            parse_env("HTTP_CLIENT_TIMEOUT_SECS", config.bot.http_timeout_secs)?;

        config.nutrition = NutritionConfig::from_env()?;
        config.observability = ObservabilityConfig::from_env();

        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> AppResult<()> {
        self.bot.validate()?;
        self.nutrition.validate()?;
        self.observability
            .validate()
            .map_err(AppError::Config)?;
        Ok(())
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: bot_token=[REDACTED], nutrition_api_key={}, nutrition_api_url={}, nutrition_cache_ttl_secs={}, metrics_port={}, environment={}",
            if self.nutrition.api_key.is_some() { "[REDACTED]" } else { "<unset>" },
            self.nutrition.api_url,
            self.nutrition.cache_ttl_secs,
            self.observability.metrics_port,
            self.observability.environment
        )
    }
}

/// Nutrition API key: primary variable first, then the secondary one
fn api_key_from_env() -> Option<String> {
    [NUTRITION_API_KEY_ENV, NUTRITION_API_KEY_FALLBACK_ENV]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a valid number", name))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_config_validation() {
        let mut config = BotConfig::default();

        // Invalid: empty token
        assert!(config.validate().is_err());

        // Invalid: malformed token
        config.token = "invalid-token".to_string();
        assert!(config.validate().is_err());

        // Invalid: short token
        config.token = "123:short".to_string();
        assert!(config.validate().is_err());

        config.token = "123456789:AAFakeTokenForTestingPurposes1234567890".to_string();
        assert!(config.validate().is_ok());

        config.http_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nutrition_config_defaults_are_valid() {
        let config = NutritionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache_ttl(), Duration::from_secs(21_600));
        assert_eq!(config.max_attempts, 4);
        assert_eq!(config.retry_base_delay(), Duration::from_millis(600));
        assert_eq!(config.http_timeout(), Duration::from_secs(15));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_nutrition_config_validation() {
        let mut config = NutritionConfig {
            api_url: "ftp://example.com".to_string(),
            ..NutritionConfig::default()
        };
        assert!(config.validate().is_err());
        config.api_url = DEFAULT_NUTRITION_API_URL.to_string();

        config.cache_ttl_secs = 0;
        assert!(config.validate().is_err());
        config.cache_ttl_secs = 60;

        config.max_attempts = 0;
        assert!(config.validate().is_err());
        config.max_attempts = 11;
        assert!(config.validate().is_err());
        config.max_attempts = 4;

        config.api_key = Some("   ".to_string());
        assert!(config.validate().is_err());
        config.api_key = Some("secret".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_summary_redacts_secrets() {
        let mut config = AppConfig::default();
        config.bot.token = "123456789:AAFakeTokenForTestingPurposes1234567890".to_string();
        config.nutrition.api_key = Some("super-secret".to_string());

        let summary = config.summary();
        assert!(!summary.contains("super-secret"));
        assert!(!summary.contains("AAFakeToken"));
        assert!(summary.contains("[REDACTED]"));
    }
}
