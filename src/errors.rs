//! # Application Error Types
//!
//! This module defines common error types used throughout the assistant bot.
//! It provides structured error handling for configuration, nutrition lookups
//! and the chat layer.

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration validation errors
    Config(String),
    /// Validation errors (user input, command arguments)
    Validation(String),
    /// Nutrition lookup errors
    Nutrition(String),
    /// Network/communication errors
    Network(String),
    /// Internal application errors
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            AppError::Validation(msg) => write!(f, "[VALIDATION] {}", msg),
            AppError::Nutrition(msg) => write!(f, "[NUTRITION] {}", msg),
            AppError::Network(msg) => write!(f, "[NETWORK] {}", msg),
            AppError::Internal(msg) => write!(f, "[INTERNAL] {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<crate::nutrition_errors::NutritionError> for AppError {
    fn from(err: crate::nutrition_errors::NutritionError) -> Self {
        AppError::Nutrition(err.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Standardized error logging utilities for consistent error reporting across the application
pub mod error_logging {
    use tracing::{error, warn};

    /// Log a failed nutrition lookup that is about to be answered from the fallback table
    pub fn log_nutrition_fallback(
        error: &impl std::fmt::Display,
        query: &str,
        attempt_count: Option<u32>,
    ) {
        warn!(
            error = %error,
            query = %truncate(query),
            attempt_count = ?attempt_count,
            "Nutrition API lookup failed, using fallback table"
        );
    }

    /// Log network/communication errors with connection context
    pub fn log_network_error(
        error: &impl std::fmt::Display,
        operation: &str,
        endpoint: Option<&str>,
        attempt_count: Option<u32>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            endpoint = ?endpoint,
            attempt_count = ?attempt_count,
            "Network operation failed"
        );
    }

    /// Log internal application errors with component context
    pub fn log_internal_error(
        error: &impl std::fmt::Display,
        component: &str,
        operation: &str,
        user_id: Option<i64>,
    ) {
        error!(
            error = %error,
            component = %component,
            operation = %operation,
            user_id = ?user_id,
            "Internal application error"
        );
    }

    /// Log configuration errors during startup/initialization
    pub fn log_config_error(error: &impl std::fmt::Display, config_key: &str, operation: &str) {
        error!(
            error = %error,
            config_key = %config_key,
            operation = %operation,
            "Configuration error"
        );
    }

    fn truncate(value: &str) -> String {
        if value.chars().count() > 100 {
            format!("{}...", value.chars().take(100).collect::<String>())
        } else {
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition_errors::NutritionError;

    #[test]
    fn test_nutrition_error_conversion() {
        let err: AppError = NutritionError::MissingApiKey.into();
        match err {
            AppError::Nutrition(msg) => assert!(msg.contains("API key")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_display_prefix() {
        assert_eq!(
            AppError::Config("bad ttl".to_string()).to_string(),
            "[CONFIG] bad ttl"
        );
    }
}
