//! # Nutrition Error Types Module
//!
//! Error kind shared by the live nutrition lookup. Every variant ends up in
//! the same place: the analyzer logs it and switches to the fallback table.

/// Custom error types for nutrition lookups
#[derive(Debug, Clone, PartialEq)]
pub enum NutritionError {
    /// No API key configured, the live lookup is unavailable
    MissingApiKey,
    /// Non-success HTTP status from the nutrition API
    Http { status: u16 },
    /// Transport-level failure (connect, timeout, body read)
    Network(String),
    /// Response body that does not have the expected shape
    InvalidResponse(String),
    /// The API answered with an empty item list
    EmptyResponse,
    /// The API answered, but every macro summed to zero
    AllZero,
    /// Nothing to look up
    EmptyQuery,
    /// Neither the API nor the fallback table recognized any food
    Unrecognized,
}

impl NutritionError {
    /// Statuses worth retrying with backoff: rate limiting and transient
    /// upstream failures. Anything else aborts the current candidate query.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            NutritionError::Http {
                status: 429 | 500 | 502 | 503 | 504
            }
        )
    }
}

impl std::fmt::Display for NutritionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NutritionError::MissingApiKey => write!(
                f,
                "[NUTRITION_CONFIG] Nutrition API key is not configured (NINJAS_API_KEY)"
            ),
            NutritionError::Http { status } => {
                write!(f, "[NUTRITION_HTTP] Nutrition API returned HTTP {}", status)
            }
            NutritionError::Network(msg) => {
                write!(f, "[NUTRITION_NETWORK] Network error while calling nutrition API: {}", msg)
            }
            NutritionError::InvalidResponse(msg) => {
                write!(f, "[NUTRITION_FORMAT] Unexpected response from nutrition API: {}", msg)
            }
            NutritionError::EmptyResponse => {
                write!(f, "[NUTRITION_EMPTY] Nutrition API returned no items")
            }
            NutritionError::AllZero => {
                write!(f, "[NUTRITION_ZERO] Nutrition response is all zeros")
            }
            NutritionError::EmptyQuery => write!(f, "[NUTRITION_QUERY] Empty nutrition query"),
            NutritionError::Unrecognized => {
                write!(f, "[NUTRITION_UNKNOWN] No known food found in the text")
            }
        }
    }
}

impl std::error::Error for NutritionError {}

impl From<reqwest::Error> for NutritionError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => NutritionError::Http {
                status: status.as_u16(),
            },
            None => NutritionError::Network(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        for status in [429, 500, 502, 503, 504] {
            assert!(NutritionError::Http { status }.is_retryable());
        }
        for status in [400, 401, 403, 404, 422, 501] {
            assert!(!NutritionError::Http { status }.is_retryable());
        }
        assert!(!NutritionError::Network("reset".to_string()).is_retryable());
        assert!(!NutritionError::AllZero.is_retryable());
    }

    #[test]
    fn test_display_tags() {
        assert!(NutritionError::MissingApiKey
            .to_string()
            .starts_with("[NUTRITION_CONFIG]"));
        assert_eq!(
            NutritionError::Http { status: 503 }.to_string(),
            "[NUTRITION_HTTP] Nutrition API returned HTTP 503"
        );
    }
}
