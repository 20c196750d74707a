//! Live nutrition lookup against the external API
//!
//! The lookup tries the raw query first and the normalized query second.
//! Each candidate gets up to [`RetryPolicy::max_attempts`] attempts; only the
//! retryable statuses (429, 500, 502, 503, 504) are retried, with the delay
//! doubling from [`RetryPolicy::base_delay`]. Any other failure moves on to
//! the next candidate.

use std::future::Future;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::MacroSum;
use crate::config::NutritionConfig;
use crate::errors::error_logging;
use crate::nutrition_errors::NutritionError;
use crate::observability::record_nutrition_api_attempt;

/// Seam between the pipeline and the HTTP API, so tests can substitute it
pub trait NutritionSource: Send + Sync {
    /// Fetch the raw item list the API returns for `query`
    fn fetch_items(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Value>, NutritionError>> + Send;
}

/// HTTP client for an api-ninjas compatible nutrition endpoint
#[derive(Debug, Clone)]
pub struct NinjasClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl NinjasClient {
    pub fn new(http: reqwest::Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from configuration; fails when no API key is configured
    pub fn from_config(config: &NutritionConfig) -> Result<Self, NutritionError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(NutritionError::MissingApiKey)?;

        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|e| NutritionError::Network(e.to_string()))?;

        Ok(Self::new(http, config.api_url.clone(), api_key))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl NutritionSource for NinjasClient {
    async fn fetch_items(&self, query: &str) -> Result<Vec<Value>, NutritionError> {
        let response = self
            .http
            .get(&self.api_url)
            .header("X-Api-Key", &self.api_key)
            .query(&[("query", query)])
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                NutritionError::InvalidResponse(e.to_string())
            } else {
                NutritionError::from(e)
            }
        })?;

        match body {
            Value::Array(items) => Ok(items),
            other => Err(NutritionError::InvalidResponse(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Attempt budget and backoff for one candidate query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(600),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &NutritionConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: config.retry_base_delay(),
        }
    }

    /// Delay after the failed attempt with zero-based index `attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Sum the macro fields across every item of an API response
///
/// Missing and null fields count as zero, numeric strings are accepted.
pub fn sum_items(items: &[Value]) -> Result<MacroSum, NutritionError> {
    let mut total = MacroSum::default();
    for item in items {
        total += MacroSum {
            calories: numeric_field(item, "calories")?,
            protein_g: numeric_field(item, "protein_g")?,
            fat_g: numeric_field(item, "fat_total_g")?,
            carbs_g: numeric_field(item, "carbohydrates_total_g")?,
        };
    }
    Ok(total)
}

fn numeric_field(item: &Value, field: &str) -> Result<f64, NutritionError> {
    match item.get(field) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or(0.0)),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| {
            NutritionError::InvalidResponse(format!("field '{}' is not numeric: {}", field, s))
        }),
        Some(other) => Err(NutritionError::InvalidResponse(format!(
            "field '{}' is {}",
            field,
            json_kind(other)
        ))),
    }
}

/// Run the live lookup for `raw`, falling back to `prepared` as a second candidate
///
/// Returns the unrounded sum of the first candidate whose response is
/// non-empty and not all zero, or the last error seen.
pub async fn lookup_totals<S: NutritionSource>(
    source: &S,
    raw: &str,
    prepared: &str,
    policy: RetryPolicy,
) -> Result<MacroSum, NutritionError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(NutritionError::EmptyQuery);
    }

    let mut candidates = vec![raw];
    if !prepared.is_empty() && prepared != raw {
        candidates.push(prepared);
    }

    let mut last_error = NutritionError::EmptyResponse;

    for (index, query) in candidates.iter().enumerate() {
        for attempt in 0..policy.max_attempts {
            let started = Instant::now();
            let result = fetch_once(source, query).await;

            match result {
                Ok(sum) => {
                    record_nutrition_api_attempt("success", started.elapsed());
                    info!(
                        candidate = index,
                        attempt = attempt + 1,
                        items_kcal = sum.calories,
                        "Nutrition API lookup succeeded"
                    );
                    return Ok(sum);
                }
                Err(err) if err.is_retryable() => {
                    record_nutrition_api_attempt("retryable", started.elapsed());
                    let is_last = attempt + 1 >= policy.max_attempts;
                    warn!(
                        error = %err,
                        candidate = index,
                        attempt = attempt + 1,
                        max_attempts = policy.max_attempts,
                        "Retryable nutrition API failure"
                    );
                    last_error = err;
                    if !is_last {
                        tokio::time::sleep(policy.delay_for(attempt)).await;
                    }
                }
                Err(err) => {
                    record_nutrition_api_attempt(outcome_label(&err), started.elapsed());
                    if let NutritionError::Network(_) = err {
                        error_logging::log_network_error(
                            &err,
                            "nutrition_lookup",
                            None,
                            Some(attempt + 1),
                        );
                    } else {
                        debug!(error = %err, candidate = index, "Nutrition candidate rejected");
                    }
                    last_error = err;
                    break;
                }
            }
        }
    }

    Err(last_error)
}

async fn fetch_once<S: NutritionSource>(source: &S, query: &str) -> Result<MacroSum, NutritionError> {
    let items = source.fetch_items(query).await?;
    if items.is_empty() {
        return Err(NutritionError::EmptyResponse);
    }
    let sum = sum_items(&items)?;
    if sum.rounded().is_all_zero() {
        return Err(NutritionError::AllZero);
    }
    Ok(sum)
}

fn outcome_label(err: &NutritionError) -> &'static str {
    match err {
        NutritionError::Http { .. } => "http_error",
        NutritionError::Network(_) => "network_error",
        NutritionError::InvalidResponse(_) => "invalid_response",
        NutritionError::EmptyResponse => "empty",
        NutritionError::AllZero => "all_zero",
        _ => "error",
    }
}
