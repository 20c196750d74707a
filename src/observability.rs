//! Observability module for centralized metrics, tracing, and logging setup.
//!
//! This module provides:
//! - Structured logging with configurable levels (JSON or pretty)
//! - Prometheus metrics export over HTTP
//! - Span helpers and metric recording functions used by the bot and the
//!   nutrition pipeline

use std::net::SocketAddr;

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::prelude::*;

use crate::observability_config::ObservabilityConfig;

/// Initialize the complete observability stack from the environment
pub fn init_observability() -> Result<()> {
    let config = ObservabilityConfig::from_env();
    init_observability_with_config(&config)
}

/// Initialize the complete observability stack with custom configuration
pub fn init_observability_with_config(config: &ObservabilityConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid observability configuration: {}", e))?;

    // Initialize tracing first so metrics setup is logged
    init_tracing_with_config(config)?;
    init_metrics_with_config(config)?;

    tracing::info!(
        environment = %config.environment,
        metrics_port = %config.metrics_port,
        metrics_export = %config.enable_metrics_export,
        "Observability stack initialized successfully"
    );
    Ok(())
}

/// Initialize structured logging with tracing and configuration
fn init_tracing_with_config(config: &ObservabilityConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("journal_assistant={}", config.log_level).parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("teloxide=warn".parse()?);

    // Pretty for development, JSON for everything else
    if config.is_development()
        || std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string()) == "pretty"
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true),
            )
            .try_init()?;
    }

    tracing::info!(
        environment = %config.environment,
        log_level = %config.log_level,
        "Tracing initialized with structured logging"
    );
    Ok(())
}

/// Install the Prometheus recorder, with its HTTP listener when export is enabled
fn init_metrics_with_config(config: &ObservabilityConfig) -> Result<()> {
    if !config.enable_metrics_export {
        tracing::info!("Metrics export disabled, metric calls are no-ops");
        return Ok(());
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    tracing::info!(metrics_addr = %addr, "Prometheus metrics exporter listening");
    Ok(())
}

/// Create a span for nutrition pipeline operations
pub fn nutrition_span(operation: &str) -> tracing::Span {
    tracing::info_span!(
        "nutrition_operation",
        operation = operation,
        component = "nutrition"
    )
}

/// Create a span for Telegram bot operations
pub fn telegram_span(operation: &str, user_id: Option<i64>) -> tracing::Span {
    tracing::info_span!(
        "telegram_operation",
        operation = operation,
        user_id = user_id,
        component = "telegram"
    )
}

/// Where an analyzed nutrition result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutritionSourceLabel {
    Cache,
    Api,
    Fallback,
}

impl NutritionSourceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NutritionSourceLabel::Cache => "cache",
            NutritionSourceLabel::Api => "api",
            NutritionSourceLabel::Fallback => "fallback",
        }
    }
}

/// Record which path answered a nutrition request
pub fn record_nutrition_request(source: NutritionSourceLabel) {
    metrics::counter!("nutrition_requests_total", "source" => source.as_str()).increment(1);
}

/// Record one HTTP attempt against the nutrition API
pub fn record_nutrition_api_attempt(outcome: &str, duration: std::time::Duration) {
    let outcome = outcome.to_string();
    metrics::counter!("nutrition_api_attempts_total", "outcome" => outcome).increment(1);
    metrics::histogram!("nutrition_api_duration_seconds").record(duration.as_secs_f64());
}

/// Record a nutrition cache lookup
pub fn record_nutrition_cache_lookup(hit: bool) {
    metrics::counter!(
        "nutrition_cache_lookups_total",
        "result" => if hit { "hit" } else { "miss" }
    )
    .increment(1);
}

/// Record the outcome of a reminder-phrase parse
pub fn record_reminder_phrase_parse(matched: bool) {
    metrics::counter!(
        "reminder_phrase_parses_total",
        "result" => if matched { "matched" } else { "unmatched" }
    )
    .increment(1);
}

/// Record Telegram message processing metrics
pub fn record_telegram_message(message_type: &str) {
    let message_type = message_type.to_string();
    metrics::counter!("telegram_messages_total", "type" => message_type).increment(1);
}
