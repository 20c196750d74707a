//! # Nutrition Module
//!
//! Turns a free-text meal description into calorie and macro totals.
//!
//! The pipeline, in order:
//!
//! 1. **Cache**: the normalized, lower-cased query is the key; a fresh entry
//!    answers immediately.
//! 2. **Live lookup**: see [`client::lookup_totals`]. Skipped when no API key
//!    is configured.
//! 3. **Fallback**: when the live lookup is missing or fails, the built-in
//!    table in [`fallback`] is scanned over the normalized text.
//! 4. **Cache write**: whatever answered is cached for the configured TTL,
//!    including fallback answers.
//!
//! [`NutritionAnalyzer::analyze`] therefore never fails; an all-zero result
//! means no food was recognized.

pub mod client;
pub mod fallback;
pub mod normalize;

use std::ops::{Add, AddAssign};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, Instrument};

use crate::cache::{CacheStats, TtlCache};
use crate::config::NutritionConfig;
use crate::errors::error_logging;
use crate::nutrition_errors::NutritionError;
use crate::observability::{
    nutrition_span, record_nutrition_cache_lookup, record_nutrition_request, NutritionSourceLabel,
};

use self::client::{lookup_totals, NinjasClient, NutritionSource, RetryPolicy};
use self::fallback::fallback_totals;
use self::normalize::{cache_key, normalize_query};

/// Rounded nutrition totals for one meal description
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub kcal: i64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

impl NutritionTotals {
    pub fn is_all_zero(&self) -> bool {
        self.kcal == 0 && self.protein_g == 0.0 && self.fat_g == 0.0 && self.carbs_g == 0.0
    }
}

/// Unrounded running sum of calories and macros
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MacroSum {
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

impl MacroSum {
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein_g: self.protein_g * factor,
            fat_g: self.fat_g * factor,
            carbs_g: self.carbs_g * factor,
        }
    }

    /// Round half to even: kcal to a whole number, macros to one decimal
    pub fn rounded(&self) -> NutritionTotals {
        NutritionTotals {
            kcal: self.calories.round_ties_even() as i64,
            protein_g: round_one_decimal(self.protein_g),
            fat_g: round_one_decimal(self.fat_g),
            carbs_g: round_one_decimal(self.carbs_g),
        }
    }
}

impl Add for MacroSum {
    type Output = MacroSum;

    fn add(self, other: MacroSum) -> MacroSum {
        MacroSum {
            calories: self.calories + other.calories,
            protein_g: self.protein_g + other.protein_g,
            fat_g: self.fat_g + other.fat_g,
            carbs_g: self.carbs_g + other.carbs_g,
        }
    }
}

impl AddAssign for MacroSum {
    fn add_assign(&mut self, other: MacroSum) {
        *self = *self + other;
    }
}

/// Round to one decimal from the exact stored value, ties to even
fn round_one_decimal(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Totals together with the path that produced them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutritionReport {
    pub totals: NutritionTotals,
    pub source: NutritionSourceLabel,
}

impl NutritionReport {
    /// Treat a result that recognized nothing as an error
    pub fn into_result(self) -> Result<NutritionTotals, NutritionError> {
        if self.totals.is_all_zero() {
            Err(NutritionError::Unrecognized)
        } else {
            Ok(self.totals)
        }
    }
}

/// Nutrition pipeline with a process-wide result cache
///
/// The cache is not guarded against concurrent misses: two simultaneous
/// requests for the same new query may both reach the API, and either write
/// is valid.
pub struct NutritionAnalyzer<S = NinjasClient> {
    source: Option<S>,
    cache: TtlCache<String, NutritionTotals>,
    retry: RetryPolicy,
}

impl NutritionAnalyzer<NinjasClient> {
    /// Build the analyzer from configuration; a missing key means fallback-only mode
    pub fn from_config(config: &NutritionConfig) -> Self {
        let source = match NinjasClient::from_config(config) {
            Ok(client) => Some(client),
            Err(NutritionError::MissingApiKey) => {
                info!("No nutrition API key configured, using the fallback table only");
                None
            }
            Err(e) => {
                error_logging::log_network_error(
                    &e,
                    "build_nutrition_client",
                    Some(&config.api_url),
                    None,
                );
                None
            }
        };
        Self::with_source(source, config.cache_ttl(), RetryPolicy::from_config(config))
    }
}

impl<S: NutritionSource> NutritionAnalyzer<S> {
    pub fn with_source(source: Option<S>, cache_ttl: Duration, retry: RetryPolicy) -> Self {
        Self {
            source,
            cache: TtlCache::new(cache_ttl),
            retry,
        }
    }

    /// Whether a live lookup is configured
    pub fn has_live_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Analyze a meal description; never fails
    pub async fn analyze(&self, text: &str) -> NutritionTotals {
        self.analyze_with_source(text).await.totals
    }

    /// Analyze a meal description and report which path answered
    pub async fn analyze_with_source(&self, text: &str) -> NutritionReport {
        let span = nutrition_span("analyze");
        async move {
            let raw = text.trim();
            if raw.is_empty() {
                debug!("Empty meal description, returning zero totals");
                return NutritionReport {
                    totals: NutritionTotals::default(),
                    source: NutritionSourceLabel::Fallback,
                };
            }

            let key = cache_key(raw);
            if let Some(totals) = self.cache.get(&key) {
                record_nutrition_cache_lookup(true);
                record_nutrition_request(NutritionSourceLabel::Cache);
                debug!(cache_key = %key, "Nutrition cache hit");
                return NutritionReport {
                    totals,
                    source: NutritionSourceLabel::Cache,
                };
            }
            record_nutrition_cache_lookup(false);

            let prepared = normalize_query(raw);
            let live = match &self.source {
                Some(source) => lookup_totals(source, raw, &prepared, self.retry).await,
                None => Err(NutritionError::MissingApiKey),
            };

            let report = match live {
                Ok(sum) => NutritionReport {
                    totals: sum.rounded(),
                    source: NutritionSourceLabel::Api,
                },
                Err(err) => {
                    if err != NutritionError::MissingApiKey {
                        error_logging::log_nutrition_fallback(
                            &err,
                            raw,
                            Some(self.retry.max_attempts),
                        );
                    }
                    let scan_text = if prepared.is_empty() { raw } else { prepared.as_str() };
                    NutritionReport {
                        totals: fallback_totals(scan_text),
                        source: NutritionSourceLabel::Fallback,
                    }
                }
            };

            record_nutrition_request(report.source);
            info!(
                source = report.source.as_str(),
                kcal = report.totals.kcal,
                "Nutrition totals computed"
            );
            self.cache.insert(key, report.totals);
            report
        }
        .instrument(span)
        .await
    }
}
