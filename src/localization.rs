//! Localization for bot replies, backed by Fluent bundles
//!
//! Bundles for every supported language are compiled into the binary from
//! `locales/<lang>/main.ftl`. Unknown languages fall back to Russian.

use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Language used when the user's language is missing or unsupported
pub const DEFAULT_LANGUAGE: &str = "ru";

/// Supported languages and their Fluent sources
const LOCALES: [(&str, &str); 3] = [
    ("ru", include_str!("../locales/ru/main.ftl")),
    ("uk", include_str!("../locales/uk/main.ftl")),
    ("en", include_str!("../locales/en/main.ftl")),
];

/// Localization manager holding one bundle per supported language
///
/// Bundles use the thread-safe memoizer so the manager can be shared
/// between handler tasks.
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a new localization manager
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for (locale_str, source) in LOCALES {
            let locale: LanguageIdentifier = locale_str.parse()?;
            let bundle = Self::create_bundle(locale, source)?;
            bundles.insert(locale_str.to_string(), bundle);
        }

        Ok(Self { bundles })
    }

    fn create_bundle(locale: LanguageIdentifier, source: &str) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Plain-text chat replies, no bidi isolation marks around arguments
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Invalid Fluent resource for {}: {:?}", locale, errors))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Duplicate Fluent messages for {}: {:?}", locale, errors))?;

        Ok(bundle)
    }

    /// Get a localized message in a specific language
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&FluentArgs>,
    ) -> String {
        let bundle = match self
            .bundles
            .get(language)
            .or_else(|| self.bundles.get(DEFAULT_LANGUAGE))
        {
            Some(bundle) => bundle,
            None => return format!("Missing translation: {}", key),
        };

        let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) else {
            warn!(key = %key, language = %language, "Missing translation");
            return format!("Missing translation: {}", key);
        };

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!(key = %key, language = %language, errors = ?errors, "Fluent formatting errors");
        }
        value.into_owned()
    }

    /// Get a localized message with string arguments in a specific language
    pub fn get_message_with_args_in_language(
        &self,
        key: &str,
        language: &str,
        args: &[(&str, &str)],
    ) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.get_message_in_language(key, language, Some(&fluent_args))
    }

    /// Check if a language is supported
    pub fn is_language_supported(&self, language: &str) -> bool {
        self.bundles.contains_key(language)
    }
}

/// Create the shared localization manager
pub fn create_localization_manager() -> Result<Arc<LocalizationManager>> {
    Ok(Arc::new(LocalizationManager::new()?))
}

/// Map a Telegram language code to a supported language
///
/// Only the first two letters count; the non-standard `ua` is read as
/// Ukrainian.
pub fn detect_language(language_code: Option<&str>) -> &'static str {
    let code: String = language_code
        .unwrap_or_default()
        .chars()
        .take(2)
        .collect::<String>()
        .to_lowercase();

    match code.as_str() {
        "ua" | "uk" => "uk",
        "en" => "en",
        _ => DEFAULT_LANGUAGE,
    }
}

/// Localized message in the user's language
pub fn t_lang(manager: &LocalizationManager, key: &str, language_code: Option<&str>) -> String {
    manager.get_message_in_language(key, detect_language(language_code), None)
}

/// Localized message with arguments in the user's language
pub fn t_args_lang(
    manager: &LocalizationManager,
    key: &str,
    args: &[(&str, &str)],
    language_code: Option<&str>,
) -> String {
    manager.get_message_with_args_in_language(key, detect_language(language_code), args)
}
