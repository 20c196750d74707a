use anyhow::Result;
use journal_assistant::bot;
use journal_assistant::config::AppConfig;
use journal_assistant::dialogue::{AssistantDialogue, AssistantDialogueState};
use journal_assistant::errors::error_logging;
use journal_assistant::localization;
use journal_assistant::nutrition::NutritionAnalyzer;
use journal_assistant::observability;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;

/// Load and validate configuration, logging what went wrong before bailing out
fn load_config() -> Result<AppConfig> {
    let config = AppConfig::from_env().inspect_err(|e| {
        error_logging::log_config_error(e, "environment", "load_config");
    })?;
    config.validate().inspect_err(|e| {
        error_logging::log_config_error(e, "environment", "validate_config");
    })?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    // Logging comes up first so configuration errors are reported through it
    observability::init_observability()?;

    let config = load_config()?;
    info!("{}", config.summary());

    let localization_manager = localization::create_localization_manager()?;

    let analyzer = Arc::new(NutritionAnalyzer::from_config(&config.nutrition));
    info!(
        live_lookup = analyzer.has_live_source(),
        cache_ttl_secs = config.nutrition.cache_ttl_secs,
        "Nutrition analyzer ready"
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.bot.http_timeout_secs))
        .build()?;

    let bot = Bot::with_client(config.bot.token.clone(), client);

    info!(
        timeout_secs = config.bot.http_timeout_secs,
        "Bot initialized, starting dispatcher"
    );

    let dialogue_storage = InMemStorage::<AssistantDialogueState>::new();

    let handler = dptree::entry().branch(Update::filter_message().endpoint({
        let storage = dialogue_storage.clone();
        let localization = Arc::clone(&localization_manager);
        let analyzer = Arc::clone(&analyzer);
        move |bot: Bot, msg: Message| {
            let storage = storage.clone();
            let localization = Arc::clone(&localization);
            let analyzer = Arc::clone(&analyzer);
            let dialogue = AssistantDialogue::new(storage, msg.chat.id);
            async move { bot::message_handler(bot, msg, dialogue, localization, analyzer).await }
        }
    }));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
