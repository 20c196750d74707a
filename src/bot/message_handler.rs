//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, info, Instrument};

use crate::dialogue::{AssistantDialogue, AssistantDialogueState};
use crate::errors::error_logging;
use crate::localization::{t_lang, LocalizationManager};
use crate::nutrition::NutritionAnalyzer;
use crate::nutrition_errors::NutritionError;
use crate::observability;
use crate::reminder_phrase::parse_reminder_phrase;

use super::command_handlers::{
    handle_calories_command, handle_help_command, handle_kcal_command, handle_start_command,
    parse_command, BotCommand,
};
use super::ui_builder::{format_nutrition_totals, format_reminder_confirmation};

/// Stems that route a free-text message straight to the calorie counter
const CALORIE_KEYWORDS: [&str; 2] = ["калор", "calor"];

/// Whether a free-text message asks for a calorie count
pub fn mentions_calories(text: &str) -> bool {
    let lower = text.to_lowercase();
    CALORIE_KEYWORDS.iter().any(|stem| lower.contains(stem))
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: AssistantDialogue,
    localization: Arc<LocalizationManager>,
    analyzer: Arc<NutritionAnalyzer>,
) -> Result<()> {
    let user_id = msg.from.as_ref().map(|u| u.id.0 as i64);
    let span = observability::telegram_span("message_handler", user_id);

    async move {
        let message_type = if msg.text().is_some() { "text" } else { "unsupported" };
        observability::record_telegram_message(message_type);

        let result = match msg.text() {
            Some(text) => {
                handle_text_message(&bot, &msg, text, &dialogue, &localization, &analyzer).await
            }
            None => handle_unsupported_message(&bot, &msg, &localization).await,
        };

        if let Err(e) = &result {
            error_logging::log_internal_error(e, "message_handler", "handle_message", user_id);
        }
        result
    }
    .instrument(span)
    .await
}

async fn handle_text_message(
    bot: &Bot,
    msg: &Message,
    text: &str,
    dialogue: &AssistantDialogue,
    localization: &Arc<LocalizationManager>,
    analyzer: &NutritionAnalyzer,
) -> Result<()> {
    debug!(user_id = %msg.chat.id, message_length = text.len(), "Received text message from user");

    // Extract user's language code from Telegram
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());

    if let Some(command) = parse_command(text) {
        return match command {
            BotCommand::Start => {
                handle_start_command(bot, msg, dialogue, localization, language_code).await
            }
            BotCommand::Help => handle_help_command(bot, msg, localization, language_code).await,
            BotCommand::Calories => {
                handle_calories_command(bot, msg, dialogue, localization, language_code).await
            }
            BotCommand::Kcal(foods) => {
                handle_kcal_command(
                    bot,
                    msg,
                    &foods,
                    dialogue,
                    localization,
                    analyzer,
                    language_code,
                )
                .await
            }
        };
    }

    if dialogue.get().await? == Some(AssistantDialogueState::WaitingForFoods) {
        dialogue.update(AssistantDialogueState::Start).await?;
        return reply_with_nutrition(bot, msg, text, localization, analyzer, language_code).await;
    }

    if mentions_calories(text) {
        return reply_with_nutrition(bot, msg, text, localization, analyzer, language_code).await;
    }

    let phrase = parse_reminder_phrase(text);
    observability::record_reminder_phrase_parse(phrase.is_some());
    match phrase {
        Some(phrase) => {
            info!(user_id = %msg.chat.id, what = %phrase.what, when = %phrase.when, "Reminder request recognized");
            let reply = format_reminder_confirmation(localization, &phrase, language_code);
            bot.send_message(msg.chat.id, reply).await?;
        }
        None => {
            debug!(user_id = %msg.chat.id, "Text message is neither a command nor a reminder");
        }
    }
    Ok(())
}

/// Analyze `foods` and reply with the totals
pub async fn reply_with_nutrition(
    bot: &Bot,
    msg: &Message,
    foods: &str,
    localization: &LocalizationManager,
    analyzer: &NutritionAnalyzer,
    language_code: Option<&str>,
) -> Result<()> {
    let foods = foods.trim();
    if foods.is_empty() {
        bot.send_message(msg.chat.id, t_lang(localization, "calories-empty", language_code))
            .await?;
        return Ok(());
    }

    bot.send_message(
        msg.chat.id,
        t_lang(localization, "calories-processing", language_code),
    )
    .await?;

    let report = analyzer.analyze_with_source(foods).await;
    debug!(user_id = %msg.chat.id, source = report.source.as_str(), "Nutrition report ready");

    let reply = match report.into_result() {
        Ok(totals) => format_nutrition_totals(localization, &totals, language_code),
        Err(NutritionError::Unrecognized) => {
            t_lang(localization, "calories-unrecognized", language_code)
        }
        Err(e) => crate::localization::t_args_lang(
            localization,
            "calories-error",
            &[("msg", e.to_string().as_str())],
            language_code,
        ),
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

/// Handle unsupported message types
pub async fn handle_unsupported_message(
    bot: &Bot,
    msg: &Message,
    localization: &Arc<LocalizationManager>,
) -> Result<()> {
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());

    debug!(user_id = %msg.chat.id, "Received unsupported message type from user");

    bot.send_message(
        msg.chat.id,
        t_lang(localization, "unsupported-message", language_code),
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions_calories() {
        assert!(mentions_calories("Сколько калорий в 2 яйцах?"));
        assert!(mentions_calories("calories: 100 g rice"));
        assert!(mentions_calories("Калорії: 200 г курки"));
        assert!(!mentions_calories("напомни купить хлеб в 18:00"));
    }
}
