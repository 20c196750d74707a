//! Command Handlers module for processing bot commands

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::debug;

use crate::dialogue::{AssistantDialogue, AssistantDialogueState};
use crate::localization::{t_lang, LocalizationManager};
use crate::nutrition::NutritionAnalyzer;

use super::message_handler::reply_with_nutrition;
use super::ui_builder::{format_help_message, format_welcome_message};

/// Commands the bot understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    /// Ask for a food list in the next message
    Calories,
    /// Analyze the foods given inline
    Kcal(String),
}

/// Parse a slash command, tolerating a `@botname` suffix
///
/// Returns `None` for plain text and for unknown commands.
pub fn parse_command(text: &str) -> Option<BotCommand> {
    let text = text.trim();
    let rest = text.strip_prefix('/')?;

    let (head, args) = match rest.find(char::is_whitespace) {
        Some(pos) => (&rest[..pos], rest[pos..].trim()),
        None => (rest, ""),
    };
    let name = head.split('@').next().unwrap_or(head).to_lowercase();

    match name.as_str() {
        "start" => Some(BotCommand::Start),
        "help" => Some(BotCommand::Help),
        "calories" => Some(BotCommand::Calories),
        "kcal" => Some(BotCommand::Kcal(args.to_string())),
        _ => None,
    }
}

/// Handle the /start command
pub async fn handle_start_command(
    bot: &Bot,
    msg: &Message,
    dialogue: &AssistantDialogue,
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
) -> Result<()> {
    dialogue.update(AssistantDialogueState::Start).await?;
    bot.send_message(msg.chat.id, format_welcome_message(localization, language_code))
        .await?;
    Ok(())
}

/// Handle the /help command
pub async fn handle_help_command(
    bot: &Bot,
    msg: &Message,
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
) -> Result<()> {
    bot.send_message(msg.chat.id, format_help_message(localization, language_code))
        .await?;
    Ok(())
}

/// Handle the /calories command: ask for the foods and wait for them
pub async fn handle_calories_command(
    bot: &Bot,
    msg: &Message,
    dialogue: &AssistantDialogue,
    localization: &Arc<LocalizationManager>,
    language_code: Option<&str>,
) -> Result<()> {
    debug!(user_id = %msg.chat.id, "Waiting for a food list");
    dialogue.update(AssistantDialogueState::WaitingForFoods).await?;
    bot.send_message(msg.chat.id, t_lang(localization, "calories-ask", language_code))
        .await?;
    Ok(())
}

/// Handle `/kcal <foods>`; without foods it behaves like /calories
pub async fn handle_kcal_command(
    bot: &Bot,
    msg: &Message,
    foods: &str,
    dialogue: &AssistantDialogue,
    localization: &Arc<LocalizationManager>,
    analyzer: &NutritionAnalyzer,
    language_code: Option<&str>,
) -> Result<()> {
    if foods.trim().is_empty() {
        return handle_calories_command(bot, msg, dialogue, localization, language_code).await;
    }
    reply_with_nutrition(bot, msg, foods, localization, analyzer, language_code).await
}
