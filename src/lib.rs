//! # Journal Assistant Bot
//!
//! A Telegram journal/assistant bot. The library side holds the two text
//! utilities the bot is built around: a reminder-phrase extractor and a
//! nutrition analyzer that turns a free-text meal description into calorie
//! and macro totals.

pub mod bot;
pub mod cache;
pub mod config;
pub mod dialogue;
pub mod errors;
pub mod localization;
pub mod nutrition;
pub mod nutrition_errors;
pub mod observability;
pub mod observability_config;
pub mod reminder_phrase;

// Re-export types for easier access
pub use nutrition::{NutritionAnalyzer, NutritionTotals};
pub use reminder_phrase::{parse_reminder_phrase, ReminderPhrase};
