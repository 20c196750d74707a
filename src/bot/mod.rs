//! Bot module for handling Telegram interactions
//!
//! - `message_handler`: entry point for every incoming message; routes
//!   commands, the calories flow and reminder requests
//! - `command_handlers`: slash-command parsing and handlers
//! - `ui_builder`: formats replies

pub mod command_handlers;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use command_handlers::{parse_command, BotCommand};
pub use message_handler::message_handler;
pub use ui_builder::{format_nutrition_totals, format_reminder_confirmation};
