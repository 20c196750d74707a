//! Per-chat conversation state for the calories flow.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Represents the conversation state of one chat
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssistantDialogueState {
    #[default]
    Start,
    /// `/calories` was sent; the next text message is a food list
    WaitingForFoods,
}

/// Type alias for our dialogue
pub type AssistantDialogue = Dialogue<AssistantDialogueState, InMemStorage<AssistantDialogueState>>;
