//! Fixture factories.
//!
//! Each factory owns its configuration and a staged builder; `reset_data`
//! drops whatever was staged so chained test steps start clean.

mod conversation_data;
mod folder_data;
mod prompt_data;

pub use conversation_data::{ConversationData, ERROR_RESPONSE_MESSAGE, FolderConversation};
pub use folder_data::{FolderData, LevelNames};
pub use prompt_data::{FolderPrompts, PromptData};
