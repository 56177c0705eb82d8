//! Single-entity builders.

mod conversation;
mod folder;
mod prompt;

pub use conversation::ConversationBuilder;
pub use folder::FolderBuilder;
pub use prompt::PromptBuilder;
