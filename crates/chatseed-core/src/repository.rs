//! Repository trait re-exports.
//!
//! This module provides centralized access to all repository traits.

pub use crate::conversation::ConversationRepository;
pub use crate::folder::FolderRepository;
pub use crate::prompt::PromptRepository;
