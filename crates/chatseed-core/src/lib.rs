//! Domain model for chat application fixtures: conversations, messages,
//! folders, prompts, replay and playback metadata, naming rules, sharing and
//! the repository seams used to persist prepared data.

pub mod config;
pub mod conversation;
pub mod error;
pub mod export;
pub mod folder;
pub mod model_ref;
pub mod naming;
pub mod prompt;
pub mod repository;
pub mod share;

// Re-export common error type
pub use error::{ChatseedError, Result};
