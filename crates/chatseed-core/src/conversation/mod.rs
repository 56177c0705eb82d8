//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `model`: Core conversation entity (`Conversation`)
//! - `message`: Message types (`Role`, `Message`, custom content)
//! - `replay`: Replay metadata and progress (`Replay`, `ReplayProgress`)
//! - `playback`: Playback metadata (`Playback`)
//! - `repository`: Repository trait for conversation persistence

mod message;
mod model;
mod playback;
mod replay;
mod repository;

// Re-export public API
pub use message::{
    Attachment, CustomContent, Invocation, Message, MessageSettings, MessageState, Role, Stage,
    StageStatus,
};
pub use model::Conversation;
pub use playback::Playback;
pub use replay::{Replay, ReplayProgress};
pub use repository::ConversationRepository;
