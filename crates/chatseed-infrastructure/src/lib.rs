//! Infrastructure layer for chatseed.
//!
//! Storage implementations of the repository traits, the versioned export
//! format and configuration loading.

pub mod config_service;
pub mod dto;
pub mod json_store;
pub mod memory_store;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::json_store::JsonFileStore;
pub use crate::memory_store::InMemoryStore;
pub use crate::paths::ChatseedPaths;
