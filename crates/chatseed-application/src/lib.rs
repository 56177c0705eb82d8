//! Application layer for chatseed.
//!
//! This crate builds fixture data on top of the domain types in
//! `chatseed-core`: single-entity builders, scenario factories, derived
//! replay/playback/history conversations, and the injector that persists
//! prepared data through the repository traits.

pub mod builder;
pub mod fixtures;
pub mod generator;
pub mod injector;
pub mod transform;

pub use fixtures::{ConversationData, FolderData, PromptData};
pub use injector::DataInjector;
