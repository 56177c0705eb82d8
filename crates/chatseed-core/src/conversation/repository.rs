//! Conversation repository trait.
//!
//! Defines the interface the data injector uses to persist prepared
//! conversations.

use super::model::Conversation;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for conversation persistence.
///
/// This trait decouples fixture preparation from the storage that the
/// application under test reads (local storage dump, REST backend, export
/// file, in-memory map).
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Inserts or replaces the given conversations, keyed by id.
    async fn save_all(&self, conversations: &[Conversation]) -> Result<()>;

    /// Lists all stored conversations in insertion order.
    async fn list_all(&self) -> Result<Vec<Conversation>>;

    /// Finds a conversation by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Conversation))`: Conversation found
    /// - `Ok(None)`: Conversation not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, id: &str) -> Result<Option<Conversation>>;

    /// Deletes a conversation. Deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Removes every stored conversation.
    async fn clear(&self) -> Result<()>;
}
