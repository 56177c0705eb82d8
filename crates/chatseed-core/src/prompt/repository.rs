//! Prompt repository trait.

use super::model::Prompt;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PromptRepository: Send + Sync {
    /// Inserts or replaces the given prompts, keyed by id.
    async fn save_all(&self, prompts: &[Prompt]) -> Result<()>;

    async fn list_all(&self) -> Result<Vec<Prompt>>;

    async fn clear(&self) -> Result<()>;
}
