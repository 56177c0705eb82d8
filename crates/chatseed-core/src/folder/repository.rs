//! Folder repository trait.

use super::model::{Folder, FolderType};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for folder persistence.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// Inserts or replaces the given folders, keyed by id.
    async fn save_all(&self, folders: &[Folder]) -> Result<()>;

    /// Lists the stored folders of one type in insertion order.
    async fn list_by_type(&self, folder_type: FolderType) -> Result<Vec<Folder>>;

    /// Removes every stored folder of one type.
    async fn delete_all(&self, folder_type: FolderType) -> Result<()>;
}
