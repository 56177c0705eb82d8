//! In-memory repository implementation.

use async_trait::async_trait;
use chatseed_core::conversation::{Conversation, ConversationRepository};
use chatseed_core::error::Result;
use chatseed_core::export::ExportData;
use chatseed_core::folder::{Folder, FolderRepository, FolderType};
use chatseed_core::prompt::{Prompt, PromptRepository};
use tokio::sync::RwLock;

/// Inserts `items`, replacing entries with the same id in place.
pub(crate) fn upsert<T: Clone>(target: &mut Vec<T>, items: &[T], id: impl Fn(&T) -> &str) {
    for item in items {
        match target.iter().position(|existing| id(existing) == id(item)) {
            Some(index) => target[index] = item.clone(),
            None => target.push(item.clone()),
        }
    }
}

/// Stores everything in one `ExportData` behind an async lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<ExportData>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: ExportData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    pub async fn snapshot(&self) -> ExportData {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryStore {
    async fn save_all(&self, conversations: &[Conversation]) -> Result<()> {
        upsert(&mut self.data.write().await.history, conversations, |c| c.id.as_str());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Conversation>> {
        Ok(self.data.read().await.history.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Conversation>> {
        Ok(self.data.read().await.history.iter().find(|c| c.id == id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.data.write().await.history.retain(|c| c.id != id);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.data.write().await.history.clear();
        Ok(())
    }
}

#[async_trait]
impl FolderRepository for InMemoryStore {
    async fn save_all(&self, folders: &[Folder]) -> Result<()> {
        upsert(&mut self.data.write().await.folders, folders, |f| f.id.as_str());
        Ok(())
    }

    async fn list_by_type(&self, folder_type: FolderType) -> Result<Vec<Folder>> {
        Ok(self.data.read().await.folders_of_type(folder_type).cloned().collect())
    }

    async fn delete_all(&self, folder_type: FolderType) -> Result<()> {
        self.data.write().await.folders.retain(|f| f.folder_type != folder_type);
        Ok(())
    }
}

#[async_trait]
impl PromptRepository for InMemoryStore {
    async fn save_all(&self, prompts: &[Prompt]) -> Result<()> {
        upsert(&mut self.data.write().await.prompts, prompts, |p| p.id.as_str());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Prompt>> {
        Ok(self.data.read().await.prompts.clone())
    }

    async fn clear(&self) -> Result<()> {
        self.data.write().await.prompts.clear();
        Ok(())
    }
}
