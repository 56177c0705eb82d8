//! Repository backed by a single export file.
//!
//! The file always holds a current-version export envelope, so the store can
//! be handed to the application under test as an import file directly.

use crate::dto::ExportFile;
use crate::memory_store::upsert;
use async_trait::async_trait;
use chatseed_core::conversation::{Conversation, ConversationRepository};
use chatseed_core::error::{ChatseedError, Result};
use chatseed_core::export::ExportData;
use chatseed_core::folder::{Folder, FolderRepository, FolderType};
use chatseed_core::prompt::{Prompt, PromptRepository};
use std::path::{Path, PathBuf};

pub struct JsonFileStore {
    file: ExportFile,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: ExportFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    async fn read(&self) -> Result<ExportData> {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| ChatseedError::internal(format!("Storage task failed: {e}")))?
    }

    async fn modify<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ExportData) + Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || {
            file.update(|data| {
                f(data);
                Ok(())
            })
        })
        .await
        .map_err(|e| ChatseedError::internal(format!("Storage task failed: {e}")))?
    }

    pub async fn snapshot(&self) -> Result<ExportData> {
        self.read().await
    }
}

#[async_trait]
impl ConversationRepository for JsonFileStore {
    async fn save_all(&self, conversations: &[Conversation]) -> Result<()> {
        let conversations = conversations.to_vec();
        let count = conversations.len();
        self.modify(move |data| upsert(&mut data.history, &conversations, |c| c.id.as_str()))
            .await?;
        tracing::debug!(count, path = %self.path().display(), "Saved conversations");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Conversation>> {
        Ok(self.read().await?.history)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Conversation>> {
        Ok(self.read().await?.history.into_iter().find(|c| c.id == id))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.modify(move |data| data.history.retain(|c| c.id != id)).await
    }

    async fn clear(&self) -> Result<()> {
        self.modify(|data| data.history.clear()).await
    }
}

#[async_trait]
impl FolderRepository for JsonFileStore {
    async fn save_all(&self, folders: &[Folder]) -> Result<()> {
        let folders = folders.to_vec();
        self.modify(move |data| upsert(&mut data.folders, &folders, |f| f.id.as_str()))
            .await
    }

    async fn list_by_type(&self, folder_type: FolderType) -> Result<Vec<Folder>> {
        Ok(self
            .read()
            .await?
            .folders
            .into_iter()
            .filter(|f| f.folder_type == folder_type)
            .collect())
    }

    async fn delete_all(&self, folder_type: FolderType) -> Result<()> {
        self.modify(move |data| data.folders.retain(|f| f.folder_type != folder_type))
            .await
    }
}

#[async_trait]
impl PromptRepository for JsonFileStore {
    async fn save_all(&self, prompts: &[Prompt]) -> Result<()> {
        let prompts = prompts.to_vec();
        self.modify(move |data| upsert(&mut data.prompts, &prompts, |p| p.id.as_str()))
            .await
    }

    async fn list_all(&self) -> Result<Vec<Prompt>> {
        Ok(self.read().await?.prompts)
    }

    async fn clear(&self) -> Result<()> {
        self.modify(|data| data.prompts.clear()).await
    }
}
