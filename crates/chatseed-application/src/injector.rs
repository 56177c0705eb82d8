//! Data injector
//!
//! Persists prepared fixtures through the repository traits. Before anything is
//! written the batch is checked against what is already stored: folder chains
//! must resolve, every referenced folder must exist and no scope may end up
//! holding the same name twice. When the entity save fails after the folders
//! were written, the folders are put back to what was stored before.

use chatseed_core::conversation::Conversation;
use chatseed_core::error::{ChatseedError, Result};
use chatseed_core::export::ExportData;
use chatseed_core::folder::{Folder, FolderType, hierarchy};
use chatseed_core::naming::ScopedNames;
use chatseed_core::prompt::Prompt;
use chatseed_core::repository::{ConversationRepository, FolderRepository, PromptRepository};
use std::sync::Arc;

/// Stored entities with the same id are replaced by the incoming ones.
fn merge_by_id<T: Clone>(existing: Vec<T>, incoming: &[T], id: impl Fn(&T) -> &str) -> Vec<T> {
    let mut merged: Vec<T> = existing
        .into_iter()
        .filter(|e| !incoming.iter().any(|i| id(i) == id(e)))
        .collect();
    merged.extend_from_slice(incoming);
    merged
}

fn ensure_folders_exist<'a>(
    folder_ids: impl IntoIterator<Item = &'a str>,
    folders: &[Folder],
) -> Result<()> {
    for folder_id in folder_ids {
        if !folders.iter().any(|f| f.id == folder_id) {
            return Err(ChatseedError::not_found("folder", folder_id));
        }
    }
    Ok(())
}

fn ensure_unique_names(names: &ScopedNames) -> Result<()> {
    match names.duplicates().first() {
        Some((scope, name)) => Err(ChatseedError::invalid_input(format!(
            "name '{name}' is used more than once in {scope:?}"
        ))),
        None => Ok(()),
    }
}

/// Writes fixtures into the storage the application under test reads.
pub struct DataInjector {
    conversations: Arc<dyn ConversationRepository>,
    folders: Arc<dyn FolderRepository>,
    prompts: Arc<dyn PromptRepository>,
}

impl DataInjector {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        folders: Arc<dyn FolderRepository>,
        prompts: Arc<dyn PromptRepository>,
    ) -> Self {
        Self {
            conversations,
            folders,
            prompts,
        }
    }

    /// Validates and stores chat `folders` and `conversations`.
    pub async fn create_conversations(&self, conversations: &[Conversation], folders: &[Folder]) -> Result<()> {
        if let Some(folder) = folders.iter().find(|f| f.folder_type != FolderType::Chat) {
            return Err(ChatseedError::invalid_input(format!(
                "folder '{}' is not a chat folder",
                folder.name
            )));
        }

        let stored_folders = self.folders.list_by_type(FolderType::Chat).await?;
        let all_folders = merge_by_id(stored_folders.clone(), folders, |f| f.id.as_str());
        hierarchy::validate_chain(&all_folders)?;
        ensure_folders_exist(
            conversations.iter().filter_map(|c| c.folder_id.as_deref()),
            &all_folders,
        )?;

        let all_conversations = merge_by_id(self.conversations.list_all().await?, conversations, |c| {
            c.id.as_str()
        });
        ensure_unique_names(&ScopedNames::from_entities(&all_conversations, &[], &all_folders))?;

        self.folders.save_all(folders).await?;
        if let Err(e) = self.conversations.save_all(conversations).await {
            self.restore_folders(FolderType::Chat, &stored_folders).await;
            return Err(e);
        }
        tracing::info!(
            conversations = conversations.len(),
            folders = folders.len(),
            "Injected conversations"
        );
        Ok(())
    }

    /// Validates and stores prompt `folders` and `prompts`.
    pub async fn create_prompts(&self, prompts: &[Prompt], folders: &[Folder]) -> Result<()> {
        if let Some(folder) = folders.iter().find(|f| f.folder_type != FolderType::Prompt) {
            return Err(ChatseedError::invalid_input(format!(
                "folder '{}' is not a prompt folder",
                folder.name
            )));
        }

        let stored_folders = self.folders.list_by_type(FolderType::Prompt).await?;
        let all_folders = merge_by_id(stored_folders.clone(), folders, |f| f.id.as_str());
        hierarchy::validate_chain(&all_folders)?;
        ensure_folders_exist(prompts.iter().filter_map(|p| p.folder_id.as_deref()), &all_folders)?;

        let all_prompts = merge_by_id(self.prompts.list_all().await?, prompts, |p| p.id.as_str());
        ensure_unique_names(&ScopedNames::from_entities(&[], &all_prompts, &all_folders))?;

        self.folders.save_all(folders).await?;
        if let Err(e) = self.prompts.save_all(prompts).await {
            self.restore_folders(FolderType::Prompt, &stored_folders).await;
            return Err(e);
        }
        tracing::info!(prompts = prompts.len(), folders = folders.len(), "Injected prompts");
        Ok(())
    }

    /// Replaces conversations that are already stored. The result must still
    /// reference existing chat folders and keep names unique per scope.
    pub async fn update_conversations(&self, conversations: &[Conversation]) -> Result<()> {
        let stored = self.conversations.list_all().await?;
        if let Some(missing) = conversations.iter().find(|c| !stored.iter().any(|s| s.id == c.id)) {
            return Err(ChatseedError::not_found("conversation", &missing.id));
        }

        let chat_folders = self.folders.list_by_type(FolderType::Chat).await?;
        ensure_folders_exist(
            conversations.iter().filter_map(|c| c.folder_id.as_deref()),
            &chat_folders,
        )?;
        let all_conversations = merge_by_id(stored, conversations, |c| c.id.as_str());
        ensure_unique_names(&ScopedNames::from_entities(&all_conversations, &[], &chat_folders))?;

        self.conversations.save_all(conversations).await?;
        tracing::debug!(count = conversations.len(), "Updated conversations");
        Ok(())
    }

    /// Puts the folders of `folder_type` back to `previous` after a failed batch.
    async fn restore_folders(&self, folder_type: FolderType, previous: &[Folder]) {
        let restored = match self.folders.delete_all(folder_type).await {
            Ok(()) => self.folders.save_all(previous).await,
            Err(e) => Err(e),
        };
        match restored {
            Ok(()) => tracing::debug!(%folder_type, "Rolled back folders of a failed batch"),
            Err(e) => tracing::warn!(%folder_type, error = %e, "Failed to roll back folders"),
        }
    }

    /// Removes every conversation, prompt and folder.
    pub async fn delete_all_data(&self) -> Result<()> {
        self.conversations.clear().await?;
        self.prompts.clear().await?;
        self.folders.delete_all(FolderType::Chat).await?;
        self.folders.delete_all(FolderType::Prompt).await?;
        tracing::info!("Deleted all injected data");
        Ok(())
    }

    /// Everything currently stored, in export shape.
    pub async fn snapshot(&self) -> Result<ExportData> {
        let mut folders = self.folders.list_by_type(FolderType::Chat).await?;
        folders.extend(self.folders.list_by_type(FolderType::Prompt).await?);
        Ok(ExportData {
            history: self.conversations.list_all().await?,
            folders,
            prompts: self.prompts.list_all().await?,
        })
    }
}
