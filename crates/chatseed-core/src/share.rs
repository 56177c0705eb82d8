//! Link sharing and publication.
//!
//! Sharing hands out an invitation link for a conversation or a whole folder
//! subtree. Publication copies a folder subtree to a public target path once a
//! reviewer approves the request.

use crate::conversation::Conversation;
use crate::error::{ChatseedError, Result};
use crate::folder::{Folder, hierarchy};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareInvitation {
    pub invitation_id: String,
    /// Ids of the shared folders and conversations.
    pub resources: Vec<String>,
    pub created_at: String,
}

impl ShareInvitation {
    fn new(resources: Vec<String>) -> Self {
        Self {
            invitation_id: uuid::Uuid::new_v4().to_string(),
            resources,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn for_conversation(conversation: &Conversation) -> Self {
        Self::new(vec![conversation.id.clone()])
    }

    /// Shares `folder_id`, every nested folder and every conversation inside
    /// them.
    pub fn for_folder(folders: &[Folder], conversations: &[Conversation], folder_id: &str) -> Result<Self> {
        let subtree = subtree_ids(folders, folder_id)?;
        let mut resources = subtree.clone();
        resources.extend(
            conversations
                .iter()
                .filter(|c| c.folder_id.as_ref().is_some_and(|f| subtree.contains(f)))
                .map(|c| c.id.clone()),
        );
        Ok(Self::new(resources))
    }

    pub fn link(&self, base_url: &str) -> String {
        format!("{}/share/{}", base_url.trim_end_matches('/'), self.invitation_id)
    }
}

/// `folder_id` followed by the ids of all folders nested under it.
fn subtree_ids(folders: &[Folder], folder_id: &str) -> Result<Vec<String>> {
    if !folders.iter().any(|f| f.id == folder_id) {
        return Err(ChatseedError::not_found("folder", folder_id));
    }
    let mut ids = vec![folder_id.to_string()];
    ids.extend(hierarchy::descendants(folders, folder_id).iter().map(|f| f.id.clone()));
    Ok(ids)
}

pub fn mark_conversation_shared(conversation: &mut Conversation) {
    conversation.is_shared = Some(true);
}

/// Flags every conversation in the folder subtree as shared and returns how
/// many were flagged.
pub fn mark_shared(conversations: &mut [Conversation], folders: &[Folder], folder_id: &str) -> Result<usize> {
    let subtree = subtree_ids(folders, folder_id)?;
    let mut count = 0;
    for conversation in conversations
        .iter_mut()
        .filter(|c| c.folder_id.as_ref().is_some_and(|f| subtree.contains(f)))
    {
        conversation.is_shared = Some(true);
        count += 1;
    }
    Ok(count)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedResource {
    pub source_id: String,
    pub target_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRequest {
    pub id: String,
    pub target_folder: String,
    pub resources: Vec<PublishedResource>,
    pub status: PublicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl PublicationRequest {
    /// Collects every conversation below `folder_id`. Target paths keep the
    /// folder nesting, starting at the published folder itself.
    pub fn for_folder(
        folders: &[Folder],
        conversations: &[Conversation],
        folder_id: &str,
        target_folder: &str,
    ) -> Result<Self> {
        let subtree = subtree_ids(folders, folder_id)?;
        let target_folder = target_folder.trim_end_matches('/').to_string();
        let mut resources = Vec::new();

        for conversation in conversations {
            let Some(parent) = conversation.folder_id.as_deref() else {
                continue;
            };
            if !subtree.iter().any(|id| id == parent) {
                continue;
            }
            let chain = hierarchy::ancestors(folders, parent)?;
            let mut segments: Vec<&str> = Vec::new();
            for folder in &chain {
                segments.push(folder.name.as_str());
                if folder.id == folder_id {
                    break;
                }
            }
            segments.reverse();
            resources.push(PublishedResource {
                source_id: conversation.id.clone(),
                target_path: format!("{}/{}/{}", target_folder, segments.join("/"), conversation.name),
            });
        }

        if resources.is_empty() {
            return Err(ChatseedError::invalid_input(format!(
                "folder '{folder_id}' holds no conversations to publish"
            )));
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            target_folder,
            resources,
            status: PublicationStatus::Pending,
            rejection_reason: None,
        })
    }

    fn ensure_pending(&self) -> Result<()> {
        if self.status != PublicationStatus::Pending {
            return Err(ChatseedError::invalid_state(format!(
                "publication '{}' is already {}",
                self.id, self.status
            )));
        }
        Ok(())
    }

    pub fn approve(&mut self) -> Result<()> {
        self.ensure_pending()?;
        self.status = PublicationStatus::Approved;
        Ok(())
    }

    pub fn reject(&mut self, reason: impl Into<String>) -> Result<()> {
        self.ensure_pending()?;
        self.status = PublicationStatus::Rejected;
        self.rejection_reason = Some(reason.into());
        Ok(())
    }
}
