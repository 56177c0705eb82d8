//! Conversation message types.
//!
//! This module contains the message record stored inside a conversation,
//! including the settings snapshot taken at send time and the custom content
//! (attachments, stages, tool invocations) a backend may attach.

use crate::model_ref::ModelRef;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
}

/// Settings snapshot captured when a request was sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSettings {
    pub prompt: String,
    pub temperature: f64,
    #[serde(default)]
    pub selected_addons: Vec<String>,
}

/// A file or link attached to a message or to a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    /// MIME type of the attachment (e.g. `image/png`).
    #[serde(rename = "type")]
    pub mime_type: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Inline content, used for text attachments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
}

impl Attachment {
    /// Creates an attachment pointing at an uploaded file.
    pub fn file(mime_type: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            index: None,
            mime_type: mime_type.into(),
            title: title.into(),
            url: Some(url.into()),
            data: None,
            reference_url: None,
        }
    }

    /// Creates an inline text attachment.
    pub fn inline(title: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            index: None,
            mime_type: "text/markdown".to_string(),
            title: title.into(),
            url: None,
            data: Some(data.into()),
            reference_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StageStatus {
    Completed,
    Failed,
}

/// An intermediate processing step reported by an application backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub index: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    /// `None` while the stage is still running.
    pub status: Option<StageStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub index: u32,
    pub request: String,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageState {
    #[serde(default)]
    pub invocations: Vec<Invocation>,
}

/// Backend-specific payload attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<Stage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<MessageState>,
}

/// A single message in a conversation history.
///
/// `content` may be empty when the message only carries attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<MessageSettings>,
    #[serde(
        rename = "custom_content",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_content: Option<CustomContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            model: None,
            settings: None,
            custom_content: None,
            error_message: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn with_model(mut self, model: impl Into<ModelRef>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_settings(mut self, settings: MessageSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_custom_content(mut self, custom_content: CustomContent) -> Self {
        self.custom_content = Some(custom_content);
        self
    }

    pub fn with_error(mut self, error_message: impl Into<String>) -> Self {
        self.error_message = Some(error_message.into());
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Attachments carried directly by the message and by its stages, in
    /// display order.
    pub fn attachments(&self) -> Vec<&Attachment> {
        let Some(custom) = &self.custom_content else {
            return Vec::new();
        };
        let direct = custom.attachments.iter().flatten();
        let staged = custom
            .stages
            .iter()
            .flatten()
            .flat_map(|stage| stage.attachments.iter().flatten());
        direct.chain(staged).collect()
    }
}
