//! Conversation domain model.

use super::message::{Attachment, Message};
use super::playback::Playback;
use super::replay::Replay;
use crate::model_ref::ModelRef;
use serde::{Deserialize, Serialize};

/// A conversation as persisted by the chat application.
///
/// Messages are owned by the conversation; cloning a conversation clones its
/// whole message list, so derived conversations never alias their source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Unique conversation identifier (UUID format)
    pub id: String,
    /// Display name, unique within its folder (or the root)
    pub name: String,
    /// Owning folder, `None` at the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    pub model: ModelRef,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub temperature: f64,
    /// System prompt
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub selected_addons: Vec<String>,
    /// RFC 3339 timestamp of the last activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replay: Option<Replay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playback: Option<Playback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_shared: Option<bool>,
}

impl Conversation {
    pub fn user_messages(&self) -> Vec<Message> {
        self.messages.iter().filter(|m| m.is_user()).cloned().collect()
    }

    pub fn user_message_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_user()).count()
    }

    pub fn is_replay(&self) -> bool {
        self.replay.as_ref().is_some_and(|r| r.is_replay)
    }

    pub fn is_playback(&self) -> bool {
        self.playback.as_ref().is_some_and(|p| p.is_playback)
    }

    pub fn is_shared(&self) -> bool {
        self.is_shared.unwrap_or(false)
    }

    /// Attachments grouped by the index of the message carrying them.
    /// Messages without attachments are skipped.
    pub fn attachments(&self) -> Vec<(usize, Vec<&Attachment>)> {
        self.messages
            .iter()
            .enumerate()
            .map(|(index, message)| (index, message.attachments()))
            .filter(|(_, attachments)| !attachments.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::message::CustomContent;

    fn conversation() -> Conversation {
        Conversation {
            id: "c1".to_string(),
            name: "test".to_string(),
            folder_id: None,
            model: ModelRef::new("gpt-4"),
            messages: vec![
                Message::user("u1"),
                Message::assistant("a1"),
                Message::user("").with_custom_content(CustomContent {
                    attachments: Some(vec![Attachment::file("image/png", "a.png", "files/a.png")]),
                    ..Default::default()
                }),
                Message::assistant("a2"),
            ],
            temperature: 1.0,
            prompt: String::new(),
            selected_addons: Vec::new(),
            last_activity_date: None,
            replay: None,
            playback: None,
            is_shared: None,
        }
    }

    #[test]
    fn test_user_messages_keep_order() {
        let conv = conversation();
        let contents: Vec<_> = conv.user_messages().into_iter().map(|m| m.content).collect();
        assert_eq!(contents, vec!["u1".to_string(), String::new()]);
        assert_eq!(conv.user_message_count(), 2);
    }

    #[test]
    fn test_attachments_grouped_by_message() {
        let conv = conversation();
        let grouped = conv.attachments();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].0, 2);
        assert_eq!(grouped[0].1[0].title, "a.png");
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_value(conversation()).unwrap();
        assert!(json.get("folderId").is_none());
        assert!(json.get("replay").is_none());
        assert_eq!(json["model"], serde_json::json!({ "id": "gpt-4" }));
        assert_eq!(json["selectedAddons"], serde_json::json!([]));
    }
}
