use crate::generator::{new_id, now_rfc3339};
use chatseed_core::config::SeedConfig;
use chatseed_core::conversation::{Conversation, Message, Playback, Replay};
use chatseed_core::model_ref::ModelRef;

/// Assembles a single conversation.
///
/// A fresh builder starts from the configured defaults: new id, default name
/// and model, no messages, default temperature, empty system prompt, no
/// addons and an inactive replay block.
#[derive(Debug, Clone)]
pub struct ConversationBuilder {
    conversation: Conversation,
}

impl ConversationBuilder {
    pub fn new(config: &SeedConfig) -> Self {
        Self {
            conversation: Conversation {
                id: new_id(),
                name: config.default_conversation_name.clone(),
                folder_id: None,
                model: config.default_model_ref(),
                messages: Vec::new(),
                temperature: config.default_temperature,
                prompt: config.default_system_prompt.clone(),
                selected_addons: Vec::new(),
                last_activity_date: Some(now_rfc3339()),
                replay: Some(Replay::inactive()),
                playback: None,
                is_shared: None,
            },
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.conversation.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.conversation.name = name.into();
        self
    }

    pub fn with_folder_id(mut self, folder_id: impl Into<String>) -> Self {
        self.conversation.folder_id = Some(folder_id.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<ModelRef>) -> Self {
        self.conversation.model = model.into();
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.conversation.messages.push(message);
        self
    }

    pub fn with_messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.conversation.messages.extend(messages);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.conversation.temperature = temperature;
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.conversation.prompt = prompt.into();
        self
    }

    pub fn with_addons(mut self, addons: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.conversation.selected_addons = addons.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_last_activity_date(mut self, date: impl Into<String>) -> Self {
        self.conversation.last_activity_date = Some(date.into());
        self
    }

    pub fn with_replay(mut self, replay: Replay) -> Self {
        self.conversation.replay = Some(replay);
        self
    }

    pub fn with_playback(mut self, playback: Playback) -> Self {
        self.conversation.playback = Some(playback);
        self
    }

    pub fn with_shared(mut self, shared: bool) -> Self {
        self.conversation.is_shared = Some(shared);
        self
    }

    pub fn build(self) -> Conversation {
        self.conversation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatseed_core::model_ref::ModelDescriptor;

    #[test]
    fn test_defaults() {
        let config = SeedConfig::default();
        let conversation = ConversationBuilder::new(&config).build();

        assert_eq!(conversation.name, "New conversation");
        assert_eq!(conversation.model, ModelRef::new("gpt-35-turbo"));
        assert_eq!(conversation.temperature, 1.0);
        assert!(conversation.prompt.is_empty());
        assert!(conversation.selected_addons.is_empty());
        assert!(conversation.messages.is_empty());
        assert!(!conversation.is_replay());
        assert!(conversation.last_activity_date.is_some());
        assert!(uuid::Uuid::parse_str(&conversation.id).is_ok());
    }

    #[test]
    fn test_model_forms_normalize() {
        let config = SeedConfig::default();
        let by_id = ConversationBuilder::new(&config).with_model("gpt-4").build();
        let by_descriptor = ConversationBuilder::new(&config)
            .with_model(ModelDescriptor::new("gpt-4"))
            .build();
        assert_eq!(by_id.model, by_descriptor.model);
    }

    #[test]
    fn test_replay_and_playback_state() {
        let config = SeedConfig::default();
        let stack = vec![Message::user("U1"), Message::assistant("A1")];
        let conversation = ConversationBuilder::new(&config)
            .with_replay(Replay::start(vec![stack[0].clone()], false))
            .with_playback(Playback::start_at(stack.clone(), 1).unwrap())
            .with_last_activity_date("2024-01-01T00:00:00Z")
            .build();

        assert!(conversation.is_replay());
        assert!(conversation.is_playback());
        assert_eq!(conversation.playback.as_ref().unwrap().visible_messages(), &stack[..1]);
        assert_eq!(conversation.last_activity_date.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_each_builder_gets_fresh_id() {
        let config = SeedConfig::default();
        let a = ConversationBuilder::new(&config).build();
        let b = ConversationBuilder::new(&config).build();
        assert_ne!(a.id, b.id);
    }
}
