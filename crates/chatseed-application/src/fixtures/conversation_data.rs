use super::folder_data::{FolderData, LevelNames};
use crate::builder::ConversationBuilder;
use crate::generator::random_string;
use chatseed_core::config::SeedConfig;
use chatseed_core::conversation::{
    Attachment, Conversation, CustomContent, Invocation, Message, MessageSettings, MessageState,
    Stage, StageStatus,
};
use chatseed_core::error::Result;
use chatseed_core::folder::{Folder, FolderType};
use chatseed_core::model_ref::ModelRef;

pub const ERROR_RESPONSE_MESSAGE: &str = "Error happened during answering";

/// A folder together with the conversations prepared inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderConversation {
    pub folder: Folder,
    pub conversations: Vec<Conversation>,
}

/// Prepares conversations (and their chat folders) for test scenarios.
///
/// Every `prepare_*` call starts from a fresh builder, so prepared
/// conversations never share fields. The staged builder (`stage` /
/// `build_staged`) is the only state kept between calls and is dropped by
/// `reset_data`.
#[derive(Debug, Clone)]
pub struct ConversationData {
    config: SeedConfig,
    staged: ConversationBuilder,
    folder_data: FolderData,
}

impl ConversationData {
    pub fn new(config: SeedConfig) -> Self {
        Self {
            staged: ConversationBuilder::new(&config),
            folder_data: FolderData::new(FolderType::Chat, config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    pub fn folder_data(&self) -> &FolderData {
        &self.folder_data
    }

    fn builder(&self) -> ConversationBuilder {
        ConversationBuilder::new(&self.config)
    }

    fn model_or_default(&self, model: Option<ModelRef>) -> ModelRef {
        model.unwrap_or_else(|| self.config.default_model_ref())
    }

    fn name_or_random(&self, name: Option<&str>) -> String {
        name.map_or_else(|| random_string(self.config.random_name_length), str::to_string)
    }

    fn request(&self, model: &ModelRef) -> Message {
        Message::user(self.config.default_request.as_str()).with_model(model.clone())
    }

    fn response(&self, model: &ModelRef) -> Message {
        Message::assistant(self.config.default_response.as_str()).with_model(model.clone())
    }

    /// Starts over: the staged conversation and the staged folder lose every
    /// customization.
    pub fn reset_data(&mut self) {
        self.staged = self.builder();
        self.folder_data.reset_data();
    }

    /// Applies `f` to the staged conversation builder.
    pub fn stage(&mut self, f: impl FnOnce(ConversationBuilder) -> ConversationBuilder) -> &mut Self {
        let fresh = self.builder();
        let builder = std::mem::replace(&mut self.staged, fresh);
        self.staged = f(builder);
        self
    }

    /// Builds the staged conversation and resets the stage.
    pub fn build_staged(&mut self) -> Conversation {
        let fresh = self.builder();
        std::mem::replace(&mut self.staged, fresh).build()
    }

    // ------------------------------------------------------------------
    // Single conversations
    // ------------------------------------------------------------------

    /// One request/response pair with the model recorded on both messages.
    pub fn prepare_default_conversation(&self, model: Option<ModelRef>, name: Option<&str>) -> Conversation {
        let model = self.model_or_default(model);
        self.builder()
            .with_name(self.name_or_random(name))
            .with_message(self.request(&model))
            .with_message(self.response(&model))
            .with_model(model)
            .build()
    }

    pub fn prepare_empty_conversation(&self, model: Option<ModelRef>, name: Option<&str>) -> Conversation {
        self.builder()
            .with_name(self.name_or_random(name))
            .with_model(self.model_or_default(model))
            .build()
    }

    /// A conversation whose settings differ from the defaults; every message
    /// carries the settings snapshot.
    pub fn prepare_model_conversation(
        &self,
        temperature: f64,
        system_prompt: &str,
        addons: &[&str],
        model: Option<ModelRef>,
    ) -> Conversation {
        let model = self.model_or_default(model);
        let settings = MessageSettings {
            prompt: system_prompt.to_string(),
            temperature,
            selected_addons: addons.iter().map(|a| a.to_string()).collect(),
        };
        self.builder()
            .with_name(self.name_or_random(None))
            .with_message(self.request(&model).with_settings(settings.clone()))
            .with_message(self.response(&model).with_settings(settings))
            .with_model(model)
            .with_temperature(temperature)
            .with_prompt(system_prompt)
            .with_addons(addons.iter().copied())
            .build()
    }

    /// One request/response pair per entry of `requests`, in order.
    pub fn prepare_model_conversation_based_on_requests(
        &self,
        model: Option<ModelRef>,
        requests: &[&str],
        name: Option<&str>,
    ) -> Conversation {
        let model = self.model_or_default(model);
        let messages = requests.iter().flat_map(|request| {
            [
                Message::user(*request).with_model(model.clone()),
                Message::assistant(format!("{} to {}", self.config.default_response, request))
                    .with_model(model.clone()),
            ]
        });
        self.builder()
            .with_name(self.name_or_random(name))
            .with_messages(messages)
            .with_model(model.clone())
            .build()
    }

    pub fn prepare_addons_conversation(&self, model: Option<ModelRef>, addons: &[&str]) -> Conversation {
        let mut conversation = self.prepare_model_conversation(
            self.config.default_temperature,
            &self.config.default_system_prompt,
            addons,
            model,
        );
        let invocations = addons
            .iter()
            .enumerate()
            .map(|(index, addon)| Invocation {
                index: index as u32,
                request: format!("{addon} request"),
                response: format!("{addon} response"),
            })
            .collect();
        if let Some(response) = conversation.messages.last_mut() {
            response.custom_content = Some(CustomContent {
                state: Some(MessageState { invocations }),
                ..Default::default()
            });
        }
        conversation
    }

    /// The response failed: empty assistant content plus an error message.
    pub fn prepare_error_response_conversation(&self, model: Option<ModelRef>, name: Option<&str>) -> Conversation {
        let model = self.model_or_default(model);
        self.builder()
            .with_name(self.name_or_random(name))
            .with_message(self.request(&model))
            .with_message(
                Message::assistant("")
                    .with_model(model.clone())
                    .with_error(ERROR_RESPONSE_MESSAGE),
            )
            .with_model(model)
            .build()
    }

    /// Attachments sent with the request. Without request text the user
    /// message content is empty.
    pub fn prepare_conversation_with_attachments_in_request(
        &self,
        model: Option<ModelRef>,
        attachments: Vec<Attachment>,
        has_request_text: bool,
    ) -> Conversation {
        let model = self.model_or_default(model);
        let content = if has_request_text {
            self.config.default_request.clone()
        } else {
            String::new()
        };
        let request = Message::user(content)
            .with_model(model.clone())
            .with_custom_content(CustomContent {
                attachments: Some(indexed(attachments)),
                ..Default::default()
            });
        self.builder()
            .with_name(self.name_or_random(None))
            .with_message(request)
            .with_message(self.response(&model))
            .with_model(model)
            .build()
    }

    pub fn prepare_conversation_with_attachments_in_response(
        &self,
        model: Option<ModelRef>,
        attachments: Vec<Attachment>,
    ) -> Conversation {
        let model = self.model_or_default(model);
        let response = self.response(&model).with_custom_content(CustomContent {
            attachments: Some(indexed(attachments)),
            ..Default::default()
        });
        self.builder()
            .with_name(self.name_or_random(None))
            .with_message(self.request(&model))
            .with_message(response)
            .with_model(model)
            .build()
    }

    /// A response made of `stages_count` completed stages.
    pub fn prepare_conversation_with_stages(&self, model: Option<ModelRef>, stages_count: usize) -> Conversation {
        let model = self.model_or_default(model);
        let stages = (0..stages_count)
            .map(|i| Stage {
                index: i as u32,
                name: format!("Stage {}", i + 1),
                content: Some(format!("Stage content {}", i + 1)),
                attachments: None,
                status: Some(StageStatus::Completed),
            })
            .collect();
        let response = self.response(&model).with_custom_content(CustomContent {
            stages: Some(stages),
            ..Default::default()
        });
        self.builder()
            .with_name(self.name_or_random(None))
            .with_message(self.request(&model))
            .with_message(response)
            .with_model(model)
            .build()
    }

    pub fn prepare_conversation_with_invocations(
        &self,
        model: Option<ModelRef>,
        invocations_count: usize,
    ) -> Conversation {
        let model = self.model_or_default(model);
        let invocations = (0..invocations_count)
            .map(|i| Invocation {
                index: i as u32,
                request: format!("request {}", i + 1),
                response: format!("response {}", i + 1),
            })
            .collect();
        let response = self.response(&model).with_custom_content(CustomContent {
            state: Some(MessageState { invocations }),
            ..Default::default()
        });
        self.builder()
            .with_name(self.name_or_random(None))
            .with_message(self.request(&model))
            .with_message(response)
            .with_model(model)
            .build()
    }

    // ------------------------------------------------------------------
    // Conversations in folders
    // ------------------------------------------------------------------

    pub fn prepare_default_conversation_in_folder(&self, name: Option<&str>) -> FolderConversation {
        self.prepare_conversations_in_folder_named(1, name)
    }

    pub fn prepare_conversations_in_folder(&self, count: usize) -> FolderConversation {
        self.prepare_conversations_in_folder_named(count, None)
    }

    fn prepare_conversations_in_folder_named(&self, count: usize, name: Option<&str>) -> FolderConversation {
        let folder = self.folder_data.prepare_folder(None);
        let conversations = (0..count)
            .map(|_| {
                let mut conversation = self.prepare_default_conversation(None, name);
                conversation.folder_id = Some(folder.id.clone());
                conversation
            })
            .collect();
        FolderConversation { folder, conversations }
    }

    pub fn prepare_nested_folder(&self, nested_level: usize, names: &LevelNames) -> Result<Vec<Folder>> {
        self.folder_data.prepare_nested_folder(nested_level, names)
    }

    /// One default conversation inside each of `folders`, in folder order.
    pub fn prepare_conversations_for_nested_folders(&self, folders: &[Folder]) -> Vec<Conversation> {
        folders
            .iter()
            .map(|folder| {
                let mut conversation = self.prepare_default_conversation(None, None);
                conversation.folder_id = Some(folder.id.clone());
                conversation
            })
            .collect()
    }
}

fn indexed(attachments: Vec<Attachment>) -> Vec<Attachment> {
    attachments
        .into_iter()
        .enumerate()
        .map(|(i, mut attachment)| {
            attachment.index.get_or_insert(i as u32);
            attachment
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatseed_core::conversation::Role;
    use chatseed_core::model_ref::ModelDescriptor;

    fn data() -> ConversationData {
        ConversationData::new(SeedConfig::default())
    }

    #[test]
    fn test_default_conversation_shape() {
        let conversation = data().prepare_default_conversation(None, Some("Hello"));
        assert_eq!(conversation.name, "Hello");
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[0].role, Role::User);
        assert_eq!(conversation.messages[0].content, "test request");
        assert_eq!(conversation.messages[1].role, Role::Assistant);
        assert_eq!(conversation.messages[1].model, Some(ModelRef::new("gpt-35-turbo")));
    }

    #[test]
    fn test_random_name_when_absent() {
        let data = data();
        let a = data.prepare_default_conversation(None, None);
        let b = data.prepare_default_conversation(None, None);
        assert_eq!(a.name.len(), 10);
        assert_ne!(a.name, b.name);
    }

    #[test]
    fn test_descriptor_and_id_store_same_model() {
        let data = data();
        let by_id = data.prepare_default_conversation(Some("gpt-4".into()), None);
        let by_descriptor = data.prepare_default_conversation(Some(ModelDescriptor::new("gpt-4").into()), None);
        assert_eq!(by_id.model, by_descriptor.model);
        assert_eq!(by_id.messages[0].model, by_descriptor.messages[0].model);
    }

    #[test]
    fn test_model_conversation_settings_snapshot() {
        let conversation = data().prepare_model_conversation(0.3, "be brief", &["web-search"], None);
        assert_eq!(conversation.temperature, 0.3);
        assert_eq!(conversation.prompt, "be brief");
        assert_eq!(conversation.selected_addons, vec!["web-search".to_string()]);
        for message in &conversation.messages {
            let settings = message.settings.as_ref().unwrap();
            assert_eq!(settings.temperature, 0.3);
            assert_eq!(settings.selected_addons, vec!["web-search".to_string()]);
        }
    }

    #[test]
    fn test_requests_become_pairs() {
        let conversation =
            data().prepare_model_conversation_based_on_requests(None, &["1+1", "2+2"], None);
        let contents: Vec<_> = conversation.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(
            contents,
            vec!["1+1", "test response to 1+1", "2+2", "test response to 2+2"]
        );
    }

    #[test]
    fn test_error_response() {
        let conversation = data().prepare_error_response_conversation(None, None);
        let response = conversation.messages.last().unwrap();
        assert!(response.content.is_empty());
        assert_eq!(response.error_message.as_deref(), Some(ERROR_RESPONSE_MESSAGE));
    }

    #[test]
    fn test_attachments_only_request_has_empty_content() {
        let attachments = vec![
            Attachment::file("image/png", "a.png", "files/a.png"),
            Attachment::file("image/png", "b.png", "files/b.png"),
        ];
        let conversation = data().prepare_conversation_with_attachments_in_request(None, attachments, false);
        let request = &conversation.messages[0];
        assert!(request.content.is_empty());
        let indexes: Vec<_> = request.attachments().iter().map(|a| a.index).collect();
        assert_eq!(indexes, vec![Some(0), Some(1)]);
        assert_eq!(conversation.attachments().len(), 1);
    }

    #[test]
    fn test_stages_in_response() {
        let conversation = data().prepare_conversation_with_stages(None, 3);
        let stages = conversation.messages[1]
            .custom_content
            .as_ref()
            .and_then(|c| c.stages.as_ref())
            .unwrap();
        assert_eq!(stages.len(), 3);
        assert_eq!(stages[2].name, "Stage 3");
        assert!(stages.iter().all(|s| s.status == Some(StageStatus::Completed)));
    }

    #[test]
    fn test_addons_conversation_records_invocations() {
        let conversation = data().prepare_addons_conversation(None, &["a", "b"]);
        let state = conversation.messages[1]
            .custom_content
            .as_ref()
            .and_then(|c| c.state.as_ref())
            .unwrap();
        assert_eq!(state.invocations.len(), 2);
        assert_eq!(conversation.selected_addons.len(), 2);
    }

    #[test]
    fn test_conversations_in_folder() {
        let prepared = data().prepare_conversations_in_folder(3);
        assert_eq!(prepared.conversations.len(), 3);
        assert!(
            prepared
                .conversations
                .iter()
                .all(|c| c.folder_id.as_deref() == Some(prepared.folder.id.as_str()))
        );
        assert_eq!(prepared.folder.folder_type, FolderType::Chat);
    }

    #[test]
    fn test_conversations_for_nested_folders() {
        let data = data();
        let folders = data.prepare_nested_folder(2, &LevelNames::new()).unwrap();
        let conversations = data.prepare_conversations_for_nested_folders(&folders);
        assert_eq!(conversations.len(), 3);
        for (folder, conversation) in folders.iter().zip(&conversations) {
            assert_eq!(conversation.folder_id.as_deref(), Some(folder.id.as_str()));
        }
    }

    #[test]
    fn test_reset_data_prevents_leakage() {
        let mut data = data();
        data.stage(|b| {
            b.with_name("Leaky")
                .with_temperature(0.1)
                .with_prompt("secret")
                .with_folder_id("f1")
                .with_addons(["addon"])
                .with_message(Message::user("old"))
        });
        data.reset_data();
        let fresh = data.build_staged();

        assert_eq!(fresh.name, "New conversation");
        assert_eq!(fresh.temperature, 1.0);
        assert!(fresh.prompt.is_empty());
        assert!(fresh.folder_id.is_none());
        assert!(fresh.selected_addons.is_empty());
        assert!(fresh.messages.is_empty());
    }
}
