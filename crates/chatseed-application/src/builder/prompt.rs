use crate::generator::new_id;
use chatseed_core::config::SeedConfig;
use chatseed_core::prompt::Prompt;

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    prompt: Prompt,
}

impl PromptBuilder {
    pub fn new(config: &SeedConfig) -> Self {
        Self {
            prompt: Prompt {
                id: new_id(),
                name: config.default_prompt_name.clone(),
                description: None,
                content: String::new(),
                folder_id: None,
            },
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.prompt.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.prompt.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.prompt.description = Some(description.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.prompt.content = content.into();
        self
    }

    pub fn with_folder_id(mut self, folder_id: impl Into<String>) -> Self {
        self.prompt.folder_id = Some(folder_id.into());
        self
    }

    pub fn build(self) -> Prompt {
        self.prompt
    }
}
