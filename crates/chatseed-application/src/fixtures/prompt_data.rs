use super::folder_data::{FolderData, LevelNames};
use crate::builder::PromptBuilder;
use crate::generator::random_string;
use chatseed_core::config::SeedConfig;
use chatseed_core::error::Result;
use chatseed_core::folder::{Folder, FolderType};
use chatseed_core::prompt::{Prompt, PromptParameter};

#[derive(Debug, Clone, PartialEq)]
pub struct FolderPrompts {
    pub folder: Folder,
    pub prompts: Vec<Prompt>,
}

/// Prepares prompts (and their prompt folders) for test scenarios.
#[derive(Debug, Clone)]
pub struct PromptData {
    config: SeedConfig,
    staged: PromptBuilder,
    folder_data: FolderData,
}

impl PromptData {
    pub fn new(config: SeedConfig) -> Self {
        Self {
            staged: PromptBuilder::new(&config),
            folder_data: FolderData::new(FolderType::Prompt, config.clone()),
            config,
        }
    }

    fn builder(&self) -> PromptBuilder {
        PromptBuilder::new(&self.config)
    }

    fn name_or_random(&self, name: Option<&str>) -> String {
        name.map_or_else(|| random_string(self.config.random_name_length), str::to_string)
    }

    pub fn reset_data(&mut self) {
        self.staged = self.builder();
        self.folder_data.reset_data();
    }

    pub fn stage(&mut self, f: impl FnOnce(PromptBuilder) -> PromptBuilder) -> &mut Self {
        let fresh = self.builder();
        let builder = std::mem::replace(&mut self.staged, fresh);
        self.staged = f(builder);
        self
    }

    pub fn build_staged(&mut self) -> Prompt {
        let fresh = self.builder();
        std::mem::replace(&mut self.staged, fresh).build()
    }

    /// A prompt with random content and a random name unless `name` is given.
    pub fn prepare_default_prompt(&self, name: Option<&str>) -> Prompt {
        self.builder()
            .with_name(self.name_or_random(name))
            .with_description("test prompt")
            .with_content(random_string(self.config.random_name_length))
            .build()
    }

    pub fn prepare_prompt(&self, content: &str, description: Option<&str>, name: Option<&str>) -> Prompt {
        let mut builder = self
            .builder()
            .with_name(self.name_or_random(name))
            .with_content(content);
        if let Some(description) = description {
            builder = builder.with_description(description);
        }
        builder.build()
    }

    /// Content made of one placeholder per parameter, space separated.
    pub fn prepare_prompt_with_params(&self, params: &[PromptParameter], name: Option<&str>) -> Prompt {
        let content = params
            .iter()
            .map(PromptParameter::placeholder)
            .collect::<Vec<_>>()
            .join(" ");
        self.prepare_prompt(&content, None, name)
    }

    pub fn prepare_prompts_in_folder(&self, count: usize) -> FolderPrompts {
        let folder = self.folder_data.prepare_folder(None);
        let prompts = (0..count)
            .map(|_| {
                let mut prompt = self.prepare_default_prompt(None);
                prompt.folder_id = Some(folder.id.clone());
                prompt
            })
            .collect();
        FolderPrompts { folder, prompts }
    }

    pub fn prepare_nested_prompt_folders(&self, nested_level: usize, names: &LevelNames) -> Result<Vec<Folder>> {
        self.folder_data.prepare_nested_folder(nested_level, names)
    }

    pub fn prepare_prompts_for_nested_folders(&self, folders: &[Folder]) -> Vec<Prompt> {
        folders
            .iter()
            .map(|folder| {
                let mut prompt = self.prepare_default_prompt(None);
                prompt.folder_id = Some(folder.id.clone());
                prompt
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatseed_core::prompt::template;
    use std::collections::HashMap;

    fn data() -> PromptData {
        PromptData::new(SeedConfig::default())
    }

    #[test]
    fn test_prompt_with_params_renders() {
        let params = vec![
            PromptParameter {
                name: "lang".to_string(),
                default_value: Some("English".to_string()),
            },
            PromptParameter {
                name: "text".to_string(),
                default_value: None,
            },
        ];
        let prompt = data().prepare_prompt_with_params(&params, Some("Translate"));
        assert_eq!(prompt.content, "{{lang|English}} {{text}}");
        assert_eq!(prompt.parameters(), params);

        let values = HashMap::from([("text".to_string(), "bonjour".to_string())]);
        assert_eq!(template::render(&prompt.content, &values), "English bonjour");
    }

    #[test]
    fn test_prompts_in_folder_use_prompt_folder() {
        let prepared = data().prepare_prompts_in_folder(2);
        assert_eq!(prepared.folder.folder_type, FolderType::Prompt);
        assert!(
            prepared
                .prompts
                .iter()
                .all(|p| p.folder_id.as_deref() == Some(prepared.folder.id.as_str()))
        );
    }

    #[test]
    fn test_nested_prompt_folders() {
        let data = data();
        let names = LevelNames::new().with(1, "Middle");
        let folders = data.prepare_nested_prompt_folders(2, &names).unwrap();
        assert_eq!(folders[1].name, "Middle");
        let prompts = data.prepare_prompts_for_nested_folders(&folders);
        assert_eq!(prompts.len(), 3);
        assert_eq!(prompts[2].folder_id.as_deref(), Some(folders[2].id.as_str()));
    }

    #[test]
    fn test_reset_data() {
        let mut data = data();
        data.stage(|b| b.with_name("Old").with_content("stale").with_folder_id("f"));
        data.reset_data();
        let prompt = data.build_staged();
        assert_eq!(prompt.name, "Prompt");
        assert!(prompt.content.is_empty());
        assert!(prompt.folder_id.is_none());
    }
}
