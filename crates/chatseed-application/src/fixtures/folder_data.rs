use crate::builder::FolderBuilder;
use crate::generator::random_string;
use chatseed_core::config::SeedConfig;
use chatseed_core::error::{ChatseedError, Result};
use chatseed_core::folder::{Folder, FolderType};
use std::collections::BTreeMap;

/// Names for specific levels of a nested folder chain. Levels without an
/// entry get a generated name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelNames(BTreeMap<usize, String>);

impl LevelNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, level: usize, name: impl Into<String>) -> Self {
        self.0.insert(level, name.into());
        self
    }

    pub fn get(&self, level: usize) -> Option<&str> {
        self.0.get(&level).map(String::as_str)
    }

    pub fn max_level(&self) -> Option<usize> {
        self.0.keys().next_back().copied()
    }
}

impl<S: Into<String>> FromIterator<(usize, S)> for LevelNames {
    fn from_iter<I: IntoIterator<Item = (usize, S)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(level, name)| (level, name.into())).collect())
    }
}

/// Prepares folders of one type.
#[derive(Debug, Clone)]
pub struct FolderData {
    folder_type: FolderType,
    config: SeedConfig,
    staged: FolderBuilder,
}

impl FolderData {
    pub fn new(folder_type: FolderType, config: SeedConfig) -> Self {
        let staged = FolderBuilder::new(folder_type, config.default_folder_name.clone());
        Self {
            folder_type,
            config,
            staged,
        }
    }

    pub fn folder_type(&self) -> FolderType {
        self.folder_type
    }

    fn fresh_builder(&self) -> FolderBuilder {
        FolderBuilder::new(self.folder_type, self.config.default_folder_name.clone())
    }

    fn random_name(&self) -> String {
        random_string(self.config.random_name_length)
    }

    /// Drops any staged folder customization.
    pub fn reset_data(&mut self) {
        self.staged = self.fresh_builder();
    }

    /// Applies `f` to the staged folder builder.
    pub fn stage(&mut self, f: impl FnOnce(FolderBuilder) -> FolderBuilder) -> &mut Self {
        let fresh = self.fresh_builder();
        let builder = std::mem::replace(&mut self.staged, fresh);
        self.staged = f(builder);
        self
    }

    /// Builds the staged folder and resets the stage.
    pub fn build_staged(&mut self) -> Folder {
        let fresh = self.fresh_builder();
        std::mem::replace(&mut self.staged, fresh).build()
    }

    /// A root-level folder named `name`, or a random name.
    pub fn prepare_folder(&self, name: Option<&str>) -> Folder {
        let name = name.map_or_else(|| self.random_name(), str::to_string);
        self.fresh_builder().with_name(name).build()
    }

    /// A folder placed directly inside `parent`.
    pub fn prepare_folder_in(&self, parent: &Folder, name: Option<&str>) -> Folder {
        let mut folder = self.prepare_folder(name);
        folder.folder_id = Some(parent.id.clone());
        folder
    }

    /// Builds a straight chain of `nested_level + 1` folders. Index 0 is the
    /// root-most folder and each following folder is the child of the one
    /// before it.
    pub fn prepare_nested_folder(&self, nested_level: usize, names: &LevelNames) -> Result<Vec<Folder>> {
        if let Some(level) = names.max_level().filter(|level| *level > nested_level) {
            return Err(ChatseedError::invalid_input(format!(
                "name given for level {level} but the chain only has {} levels",
                nested_level + 1
            )));
        }

        let mut chain: Vec<Folder> = Vec::with_capacity(nested_level + 1);
        for level in 0..=nested_level {
            let folder = match chain.last() {
                Some(parent) => self.prepare_folder_in(parent, names.get(level)),
                None => self.prepare_folder(names.get(level)),
            };
            chain.push(folder);
        }

        tracing::debug!(
            folder_type = %self.folder_type,
            levels = chain.len(),
            "Prepared nested folder chain"
        );
        Ok(chain)
    }
}
