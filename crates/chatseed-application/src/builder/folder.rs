use crate::generator::new_id;
use chatseed_core::folder::{Folder, FolderType};

#[derive(Debug, Clone)]
pub struct FolderBuilder {
    folder: Folder,
}

impl FolderBuilder {
    pub fn new(folder_type: FolderType, name: impl Into<String>) -> Self {
        Self {
            folder: Folder {
                id: new_id(),
                name: name.into(),
                folder_id: None,
                folder_type,
            },
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.folder.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.folder.name = name.into();
        self
    }

    pub fn with_type(mut self, folder_type: FolderType) -> Self {
        self.folder.folder_type = folder_type;
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.folder.folder_id = Some(parent_id.into());
        self
    }

    pub fn build(self) -> Folder {
        self.folder
    }
}
