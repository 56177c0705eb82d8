//! Domain view of an import/export bundle.

use crate::conversation::Conversation;
use crate::folder::{Folder, FolderType};
use crate::prompt::Prompt;

/// Everything an export file carries, independent of its on-disk version.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportData {
    pub history: Vec<Conversation>,
    pub folders: Vec<Folder>,
    pub prompts: Vec<Prompt>,
}

impl ExportData {
    pub fn folders_of_type(&self, folder_type: FolderType) -> impl Iterator<Item = &Folder> {
        self.folders.iter().filter(move |f| f.folder_type == folder_type)
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty() && self.folders.is_empty() && self.prompts.is_empty()
    }
}
