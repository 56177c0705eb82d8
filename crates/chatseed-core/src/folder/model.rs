use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which entity kind a folder holds. Chat and prompt folders live in separate
/// trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FolderType {
    Chat,
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    /// Parent folder, `None` for root-level folders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(rename = "type")]
    pub folder_type: FolderType,
}

impl Folder {
    pub fn is_root(&self) -> bool {
        self.folder_id.is_none()
    }
}
