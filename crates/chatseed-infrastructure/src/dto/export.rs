//! Export file DTOs and migrations.
//!
//! ### Export Version History
//! - **1**: Bare JSON array of conversations, no envelope
//! - **2-4**: `{ version, history, folders }`, folders may lack `type`
//! - **5**: `{ version, history, folders, prompts }`

use chatseed_core::conversation::{Conversation, Replay};
use chatseed_core::error::{ChatseedError, Result};
use chatseed_core::export::ExportData;
use chatseed_core::folder::{Folder, FolderType};
use chatseed_core::prompt::Prompt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use crate::storage::AtomicJsonFile;

pub const CURRENT_EXPORT_VERSION: u64 = 5;

/// Folder as written by versions 2-4. Folders without a type were chat
/// folders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFolderDTO {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(rename = "type", default)]
    pub folder_type: Option<FolderType>,
}

/// Versions 2 through 4.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportV4 {
    pub version: u64,
    #[serde(default)]
    pub history: Vec<Conversation>,
    #[serde(default)]
    pub folders: Vec<LegacyFolderDTO>,
}

/// Current export format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportV5 {
    pub version: u64,
    #[serde(default)]
    pub history: Vec<Conversation>,
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

// ============================================================================
// Migration implementations
// ============================================================================

/// Conversations written before replay existed get an inactive replay block.
fn upgrade_conversation(mut conversation: Conversation) -> Conversation {
    if conversation.replay.is_none() {
        conversation.replay = Some(Replay::inactive());
    }
    conversation
}

impl From<LegacyFolderDTO> for Folder {
    fn from(dto: LegacyFolderDTO) -> Self {
        Folder {
            id: dto.id,
            name: dto.name,
            folder_id: dto.folder_id,
            folder_type: dto.folder_type.unwrap_or(FolderType::Chat),
        }
    }
}

/// Version 1 has no folders, so folder references are dropped.
fn migrate_v1(history: Vec<Conversation>) -> ExportV5 {
    ExportV5 {
        version: CURRENT_EXPORT_VERSION,
        history: history
            .into_iter()
            .map(|mut c| {
                c.folder_id = None;
                upgrade_conversation(c)
            })
            .collect(),
        folders: Vec::new(),
        prompts: Vec::new(),
    }
}

impl From<ExportV4> for ExportV5 {
    fn from(v4: ExportV4) -> Self {
        ExportV5 {
            version: CURRENT_EXPORT_VERSION,
            history: v4.history.into_iter().map(upgrade_conversation).collect(),
            folders: v4.folders.into_iter().map(Folder::from).collect(),
            prompts: Vec::new(),
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl From<ExportV5> for ExportData {
    fn from(dto: ExportV5) -> Self {
        ExportData {
            history: dto.history,
            folders: dto.folders,
            prompts: dto.prompts,
        }
    }
}

impl From<ExportData> for ExportV5 {
    fn from(data: ExportData) -> Self {
        ExportV5 {
            version: CURRENT_EXPORT_VERSION,
            history: data.history,
            folders: data.folders,
            prompts: data.prompts,
        }
    }
}

/// Reads an already parsed export document of any supported version.
pub fn import_value(value: Value) -> Result<ExportData> {
    if value.is_null() {
        return Ok(ExportData::default());
    }

    let latest = if value.is_array() {
        let history: Vec<Conversation> = serde_json::from_value(value)?;
        tracing::info!(conversations = history.len(), "Migrating version 1 export");
        migrate_v1(history)
    } else if value.is_object() {
        let version = value
            .get("version")
            .and_then(Value::as_u64)
            .ok_or_else(|| ChatseedError::invalid_input("export has no numeric version"))?;
        match version {
            CURRENT_EXPORT_VERSION => serde_json::from_value::<ExportV5>(value)?,
            2..=4 => {
                tracing::info!(version, "Migrating legacy export");
                serde_json::from_value::<ExportV4>(value)?.into()
            }
            other => {
                return Err(ChatseedError::invalid_input(format!(
                    "unsupported export version {other}"
                )));
            }
        }
    } else {
        return Err(ChatseedError::invalid_input("export must be an array or an object"));
    };
    Ok(latest.into())
}

pub fn import_str(content: &str) -> Result<ExportData> {
    import_value(serde_json::from_str(content)?)
}

/// Serializes `data` in the current export format.
pub fn export_string(data: &ExportData) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ExportV5::from(data.clone()))?)
}

/// An export file on disk. Loading accepts every supported version, saving
/// always writes the current one.
#[derive(Debug, Clone)]
pub struct ExportFile {
    file: AtomicJsonFile<Value>,
}

impl ExportFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicJsonFile::new(path.into()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// Loads the file. A missing or empty file is an empty export.
    pub fn load(&self) -> Result<ExportData> {
        import_value(self.file.load()?.unwrap_or(Value::Null))
    }

    pub fn save(&self, data: &ExportData) -> Result<()> {
        self.file.save(&serde_json::to_value(ExportV5::from(data.clone()))?)
    }

    /// Locked read-modify-write. Legacy content is migrated before `f` sees it.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ExportData) -> Result<()>,
    {
        self.file.update(Value::Null, |value| {
            let mut data = import_value(value.take())?;
            f(&mut data)?;
            *value = serde_json::to_value(ExportV5::from(data))?;
            Ok(())
        })
    }
}
