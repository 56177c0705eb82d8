//! Model references.
//!
//! Conversations and messages only store the id of the model they talk to.
//! Callers may hand in either a bare id or a full descriptor; both collapse to
//! the same stored `{ "id": ... }` shape.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Well-known model ids used by default fixtures.
pub mod model_ids {
    pub const GPT_3_5_TURBO: &str = "gpt-35-turbo";
    pub const GPT_4: &str = "gpt-4";
    pub const GEMINI_PRO: &str = "gemini-pro";
}

/// Stored reference to a model: only the id survives persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelRef {
    pub id: String,
}

impl ModelRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// What kind of entity a model descriptor describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModelKind {
    #[default]
    Model,
    Application,
    Assistant,
}

/// Full model descriptor as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: ModelKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind: ModelKind::Model,
            icon_url: None,
            features: Vec::new(),
        }
    }
}

impl From<&str> for ModelRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ModelRef {
    fn from(id: String) -> Self {
        Self { id }
    }
}

impl From<&String> for ModelRef {
    fn from(id: &String) -> Self {
        Self::new(id.as_str())
    }
}

impl From<ModelDescriptor> for ModelRef {
    fn from(descriptor: ModelDescriptor) -> Self {
        Self { id: descriptor.id }
    }
}

impl From<&ModelDescriptor> for ModelRef {
    fn from(descriptor: &ModelDescriptor) -> Self {
        Self::new(descriptor.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_and_descriptor_normalize_to_same_shape() {
        let mut descriptor = ModelDescriptor::new(model_ids::GPT_4);
        descriptor.name = Some("GPT-4".to_string());
        descriptor.kind = ModelKind::Application;
        descriptor.features = vec!["attachments".to_string()];

        let from_id: ModelRef = model_ids::GPT_4.into();
        let from_descriptor: ModelRef = descriptor.into();

        assert_eq!(from_id, from_descriptor);
        assert_eq!(
            serde_json::to_value(&from_descriptor).unwrap(),
            serde_json::json!({ "id": "gpt-4" })
        );
    }

    #[test]
    fn test_model_kind_parses_lowercase() {
        assert_eq!("assistant".parse::<ModelKind>().unwrap(), ModelKind::Assistant);
        assert_eq!(ModelKind::Application.to_string(), "application");
    }
}
