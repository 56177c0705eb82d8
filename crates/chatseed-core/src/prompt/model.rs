use super::template::{self, PromptParameter};
use serde::{Deserialize, Serialize};

/// A reusable prompt. `content` may contain `{{name|default}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

impl Prompt {
    pub fn parameters(&self) -> Vec<PromptParameter> {
        template::parameters(&self.content)
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters().is_empty()
    }
}
