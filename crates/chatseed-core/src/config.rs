use crate::model_ref::{ModelRef, model_ids};
use crate::naming::{DEFAULT_CONVERSATION_NAME, DEFAULT_FOLDER_NAME, DEFAULT_PROMPT_NAME};
use serde::{Deserialize, Serialize};

/// Defaults applied by builders when the caller does not override a field.
///
/// Every field falls back to its default individually, so a config file only
/// needs to list what it changes.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SeedConfig {
    pub default_model: String,
    pub default_temperature: f64,
    pub default_system_prompt: String,
    pub default_conversation_name: String,
    pub default_folder_name: String,
    pub default_prompt_name: String,
    pub default_request: String,
    pub default_response: String,
    /// Length of generated random names.
    pub random_name_length: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            default_model: model_ids::GPT_3_5_TURBO.to_string(),
            default_temperature: 1.0,
            default_system_prompt: String::new(),
            default_conversation_name: DEFAULT_CONVERSATION_NAME.to_string(),
            default_folder_name: DEFAULT_FOLDER_NAME.to_string(),
            default_prompt_name: DEFAULT_PROMPT_NAME.to_string(),
            default_request: "test request".to_string(),
            default_response: "test response".to_string(),
            random_name_length: 10,
        }
    }
}

impl SeedConfig {
    pub fn default_model_ref(&self) -> ModelRef {
        ModelRef::new(self.default_model.as_str())
    }
}
