//! Prompt parameter placeholders.
//!
//! A placeholder is written `{{name}}` or `{{name|default}}`. When a prompt is
//! applied, every placeholder is replaced by the value the user typed, or by
//! its default when the user left it blank.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([^{}|]+?)\s*(?:\|([^{}]*))?\}\}").expect("placeholder regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptParameter {
    pub name: String,
    pub default_value: Option<String>,
}

impl PromptParameter {
    /// Renders the parameter back into placeholder syntax.
    pub fn placeholder(&self) -> String {
        match &self.default_value {
            Some(default) => format!("{{{{{}|{}}}}}", self.name, default),
            None => format!("{{{{{}}}}}", self.name),
        }
    }
}

fn default_of(caps: &Captures) -> Option<String> {
    caps.get(2).map(|m| m.as_str().trim().to_string())
}

/// Placeholders in first-appearance order. A name that appears twice is
/// reported once, with the default of its first occurrence.
pub fn parameters(content: &str) -> Vec<PromptParameter> {
    let mut result: Vec<PromptParameter> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(content) {
        let name = caps[1].to_string();
        if result.iter().any(|p| p.name == name) {
            continue;
        }
        result.push(PromptParameter {
            name,
            default_value: default_of(&caps),
        });
    }
    result
}

/// Substitutes placeholders. A non-empty value wins over the default;
/// placeholders with neither are left untouched.
pub fn render(content: &str, values: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(content, |caps: &Captures| {
            let name = caps[1].trim();
            match values.get(name).filter(|v| !v.is_empty()) {
                Some(value) => value.clone(),
                None => default_of(caps).unwrap_or_else(|| caps[0].to_string()),
            }
        })
        .into_owned()
}
