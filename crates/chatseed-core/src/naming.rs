//! Display-name rules.
//!
//! Names are unique per scope: a scope is one container (the root or a
//! folder) combined with one entity kind. The same name may appear in two
//! folders, or in a folder and at the root, without any postfix.
//!
//! Two rules are reproduced here so tests can compute the names the
//! application is expected to display:
//!
//! - **Postfix disambiguation**: a name that already exists in its scope gets
//!   `" N"` appended, N being the smallest positive integer that is free.
//! - **Default numeration**: new entities are called `"<default> N"`, N being
//!   one more than the highest index among present default-named entities.
//!
//! Nothing in this module mutates an entity.

use crate::conversation::Conversation;
use crate::error::{ChatseedError, Result};
use crate::folder::{Folder, FolderType};
use crate::prompt::Prompt;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_CONVERSATION_NAME: &str = "New conversation";
pub const DEFAULT_FOLDER_NAME: &str = "New folder";
pub const DEFAULT_PROMPT_NAME: &str = "Prompt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Conversation,
    Prompt,
    Folder(FolderType),
}

/// A naming namespace: one entity kind inside one container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    pub kind: EntityKind,
    /// Containing folder id, `None` for the root.
    pub container: Option<String>,
}

impl Scope {
    pub fn root(kind: EntityKind) -> Self {
        Self {
            kind,
            container: None,
        }
    }

    pub fn folder(kind: EntityKind, folder_id: impl Into<String>) -> Self {
        Self {
            kind,
            container: Some(folder_id.into()),
        }
    }

    pub fn of_conversation(conversation: &Conversation) -> Self {
        Self {
            kind: EntityKind::Conversation,
            container: conversation.folder_id.clone(),
        }
    }

    pub fn of_prompt(prompt: &Prompt) -> Self {
        Self {
            kind: EntityKind::Prompt,
            container: prompt.folder_id.clone(),
        }
    }

    pub fn of_folder(folder: &Folder) -> Self {
        Self {
            kind: EntityKind::Folder(folder.folder_type),
            container: folder.folder_id.clone(),
        }
    }
}

/// Index of `name` in the `"<default> N"` series. The bare default name
/// counts as index 1.
pub fn default_index(default: &str, name: &str) -> Option<u64> {
    if name == default {
        return Some(1);
    }
    let suffix = name.strip_prefix(default)?.strip_prefix(' ')?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

/// The name the application shows for `base` in a scope already holding
/// `existing`.
pub fn expected_name<'a>(base: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let taken: HashSet<&str> = existing.into_iter().collect();
    if !taken.contains(base) {
        return base.to_string();
    }
    (1u64..)
        .map(|n| format!("{base} {n}"))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}

fn max_default_index<'a>(default: &str, existing: impl IntoIterator<Item = &'a str>) -> u64 {
    existing
        .into_iter()
        .filter_map(|name| default_index(default, name))
        .max()
        .unwrap_or(0)
}

fn index_after(default: &str, index: u64) -> Result<u64> {
    index.checked_add(1).ok_or_else(|| {
        ChatseedError::invalid_input(format!("no index left after '{default} {index}'"))
    })
}

/// The next auto-generated name, e.g. `"New conversation 4"` when
/// `"New conversation 3"` is the highest present index. Fails when the
/// highest present index is `u64::MAX`.
pub fn next_default_name<'a>(default: &str, existing: impl IntoIterator<Item = &'a str>) -> Result<String> {
    let index = index_after(default, max_default_index(default, existing))?;
    Ok(format!("{default} {index}"))
}

/// Names grouped by scope.
#[derive(Debug, Clone, Default)]
pub struct ScopedNames {
    names: HashMap<Scope, Vec<String>>,
}

impl ScopedNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entities(conversations: &[Conversation], prompts: &[Prompt], folders: &[Folder]) -> Self {
        let mut index = Self::new();
        for conversation in conversations {
            index.insert(Scope::of_conversation(conversation), &conversation.name);
        }
        for prompt in prompts {
            index.insert(Scope::of_prompt(prompt), &prompt.name);
        }
        for folder in folders {
            index.insert(Scope::of_folder(folder), &folder.name);
        }
        index
    }

    pub fn insert(&mut self, scope: Scope, name: impl Into<String>) {
        self.names.entry(scope).or_default().push(name.into());
    }

    pub fn names_in(&self, scope: &Scope) -> impl Iterator<Item = &str> {
        self.names
            .get(scope)
            .into_iter()
            .flat_map(|names| names.iter().map(String::as_str))
    }

    pub fn contains(&self, scope: &Scope, name: &str) -> bool {
        self.names_in(scope).any(|n| n == name)
    }

    pub fn expected_name_in(&self, scope: &Scope, base: &str) -> String {
        expected_name(base, self.names_in(scope))
    }

    /// Names that occur more than once within the same scope.
    pub fn duplicates(&self) -> Vec<(Scope, String)> {
        let mut result: Vec<(Scope, String)> = Vec::new();
        for (scope, names) in &self.names {
            let mut seen = HashSet::new();
            for name in names {
                if !seen.insert(name.as_str()) && !result.iter().any(|(s, n)| s == scope && n == name) {
                    result.push((scope.clone(), name.clone()));
                }
            }
        }
        result
    }
}

/// Session-scoped numerator for default names.
///
/// Within one session the issued index never goes down, even when the entity
/// holding the highest index was renamed or deleted in the meantime.
#[derive(Debug, Clone, Default)]
pub struct NameSequence {
    last_issued: HashMap<Scope, u64>,
}

impl NameSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next default name for `scope` given the names currently
    /// present there. Nothing is recorded when the index space is exhausted.
    pub fn next<'a>(
        &mut self,
        scope: &Scope,
        default: &str,
        present: impl IntoIterator<Item = &'a str>,
    ) -> Result<String> {
        let from_present = max_default_index(default, present);
        let last = self.last_issued.get(scope).copied().unwrap_or(0);
        let index = index_after(default, from_present.max(last))?;
        self.last_issued.insert(scope.clone(), index);
        Ok(format!("{default} {index}"))
    }

    pub fn last_issued(&self, scope: &Scope) -> Option<u64> {
        self.last_issued.get(scope).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHATS: EntityKind = EntityKind::Conversation;

    #[test]
    fn test_expected_name_without_collision_keeps_base() {
        assert_eq!(expected_name("Report", ["Other", "Report 1"]), "Report");
    }

    #[test]
    fn test_expected_name_uses_smallest_free_postfix() {
        assert_eq!(expected_name("Report", ["Report"]), "Report 1");
        assert_eq!(expected_name("Report", ["Report", "Report 1", "Report 3"]), "Report 2");
    }

    #[test]
    fn test_scopes_are_independent() {
        let mut names = ScopedNames::new();
        names.insert(Scope::root(CHATS), "Same");
        names.insert(Scope::folder(CHATS, "f1"), "Same");

        assert_eq!(names.expected_name_in(&Scope::folder(CHATS, "f2"), "Same"), "Same");
        assert_eq!(names.expected_name_in(&Scope::root(CHATS), "Same"), "Same 1");
        assert_eq!(names.expected_name_in(&Scope::root(EntityKind::Prompt), "Same"), "Same");
        assert!(names.duplicates().is_empty());
    }

    #[test]
    fn test_duplicates_reported_once_per_scope() {
        let mut names = ScopedNames::new();
        for _ in 0..3 {
            names.insert(Scope::folder(CHATS, "f1"), "Twin");
        }
        assert_eq!(
            names.duplicates(),
            vec![(Scope::folder(CHATS, "f1"), "Twin".to_string())]
        );
    }

    #[test]
    fn test_default_index_parsing() {
        assert_eq!(default_index("New conversation", "New conversation"), Some(1));
        assert_eq!(default_index("New conversation", "New conversation 12"), Some(12));
        assert_eq!(default_index("New conversation", "New conversation +3"), None);
        assert_eq!(default_index("New conversation", "New conversation 3a"), None);
        assert_eq!(default_index("New conversation", "New conversations 3"), None);
        assert_eq!(default_index("New conversation", "Renamed"), None);
    }

    #[test]
    fn test_next_default_name_ignores_renamed_entities() {
        let present = ["New conversation 1", "Renamed", "New conversation 2"];
        assert_eq!(next_default_name(DEFAULT_CONVERSATION_NAME, present).unwrap(), "New conversation 3");
        assert_eq!(
            next_default_name(DEFAULT_CONVERSATION_NAME, std::iter::empty()).unwrap(),
            "New conversation 1"
        );
    }

    #[test]
    fn test_next_default_name_crosses_thousand() {
        let present: Vec<String> = (1..=999).map(|i| format!("New conversation {i}")).collect();
        let next = next_default_name(DEFAULT_CONVERSATION_NAME, present.iter().map(String::as_str)).unwrap();
        assert_eq!(next, "New conversation 1000");
    }

    #[test]
    fn test_next_default_name_at_max_index_is_invalid_input() {
        let present = ["New conversation 18446744073709551615"];
        let err = next_default_name(DEFAULT_CONVERSATION_NAME, present).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_sequence_never_reuses_retired_index() {
        let scope = Scope::root(CHATS);
        let mut sequence = NameSequence::new();

        let first = sequence.next(&scope, DEFAULT_CONVERSATION_NAME, std::iter::empty()).unwrap();
        let second = sequence.next(&scope, DEFAULT_CONVERSATION_NAME, [first.as_str()]).unwrap();
        assert_eq!(second, "New conversation 2");

        // "New conversation 2" was deleted; the sequence still moves forward.
        let third = sequence.next(&scope, DEFAULT_CONVERSATION_NAME, [first.as_str()]).unwrap();
        assert_eq!(third, "New conversation 3");
        assert_eq!(sequence.last_issued(&scope), Some(3));

        let other = sequence
            .next(&Scope::folder(CHATS, "f1"), DEFAULT_CONVERSATION_NAME, std::iter::empty())
            .unwrap();
        assert_eq!(other, "New conversation 1");
    }

    #[test]
    fn test_sequence_follows_higher_present_index() {
        let scope = Scope::root(CHATS);
        let mut sequence = NameSequence::new();
        let next = sequence.next(&scope, DEFAULT_CONVERSATION_NAME, ["New conversation 7"]).unwrap();
        assert_eq!(next, "New conversation 8");
    }

    #[test]
    fn test_sequence_at_max_index_is_invalid_input() {
        let scope = Scope::root(CHATS);
        let mut sequence = NameSequence::new();
        let err = sequence
            .next(&scope, DEFAULT_CONVERSATION_NAME, ["New conversation 18446744073709551615"])
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(sequence.last_issued(&scope), None);
    }
}
