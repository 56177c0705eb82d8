//! Folder tree queries.
//!
//! Folders reference their parent by id. These helpers walk the parent links
//! over a flat folder list and check that every chain ends at a root.

use super::model::Folder;
use crate::error::{ChatseedError, Result};
use std::collections::{HashMap, HashSet};

fn index(folders: &[Folder]) -> HashMap<&str, &Folder> {
    folders.iter().map(|f| (f.id.as_str(), f)).collect()
}

/// Returns the folder with `id` followed by its ancestors, root-most last.
pub fn ancestors<'a>(folders: &'a [Folder], id: &str) -> Result<Vec<&'a Folder>> {
    let by_id = index(folders);
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut current = Some(id);

    while let Some(folder_id) = current {
        if !seen.insert(folder_id) {
            return Err(ChatseedError::invalid_state(format!(
                "folder cycle detected at '{folder_id}'"
            )));
        }
        let folder = by_id
            .get(folder_id)
            .copied()
            .ok_or_else(|| ChatseedError::not_found("folder", folder_id))?;
        chain.push(folder);
        current = folder.folder_id.as_deref();
    }

    Ok(chain)
}

/// Number of parents above the folder (0 for root-level folders).
pub fn depth(folders: &[Folder], id: &str) -> Result<usize> {
    Ok(ancestors(folders, id)?.len() - 1)
}

/// Slash-separated folder names from the root down to `id`.
pub fn path(folders: &[Folder], id: &str) -> Result<String> {
    let chain = ancestors(folders, id)?;
    let names: Vec<&str> = chain.iter().rev().map(|f| f.name.as_str()).collect();
    Ok(names.join("/"))
}

/// All folders nested (at any depth) under `id`, excluding `id` itself.
pub fn descendants<'a>(folders: &'a [Folder], id: &str) -> Vec<&'a Folder> {
    let mut result = Vec::new();
    let mut frontier = vec![id];
    while let Some(parent) = frontier.pop() {
        for folder in folders
            .iter()
            .filter(|f| f.folder_id.as_deref() == Some(parent))
        {
            // Guard against malformed cyclic input.
            if folder.id == id || result.iter().any(|r: &&Folder| r.id == folder.id) {
                continue;
            }
            result.push(folder);
            frontier.push(folder.id.as_str());
        }
    }
    result
}

/// Checks that every folder's parent exists, has the same type and that no
/// chain loops back on itself.
pub fn validate_chain(folders: &[Folder]) -> Result<()> {
    let by_id = index(folders);
    for folder in folders {
        if let Some(parent_id) = folder.folder_id.as_deref() {
            let parent = by_id
                .get(parent_id)
                .ok_or_else(|| ChatseedError::not_found("folder", parent_id))?;
            if parent.folder_type != folder.folder_type {
                return Err(ChatseedError::invalid_state(format!(
                    "folder '{}' ({}) is nested in '{}' ({})",
                    folder.name, folder.folder_type, parent.name, parent.folder_type
                )));
            }
        }
        ancestors(folders, &folder.id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder::FolderType;

    fn folder(id: &str, parent: Option<&str>) -> Folder {
        Folder {
            id: id.to_string(),
            name: format!("name-{id}"),
            folder_id: parent.map(str::to_string),
            folder_type: FolderType::Chat,
        }
    }

    fn chain() -> Vec<Folder> {
        vec![
            folder("f0", None),
            folder("f1", Some("f0")),
            folder("f2", Some("f1")),
        ]
    }

    #[test]
    fn test_ancestors_and_path() {
        let folders = chain();
        let ids: Vec<_> = ancestors(&folders, "f2")
            .unwrap()
            .iter()
            .map(|f| f.id.clone())
            .collect();
        assert_eq!(ids, vec!["f2", "f1", "f0"]);
        assert_eq!(path(&folders, "f2").unwrap(), "name-f0/name-f1/name-f2");
        assert_eq!(depth(&folders, "f0").unwrap(), 0);
        assert_eq!(depth(&folders, "f2").unwrap(), 2);
    }

    #[test]
    fn test_descendants() {
        let mut folders = chain();
        folders.push(folder("g", Some("f0")));
        let mut ids: Vec<_> = descendants(&folders, "f0").iter().map(|f| f.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["f1", "f2", "g"]);
        assert!(descendants(&folders, "f2").is_empty());
    }

    #[test]
    fn test_validate_detects_cycle() {
        let folders = vec![folder("a", Some("b")), folder("b", Some("a"))];
        assert!(validate_chain(&folders).unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_validate_detects_dangling_parent() {
        let folders = vec![folder("a", Some("missing"))];
        assert!(validate_chain(&folders).unwrap_err().is_not_found());
    }

    #[test]
    fn test_validate_rejects_mixed_types() {
        let mut folders = chain();
        folders[1].folder_type = FolderType::Prompt;
        assert!(validate_chain(&folders).unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_validate_accepts_chain() {
        assert!(validate_chain(&chain()).is_ok());
    }
}
