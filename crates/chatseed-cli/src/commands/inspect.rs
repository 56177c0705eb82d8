use anyhow::{Context, Result};
use chatseed_core::folder::{FolderType, hierarchy};
use chatseed_core::naming::ScopedNames;
use chatseed_infrastructure::dto::ExportFile;
use std::path::Path;

pub fn run(file: &Path) -> Result<()> {
    let data = ExportFile::new(file)
        .load()
        .with_context(|| format!("Failed to read {}", file.display()))?;

    println!("{}", file.display());
    println!("  conversations: {}", data.history.len());
    println!(
        "    replays:     {}",
        data.history.iter().filter(|c| c.is_replay()).count()
    );
    println!(
        "    playbacks:   {}",
        data.history.iter().filter(|c| c.is_playback()).count()
    );
    println!("  prompts:       {}", data.prompts.len());

    for folder_type in [FolderType::Chat, FolderType::Prompt] {
        let folders: Vec<_> = data.folders_of_type(folder_type).cloned().collect();
        println!("  {folder_type} folders: {}", folders.len());
        for folder in &folders {
            match hierarchy::path(&folders, &folder.id) {
                Ok(path) => println!("    {path}"),
                Err(e) => println!("    {} ({e})", folder.name),
            }
        }
    }

    let duplicates = ScopedNames::from_entities(&data.history, &data.prompts, &data.folders).duplicates();
    if !duplicates.is_empty() {
        println!("  duplicate names:");
        for (scope, name) in duplicates {
            println!("    {name} in {scope:?}");
        }
    }

    Ok(())
}
