use chatseed_application::DataInjector;
use chatseed_application::fixtures::{ConversationData, LevelNames, PromptData};
use chatseed_core::config::SeedConfig;
use chatseed_core::folder::{FolderType, hierarchy};
use chatseed_core::repository::{ConversationRepository, FolderRepository, PromptRepository};
use chatseed_infrastructure::dto::{CURRENT_EXPORT_VERSION, ExportFile, import_str};
use chatseed_infrastructure::{InMemoryStore, JsonFileStore};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn file_injector(store: &Arc<JsonFileStore>) -> DataInjector {
    DataInjector::new(store.clone(), store.clone(), store.clone())
}

#[tokio::test]
async fn test_empty_store_lists_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path().join("export.json"));
    assert!(ConversationRepository::list_all(&store).await.unwrap().is_empty());
    assert!(store.list_by_type(FolderType::Chat).await.unwrap().is_empty());
    assert!(PromptRepository::list_all(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_injected_data_is_a_valid_export() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("export.json");
    let store = Arc::new(JsonFileStore::new(&path));
    let injector = file_injector(&store);

    let conversation_data = ConversationData::new(SeedConfig::default());
    let folders = conversation_data.prepare_nested_folder(2, &LevelNames::new()).unwrap();
    let conversations = conversation_data.prepare_conversations_for_nested_folders(&folders);
    injector.create_conversations(&conversations, &folders).await.unwrap();

    let prompts = PromptData::new(SeedConfig::default()).prepare_prompts_in_folder(3);
    injector
        .create_prompts(&prompts.prompts, &[prompts.folder.clone()])
        .await
        .unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], serde_json::json!(CURRENT_EXPORT_VERSION));

    let imported = import_str(&raw).unwrap();
    assert_eq!(imported.history, conversations);
    assert_eq!(imported.prompts, prompts.prompts);
    assert_eq!(imported.folders.len(), 4);
    hierarchy::validate_chain(&imported.folders).unwrap();
}

#[tokio::test]
async fn test_find_update_and_delete() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileStore::new(temp_dir.path().join("export.json")));
    let injector = file_injector(&store);
    let data = ConversationData::new(SeedConfig::default());
    let mut conversation = data.prepare_default_conversation(None, Some("Original"));

    injector.create_conversations(&[conversation.clone()], &[]).await.unwrap();
    conversation.name = "Edited".to_string();
    injector.update_conversations(&[conversation.clone()]).await.unwrap();

    let found = store.find_by_id(&conversation.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Edited");

    store.delete(&conversation.id).await.unwrap();
    assert!(store.find_by_id(&conversation.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_legacy_file_is_migrated_on_first_write() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("export.json");
    let legacy = ConversationData::new(SeedConfig::default()).prepare_default_conversation(None, Some("Legacy"));
    fs::write(&path, serde_json::to_string(&vec![legacy.clone()]).unwrap()).unwrap();

    let store = JsonFileStore::new(&path);
    let prompt = PromptData::new(SeedConfig::default()).prepare_default_prompt(Some("New"));
    PromptRepository::save_all(&store, &[prompt]).await.unwrap();

    let data = ExportFile::new(&path).load().unwrap();
    assert_eq!(data.history.len(), 1);
    assert_eq!(data.history[0].name, "Legacy");
    assert_eq!(data.prompts.len(), 1);
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw.is_object());
}

#[tokio::test]
async fn test_delete_all_data_leaves_empty_export() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("export.json");
    let store = Arc::new(JsonFileStore::new(&path));
    let injector = file_injector(&store);
    let prepared = ConversationData::new(SeedConfig::default()).prepare_conversations_in_folder(2);
    injector
        .create_conversations(&prepared.conversations, &[prepared.folder.clone()])
        .await
        .unwrap();

    injector.delete_all_data().await.unwrap();
    assert!(ExportFile::new(&path).load().unwrap().is_empty());
}

#[tokio::test]
async fn test_memory_store_behaves_like_file_store() {
    let store = Arc::new(InMemoryStore::new());
    let injector = DataInjector::new(store.clone(), store.clone(), store.clone());
    let prepared = ConversationData::new(SeedConfig::default()).prepare_conversations_in_folder(3);
    injector
        .create_conversations(&prepared.conversations, &[prepared.folder.clone()])
        .await
        .unwrap();

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.history, prepared.conversations);
    assert_eq!(snapshot.folders, vec![prepared.folder]);
}
