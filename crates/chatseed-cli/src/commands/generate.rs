use anyhow::{Context, Result};
use chatseed_application::fixtures::{ConversationData, LevelNames, PromptData};
use chatseed_application::{DataInjector, transform};
use chatseed_core::conversation::Conversation;
use chatseed_core::naming::{EntityKind, NameSequence, Scope, ScopedNames};
use chatseed_core::repository::ConversationRepository;
use chatseed_infrastructure::{ChatseedPaths, ConfigService, JsonFileStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct GenerateOptions {
    pub conversations: usize,
    pub nested_level: Option<usize>,
    pub prompts: usize,
    pub replay: bool,
    pub append: bool,
    /// Defaults to `ChatseedPaths::default_export_file()`.
    pub out: Option<PathBuf>,
}

fn resolve_out(out: Option<PathBuf>) -> Result<PathBuf> {
    match out {
        Some(path) => Ok(path),
        None => ChatseedPaths::default_export_file().context("Failed to locate the default export file"),
    }
}

pub async fn run(config_path: Option<&Path>, options: GenerateOptions) -> Result<()> {
    let out = resolve_out(options.out)?;
    let config = match config_path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    }
    .get_config();

    let store = Arc::new(JsonFileStore::new(&out));
    let injector = DataInjector::new(store.clone(), store.clone(), store.clone());
    if !options.append {
        injector
            .delete_all_data()
            .await
            .with_context(|| format!("Failed to reset {}", out.display()))?;
        tracing::info!(path = %out.display(), "Reset export file");
    }

    let conversation_data = ConversationData::new(config.clone());

    // Root conversations get the application's auto-numbered default names.
    let existing = store.list_all().await?;
    let mut names = ScopedNames::from_entities(&existing, &[], &[]);
    let root = Scope::root(EntityKind::Conversation);
    let mut sequence = NameSequence::new();
    let mut root_conversations: Vec<Conversation> = Vec::with_capacity(options.conversations);
    for _ in 0..options.conversations {
        let name = sequence.next(&root, &config.default_conversation_name, names.names_in(&root))?;
        names.insert(root.clone(), name.clone());
        root_conversations.push(conversation_data.prepare_default_conversation(None, Some(name.as_str())));
    }
    if options.replay {
        let replays: Vec<Conversation> = root_conversations
            .iter()
            .map(transform::prepare_default_replay_conversation)
            .collect();
        root_conversations.extend(replays);
    }
    injector.create_conversations(&root_conversations, &[]).await?;
    tracing::info!(
        count = root_conversations.len(),
        replay = options.replay,
        "Injected root conversations"
    );

    let mut folder_count = 0;
    let mut nested_count = 0;
    if let Some(level) = options.nested_level {
        let folders = conversation_data.prepare_nested_folder(level, &LevelNames::new())?;
        let nested = conversation_data.prepare_conversations_for_nested_folders(&folders);
        injector.create_conversations(&nested, &folders).await?;
        tracing::info!(
            nested_level = level,
            folders = folders.len(),
            conversations = nested.len(),
            "Injected nested chat folders"
        );
        folder_count += folders.len();
        nested_count = nested.len();
    }

    if options.prompts > 0 {
        let prepared = PromptData::new(config).prepare_prompts_in_folder(options.prompts);
        injector
            .create_prompts(&prepared.prompts, &[prepared.folder.clone()])
            .await?;
        tracing::info!(count = options.prompts, "Injected prompts");
        folder_count += 1;
    }

    println!("Wrote {}", out.display());
    println!(
        "  conversations: {} (root {}, nested {})",
        root_conversations.len() + nested_count,
        root_conversations.len(),
        nested_count
    );
    println!("  folders:       {folder_count}");
    println!("  prompts:       {}", options.prompts);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatseed_infrastructure::dto::ExportFile;
    use std::io;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn options(out: PathBuf) -> GenerateOptions {
        GenerateOptions {
            conversations: 2,
            nested_level: Some(1),
            prompts: 3,
            replay: true,
            append: false,
            out: Some(out),
        }
    }

    #[test]
    fn test_out_defaults_to_data_dir_export() {
        let explicit = PathBuf::from("seed.json");
        assert_eq!(resolve_out(Some(explicit.clone())).unwrap(), explicit);
        assert_eq!(resolve_out(None).unwrap(), ChatseedPaths::default_export_file().unwrap());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_generate_writes_file_and_logs_steps() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("export.json");
        let config = temp_dir.path().join("missing.toml");

        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        run(Some(config.as_path()), options(out.clone())).await.unwrap();

        let data = ExportFile::new(&out).load().unwrap();
        // 2 root conversations, 2 replays, 2 nested conversations.
        assert_eq!(data.history.len(), 6);
        assert_eq!(data.prompts.len(), 3);
        assert_eq!(data.folders.len(), 3);
        assert!(data.history.iter().any(|c| c.name == "New conversation 1"));
        assert!(data.history.iter().any(|c| c.name == "New conversation 2"));

        let logged = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("Reset export file"));
        assert!(logged.contains("Injected root conversations"));
        assert!(logged.contains("Injected nested chat folders"));
        assert!(logged.contains("Injected prompts"));
    }
}
