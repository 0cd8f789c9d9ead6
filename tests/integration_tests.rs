//! Integration tests for the Metatron application layer.
//!
//! These tests use an async-aware MPSC channel from `tokio::sync` to avoid
//! deadlocks between the test thread and the application's async tasks.

use metatron::app::{
    self,
    backend::{Backend, NativeBackend},
    events::{InputsPayload, UserEvent},
    file_dialog::DialogService,
    proxy::EventProxy,
    state::{AppState, ConsoleContent},
    view_model::UiState,
};
use metatron::config::AppConfig;
use metatron::core::ScanMode;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Contains the test infrastructure.
mod helpers {
    use super::*;
    use std::fs;

    /// A test double for the `EventLoopProxy` using a tokio MPSC channel.
    #[derive(Clone)]
    pub struct TestEventProxy {
        pub sender: mpsc::UnboundedSender<UserEvent>,
    }

    impl EventProxy for TestEventProxy {
        fn send_event(&self, event: UserEvent) {
            if let Err(e) = self.sender.send(event) {
                // Panic in a test if the receiver is dropped, as it indicates a test setup error.
                panic!("Test receiver dropped: {}", e);
            }
        }
    }

    /// Answers folder dialogs with preset selections.
    #[derive(Default)]
    pub struct MockDialogService {
        pub directory: Option<PathBuf>,
        pub directories: Vec<PathBuf>,
    }

    impl DialogService for MockDialogService {
        fn pick_directory(&self, _title: &str) -> Option<PathBuf> {
            self.directory.clone()
        }

        fn pick_directories(&self, _title: &str) -> Vec<PathBuf> {
            self.directories.clone()
        }
    }

    /// `TestHarness` sets up a complete, isolated environment for each test case.
    pub struct TestHarness {
        pub state: Arc<Mutex<AppState>>,
        pub proxy: TestEventProxy,
        pub event_rx: mpsc::UnboundedReceiver<UserEvent>,
        pub backend: Arc<dyn Backend>,
        pub root_path: PathBuf,
        pub output_path: PathBuf,
        _temp_dir: TempDir,
    }

    impl TestHarness {
        /// Creates a new test harness with a clean configuration.
        pub fn new() -> Self {
            let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
            let root_path = temp_dir.path().join("project");
            let output_path = temp_dir.path().join("out");
            fs::create_dir_all(&root_path).expect("Failed to create project dir");
            fs::create_dir_all(&output_path).expect("Failed to create output dir");
            let (event_tx, event_rx) = mpsc::unbounded_channel();

            let config = AppConfig {
                output_directory: Some(output_path.clone()),
                last_source_directory: Some(root_path.clone()),
                animated_background: false,
                ..Default::default()
            };
            let backend = NativeBackend::with_config_dir(temp_dir.path().join("cfg"));

            Self {
                state: Arc::new(Mutex::new(AppState::new(config))),
                proxy: TestEventProxy { sender: event_tx },
                event_rx,
                backend: Arc::new(backend),
                root_path,
                output_path,
                _temp_dir: temp_dir,
            }
        }

        /// Creates a file inside the temporary project directory.
        pub fn create_file(&self, path: &str, content: &str) {
            let file_path = self.root_path.join(path);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent dir");
            }
            fs::write(file_path, content).expect("Failed to write file");
        }

        /// Sets up a standard project structure for testing.
        pub fn setup_basic_project(&self) {
            self.create_file("src/main.rs", "fn main() {}");
            self.create_file("src/lib.rs", "// Library code");
            self.create_file("README.md", "# My Project");
            self.create_file("Cargo.toml", "[package]\nname = \"test\"");
            self.create_file("docs/guide.txt", "User guide content");
            self.create_file("target/debug/app.rs", "// build output");
        }

        pub fn configure(&self, update: impl FnOnce(&mut AppConfig)) {
            update(&mut self.state.lock().unwrap().config);
        }

        pub fn dialog(&self, dialog: MockDialogService) -> Arc<dyn DialogService> {
            Arc::new(dialog)
        }

        /// Returns the next state update, skipping other events.
        pub async fn next_state(&mut self) -> UiState {
            loop {
                match tokio::time::timeout(Duration::from_secs(5), self.event_rx.recv()).await {
                    Ok(Some(UserEvent::StateUpdate(ui_state))) => return *ui_state,
                    Ok(Some(_)) => { /* Ignore other events */ }
                    _ => panic!("No state update within timeout or channel closed"),
                }
            }
        }

        /// Waits until an execution has finished.
        pub async fn wait_for_execution_completion(&mut self) -> UiState {
            loop {
                let ui_state = self.next_state().await;
                if !ui_state.is_running {
                    return ui_state;
                }
            }
        }
    }
}

use helpers::{MockDialogService, TestHarness};

#[tokio::test]
async fn execute_in_files_mode_lists_matching_file_names() {
    let mut harness = TestHarness::new();
    harness.setup_basic_project();
    harness.configure(|c| {
        c.extension = "rs".to_string();
        c.ignored_folders = vec!["target".to_string()];
    });

    app::commands::execute(
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    );

    let started = harness.next_state().await;
    assert!(started.is_running);
    assert_eq!(started.console, ConsoleContent::Loading);
    assert_eq!(started.status, "Processing...");

    let done = harness.wait_for_execution_completion().await;
    assert_eq!(done.status, "Complete");
    assert_eq!(done.console_text, "lib.rs\nmain.rs");
    assert_eq!(done.file_count, "2 files found");
    assert_eq!(
        done.console,
        ConsoleContent::Listing {
            text: "lib.rs\nmain.rs".to_string()
        }
    );
    assert!(harness.state.lock().unwrap().task.is_none());
}

#[tokio::test]
async fn execute_in_hierarchy_mode_renders_banner_and_tree() {
    let mut harness = TestHarness::new();
    harness.setup_basic_project();
    harness.configure(|c| {
        c.mode = ScanMode::Hierarchy;
        c.extension = "rs".to_string();
        c.ignored_folders = vec!["target".to_string()];
    });

    app::commands::execute(
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    );
    let done = harness.wait_for_execution_completion().await;

    assert_eq!(done.status, "Complete");
    assert!(matches!(done.console, ConsoleContent::Hierarchy { .. }));
    let text = done.console_text;
    assert!(text.contains("FILE HIERARCHY"));
    assert!(text.contains("Extension: rs"));
    assert!(text.contains("📁 project\n└── 📁 src\n    ├── 📄 lib.rs\n    └── 📄 main.rs\n"));
    assert!(!text.contains("📁 docs"));
    assert!(!text.contains("📁 target"));
    assert!(text.ends_with("── End of hierarchy ──"));
    assert_eq!(done.file_count, "5 lines");
}

#[tokio::test]
async fn execute_on_missing_source_reports_an_error() {
    let mut harness = TestHarness::new();
    let missing = harness.root_path.join("gone");
    harness.configure(|c| c.last_source_directory = Some(missing));

    app::commands::execute(
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    );
    let done = harness.wait_for_execution_completion().await;

    assert!(done.status.starts_with("Error: Path is not a valid directory"));
    assert!(matches!(done.console, ConsoleContent::Error { .. }));
    assert!(done.console_text.is_empty());
}

#[tokio::test]
async fn execute_without_source_asks_for_one() {
    let mut harness = TestHarness::new();
    harness.configure(|c| c.last_source_directory = None);

    app::commands::execute(
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    );
    let ui_state = harness.next_state().await;

    assert_eq!(ui_state.status, "Please select a source directory");
    assert!(!ui_state.is_running);
}

#[tokio::test]
async fn cancel_stops_a_started_execution() {
    let mut harness = TestHarness::new();
    harness.setup_basic_project();

    app::commands::execute(
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    );
    app::commands::cancel_execution(harness.proxy.clone(), harness.state.clone());

    let started = harness.next_state().await;
    assert!(started.is_running);
    let cancelled = harness.next_state().await;
    assert!(!cancelled.is_running);
    assert_eq!(cancelled.status, "Operation cancelled");

    // The aborted task must not overwrite the cancelled state.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let state = harness.state.lock().unwrap();
    assert_eq!(state.status, "Operation cancelled");
    assert!(state.console_text.is_empty());
}

#[tokio::test]
async fn save_console_writes_a_timestamped_file() {
    let mut harness = TestHarness::new();
    harness.setup_basic_project();

    app::commands::execute(
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    );
    let done = harness.wait_for_execution_completion().await;

    app::commands::save_console(
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    )
    .await;
    let saved = harness.next_state().await;
    assert!(saved.status.starts_with("Saved to metatron_files_"));

    let entries: Vec<_> = std::fs::read_dir(&harness.output_path)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(std::fs::read_to_string(&entries[0]).unwrap(), done.console_text);
}

#[tokio::test]
async fn save_console_refuses_empty_console() {
    let mut harness = TestHarness::new();

    app::commands::save_console(
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    )
    .await;

    assert_eq!(harness.next_state().await.status, "Console is empty");
}

#[tokio::test]
async fn save_console_requires_an_output_directory() {
    let mut harness = TestHarness::new();
    harness.configure(|c| c.output_directory = None);
    harness.state.lock().unwrap().console_text = "something".to_string();

    app::commands::save_console(
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    )
    .await;

    assert_eq!(
        harness.next_state().await.status,
        "Please select an output directory"
    );
}

#[tokio::test]
async fn ignored_folders_are_added_once_and_removed_by_index() {
    let mut harness = TestHarness::new();
    let picked = vec![harness.root_path.join("target"), harness.root_path.join("node_modules")];
    let dialog = harness.dialog(MockDialogService {
        directories: picked.clone(),
        ..Default::default()
    });

    app::commands::add_ignored_folders(
        dialog.clone(),
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    )
    .await;
    let first = harness.next_state().await;
    assert_eq!(first.status, "Ignored 2 folder(s)");
    assert_eq!(first.ignored_folders_label, "2 folder(s) selected");

    app::commands::add_ignored_folders(
        dialog,
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    )
    .await;
    assert_eq!(harness.next_state().await.ignored_folders.len(), 2);

    app::commands::remove_ignored_folder(
        0,
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    )
    .await;
    let after_remove = harness.next_state().await;
    assert_eq!(
        after_remove.ignored_folders,
        vec![picked[1].to_string_lossy().to_string()]
    );

    let persisted = harness.backend.load_config().await.unwrap();
    assert_eq!(persisted.ignored_folders, after_remove.ignored_folders);
}

#[tokio::test]
async fn browse_source_stores_the_selection() {
    let mut harness = TestHarness::new();
    let chosen = harness.root_path.join("src");
    let dialog = harness.dialog(MockDialogService {
        directory: Some(chosen.clone()),
        ..Default::default()
    });

    app::commands::browse_source(
        dialog,
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    )
    .await;

    let ui_state = harness.next_state().await;
    assert_eq!(ui_state.source_path, chosen.to_string_lossy());
    assert_eq!(
        harness.state.lock().unwrap().config.last_source_directory,
        Some(chosen)
    );
}

#[tokio::test]
async fn cancelled_dialog_changes_nothing() {
    let mut harness = TestHarness::new();
    let before = harness.state.lock().unwrap().config.clone();

    app::commands::browse_output(
        harness.dialog(MockDialogService::default()),
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    )
    .await;

    assert_eq!(harness.state.lock().unwrap().config, before);
    assert!(harness.event_rx.try_recv().is_err());
}

#[tokio::test]
async fn update_inputs_and_mode_are_persisted() {
    let mut harness = TestHarness::new();

    app::commands::update_inputs(
        InputsPayload {
            extension: "rs, toml".to_string(),
            ignored_extensions: "lock".to_string(),
            folders_only: true,
        },
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    )
    .await;
    let ui_state = harness.next_state().await;
    assert_eq!(ui_state.extension, "rs, toml");
    assert!(ui_state.folders_only);

    app::commands::set_mode(
        ScanMode::Hierarchy,
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    )
    .await;
    assert_eq!(harness.next_state().await.mode, ScanMode::Hierarchy);

    let persisted = harness.backend.load_config().await.unwrap();
    assert_eq!(persisted.mode, ScanMode::Hierarchy);
    assert_eq!(persisted.ignored_extensions, "lock");
}

#[tokio::test]
async fn set_background_notifies_the_event_loop() {
    let mut harness = TestHarness::new();

    app::commands::set_background(
        true,
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    )
    .await;

    let mut saw_toggle = false;
    while let Ok(event) = harness.event_rx.try_recv() {
        if let UserEvent::SetBackground(enabled) = event {
            saw_toggle = enabled;
        }
    }
    assert!(saw_toggle);
    assert!(harness.backend.load_config().await.unwrap().animated_background);
}

#[tokio::test]
async fn clear_console_resets_output() {
    let mut harness = TestHarness::new();
    {
        let mut state = harness.state.lock().unwrap();
        state.console_text = "a.rs".to_string();
        state.file_count = "1 files found".to_string();
    }

    app::commands::clear_console(harness.proxy.clone(), harness.state.clone());

    let ui_state = harness.next_state().await;
    assert!(ui_state.console_text.is_empty());
    assert!(ui_state.file_count.is_empty());
    assert_eq!(ui_state.status, "Console cleared");
}

#[tokio::test]
async fn malformed_ipc_message_shows_an_error() {
    let mut harness = TestHarness::new();

    app::handle_ipc_message(
        r#"{"command":"selfDestruct"}"#.to_string(),
        harness.dialog(MockDialogService::default()),
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    );

    match harness.event_rx.try_recv() {
        Ok(UserEvent::ShowError(message)) => assert!(message.starts_with("Unknown command")),
        other => panic!("Expected an error event, got {:?}", other),
    }
}

#[tokio::test]
async fn initialize_over_ipc_sends_the_current_state() {
    let mut harness = TestHarness::new();

    app::handle_ipc_message(
        r#"{"command":"initialize"}"#.to_string(),
        harness.dialog(MockDialogService::default()),
        harness.backend.clone(),
        harness.proxy.clone(),
        harness.state.clone(),
    );

    let ui_state = harness.next_state().await;
    assert_eq!(ui_state.status, "Ready");
    assert_eq!(ui_state.mode, ScanMode::Files);
}
