//! Defines the central, mutable state of the application.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::config::AppConfig;

/// What the console panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConsoleContent {
    Welcome { title: String, subtitle: String },
    Loading,
    Listing { text: String },
    Hierarchy { text: String },
    Error { message: String },
}

impl ConsoleContent {
    pub fn welcome(title: &str, subtitle: &str) -> Self {
        ConsoleContent::Welcome {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        }
    }
}

/// Holds the complete, mutable state of the application.
///
/// This struct is wrapped in an `Arc<Mutex<...>>` to allow for safe, shared access
/// from different threads (e.g., the main event loop, IPC handlers, and async tasks).
pub struct AppState {
    /// The application's configuration settings, including the form inputs.
    pub config: AppConfig,
    /// What the console panel shows.
    pub console: ConsoleContent,
    /// The plain text of the last result, used for saving and copying.
    pub console_text: String,
    /// The label next to the console, e.g. "12 files found".
    pub file_count: String,
    /// The status bar text.
    pub status: String,
    /// `true` while a listing or hierarchy is being computed.
    pub is_running: bool,
    /// A handle to the currently running task, allowing it to be aborted.
    pub task: Option<JoinHandle<()>>,
    /// A flag used to signal cancellation to the directory walker.
    pub cancel_flag: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            console: ConsoleContent::welcome("Metatron", "Select a folder and press Execute"),
            console_text: String::new(),
            file_count: String::new(),
            status: "Ready".to_string(),
            is_running: false,
            task: None,
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Cancels the running task, if any, and resets the running state.
    pub fn cancel_current_task(&mut self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.task.take() {
            tracing::info!("Aborting running task.");
            handle.abort();
        }
        if self.is_running {
            self.is_running = false;
            self.status = "Operation cancelled".to_string();
            self.console = ConsoleContent::welcome("Operation Cancelled", "Ready for new operation");
        }
    }

    /// Empties the console and the count label.
    pub fn clear_console(&mut self) {
        self.console_text.clear();
        self.file_count.clear();
        self.console = ConsoleContent::welcome("Console Cleared", "Ready for new operation");
        self.status = "Console cleared".to_string();
    }
}
