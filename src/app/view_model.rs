//! Responsible for transforming the `AppState` into a `UiState` view model.

use serde::Serialize;

use super::state::{AppState, ConsoleContent};
use crate::core::ScanMode;

/// A serializable representation of the application state for the UI.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub mode: ScanMode,
    pub source_path: String,
    pub output_path: String,
    pub extension: String,
    pub ignored_extensions: String,
    pub ignored_folders: Vec<String>,
    pub ignored_folders_label: String,
    pub folders_only: bool,
    pub animated_background: bool,
    pub console: ConsoleContent,
    pub console_text: String,
    pub file_count: String,
    pub status: String,
    pub is_running: bool,
}

fn ignored_folders_label(count: usize) -> String {
    if count == 0 {
        "No folders selected".to_string()
    } else {
        format!("{count} folder(s) selected")
    }
}

/// Creates the complete `UiState` from the current `AppState`.
pub fn generate_ui_state(state: &AppState) -> UiState {
    let config = &state.config;
    let display = |path: &Option<std::path::PathBuf>| {
        path.as_ref()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default()
    };

    UiState {
        mode: config.mode,
        source_path: display(&config.last_source_directory),
        output_path: display(&config.output_directory),
        extension: config.extension.clone(),
        ignored_extensions: config.ignored_extensions.clone(),
        ignored_folders: config.ignored_folders.clone(),
        ignored_folders_label: ignored_folders_label(config.ignored_folders.len()),
        folders_only: config.folders_only,
        animated_background: config.animated_background,
        console: state.console.clone(),
        console_text: state.console_text.clone(),
        file_count: state.file_count.clone(),
        status: state.status.clone(),
        is_running: state.is_running,
    }
}
