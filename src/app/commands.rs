//! Contains all the command handlers that are callable from the frontend via IPC.
//!
//! Each function in this module corresponds to one `Command` variant. The
//! handlers mutate the `AppState`, talk to the `Backend`, and send `UserEvent`s
//! back to the UI.

use chrono::Utc;
use std::sync::{Arc, Mutex};

use super::backend::{Backend, SaveRequest};
use super::events::{InputsPayload, UserEvent};
use super::file_dialog::DialogService;
use super::helpers::{lock_state, notify, with_state_and_notify};
use super::proxy::EventProxy;
use super::state::AppState;
use super::tasks;
use crate::config::AppConfig;
use crate::core::report::output_filename;
use crate::core::ScanMode;

/// Persists the configuration, logging instead of failing.
async fn persist_config(backend: &Arc<dyn Backend>, config: AppConfig) {
    if let Err(e) = backend.save_config(config).await {
        tracing::warn!("Failed to save config: {}", e);
    }
}

/// Handles the initial request for state from the frontend when it loads.
pub fn initialize<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    let state_guard = lock_state(&state);
    notify(&state_guard, &proxy);
}

/// Switches between file listing and hierarchy mode.
pub async fn set_mode<P: EventProxy>(
    mode: ScanMode,
    backend: Arc<dyn Backend>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let config = with_state_and_notify(&state, &proxy, |s| {
        s.config.mode = mode;
        s.config.clone()
    });
    persist_config(&backend, config).await;
}

/// Stores the extension, ignored-extension and folders-only inputs.
pub async fn update_inputs<P: EventProxy>(
    inputs: InputsPayload,
    backend: Arc<dyn Backend>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let config = with_state_and_notify(&state, &proxy, |s| {
        s.config.extension = inputs.extension;
        s.config.ignored_extensions = inputs.ignored_extensions;
        s.config.folders_only = inputs.folders_only;
        s.config.clone()
    });
    persist_config(&backend, config).await;
}

/// Opens a folder dialog and makes the selection the source folder.
pub async fn browse_source<P: EventProxy>(
    dialog: Arc<dyn DialogService>,
    backend: Arc<dyn Backend>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Some(path) = dialog.pick_directory("Select Folder") else {
        tracing::info!("User cancelled source selection.");
        return;
    };

    let config = with_state_and_notify(&state, &proxy, |s| {
        s.status = format!("Source: {}", path.display());
        s.config.last_source_directory = Some(path);
        s.config.clone()
    });
    persist_config(&backend, config).await;
}

/// Opens a folder dialog and makes the selection the output folder.
pub async fn browse_output<P: EventProxy>(
    dialog: Arc<dyn DialogService>,
    backend: Arc<dyn Backend>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Some(path) = dialog.pick_directory("Select Output Directory") else {
        tracing::info!("User cancelled output selection.");
        return;
    };

    let config = with_state_and_notify(&state, &proxy, |s| {
        s.config.output_directory = Some(path);
        s.config.clone()
    });
    persist_config(&backend, config).await;
}

/// Adds folders picked in a multi-select dialog to the ignore list, skipping duplicates.
pub async fn add_ignored_folders<P: EventProxy>(
    dialog: Arc<dyn DialogService>,
    backend: Arc<dyn Backend>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let picked = dialog.pick_directories("Select Folders to Ignore");
    if picked.is_empty() {
        return;
    }

    let config = with_state_and_notify(&state, &proxy, |s| {
        for path in &picked {
            let entry = path.to_string_lossy().to_string();
            if !s.config.ignored_folders.contains(&entry) {
                s.config.ignored_folders.push(entry);
            }
        }
        s.status = format!("Ignored {} folder(s)", picked.len());
        s.config.clone()
    });
    persist_config(&backend, config).await;
}

/// Removes one entry from the ignore list. Out-of-range indices are ignored.
pub async fn remove_ignored_folder<P: EventProxy>(
    index: usize,
    backend: Arc<dyn Backend>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let config = with_state_and_notify(&state, &proxy, |s| {
        if index < s.config.ignored_folders.len() {
            let removed = s.config.ignored_folders.remove(index);
            tracing::info!("Removed ignored folder {}", removed);
            Some(s.config.clone())
        } else {
            tracing::warn!("No ignored folder at index {}", index);
            None
        }
    });
    if let Some(config) = config {
        persist_config(&backend, config).await;
    }
}

/// Lists files or renders the hierarchy of the source folder.
pub fn execute<P: EventProxy>(backend: Arc<dyn Backend>, proxy: P, state: Arc<Mutex<AppState>>) {
    tasks::start_execution(backend, proxy, state);
}

/// Cancels the running execution.
pub fn cancel_execution<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        tracing::info!("LOG: IPC 'cancelExecution' received.");
        s.cancel_current_task();
    });
}

/// Writes the console text to a timestamped file in the output folder.
pub async fn save_console<P: EventProxy>(
    backend: Arc<dyn Backend>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let request = {
        let mut state_guard = lock_state(&state);
        if state_guard.console_text.is_empty() {
            state_guard.status = "Console is empty".to_string();
            notify(&state_guard, &proxy);
            return;
        }
        let Some(output_dir) = state_guard.config.output_directory.clone() else {
            state_guard.status = "Please select an output directory".to_string();
            notify(&state_guard, &proxy);
            return;
        };
        SaveRequest {
            content: state_guard.console_text.clone(),
            output_dir,
            filename: output_filename(state_guard.config.mode, Utc::now()),
        }
    };

    let filename = request.filename.clone();
    let result = backend.save_to_file(request).await;

    with_state_and_notify(&state, &proxy, |s| match result {
        Ok(path) => {
            tracing::info!("Console saved to {:?}", path);
            s.status = format!("Saved to {filename}");
        }
        Err(e) => {
            tracing::error!("Failed to save console: {}", e);
            s.status = format!("Error saving file: {e}");
        }
    });
}

/// Empties the console.
pub fn clear_console<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| s.clear_console());
}

/// Turns the animated background on or off and remembers the choice.
pub async fn set_background<P: EventProxy>(
    enabled: bool,
    backend: Arc<dyn Backend>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let config = with_state_and_notify(&state, &proxy, |s| {
        s.config.animated_background = enabled;
        s.config.clone()
    });
    proxy.send_event(UserEvent::SetBackground(enabled));
    persist_config(&backend, config).await;
}
