//! Background tasks started from command handlers.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use super::backend::{Backend, ScanRequest};
use super::helpers::{lock_state, notify};
use super::proxy::EventProxy;
use super::state::{AppState, ConsoleContent};
use crate::core::report::{format_file_listing, format_hierarchy_report, Report};
use crate::core::ScanMode;

/// Starts listing files or rendering the hierarchy of the selected source folder.
///
/// Any task still running is cancelled first. The result replaces the console
/// content once the task finishes.
pub fn start_execution<P: EventProxy>(
    backend: Arc<dyn Backend>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let mut state_guard = lock_state(&state);

    let Some(source) = state_guard.config.last_source_directory.clone() else {
        state_guard.status = "Please select a source directory".to_string();
        notify(&state_guard, &proxy);
        return;
    };

    state_guard.cancel_current_task();
    let cancel_flag = Arc::new(AtomicBool::new(false));
    state_guard.cancel_flag = cancel_flag.clone();

    let config = &state_guard.config;
    let mode = config.mode;
    let request = ScanRequest {
        folder_path: source,
        extension: config.extension.trim().to_string(),
        ignored_extensions: config.ignored_extensions.clone(),
        ignored_folders: config.ignored_folders.clone(),
        folders_only: config.folders_only,
    };

    state_guard.is_running = true;
    state_guard.console = ConsoleContent::Loading;
    state_guard.status = "Processing...".to_string();

    tracing::info!("Starting {} execution on {:?}", mode.as_str(), request.folder_path);
    let task_state = state.clone();
    let task_proxy = proxy.clone();
    let handle = tokio::spawn(async move {
        execution_task(backend, request, mode, cancel_flag, task_proxy, task_state).await;
    });
    state_guard.task = Some(handle);

    notify(&state_guard, &proxy);
}

async fn execution_task<P: EventProxy>(
    backend: Arc<dyn Backend>,
    request: ScanRequest,
    mode: ScanMode,
    cancel_flag: Arc<AtomicBool>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let folder = request.folder_path.to_string_lossy().to_string();
    let extension = request.extension.clone();

    let result: Result<Report, _> = match mode {
        ScanMode::Files => backend
            .list_files(request, cancel_flag.clone())
            .await
            .map(|files| format_file_listing(&files)),
        ScanMode::Hierarchy => backend
            .get_hierarchy(request, cancel_flag.clone())
            .await
            .map(|hierarchy| format_hierarchy_report(&folder, &extension, &hierarchy)),
    };

    let mut state_guard = lock_state(&state);
    if !Arc::ptr_eq(&state_guard.cancel_flag, &cancel_flag) || !state_guard.is_running {
        tracing::warn!("Execution was superseded or cancelled. Discarding results.");
        return;
    }

    match result {
        Ok(report) => {
            tracing::info!("Execution finished: {}", report.count_label);
            state_guard.console = match mode {
                ScanMode::Files => ConsoleContent::Listing {
                    text: report.text.clone(),
                },
                ScanMode::Hierarchy => ConsoleContent::Hierarchy {
                    text: report.text.clone(),
                },
            };
            state_guard.console_text = report.text;
            state_guard.file_count = report.count_label;
            state_guard.status = "Complete".to_string();
        }
        Err(e) if e.is_cancelled() => {
            state_guard.status = "Operation cancelled".to_string();
        }
        Err(e) => {
            tracing::error!("Execution failed: {}", e);
            state_guard.console = ConsoleContent::Error {
                message: e.to_string(),
            };
            state_guard.console_text.clear();
            state_guard.file_count.clear();
            state_guard.status = format!("Error: {e}");
        }
    }

    state_guard.is_running = false;
    state_guard.task = None;
    notify(&state_guard, &proxy);
}
