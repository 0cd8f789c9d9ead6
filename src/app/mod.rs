//! The desktop application layer: IPC dispatch, shared state and the UI bridge.

pub mod backend;
pub mod background;
pub mod commands;
pub mod events;
pub mod file_dialog;
pub mod helpers;
pub mod proxy;
pub mod state;
pub mod tasks;
pub mod view_model;

use std::sync::{Arc, Mutex};
use wry::WebView;

use backend::Backend;
use background::DesktopBackground;
use events::{Command, UserEvent};
use file_dialog::DialogService;
use proxy::EventProxy;
use state::AppState;

/// Deserializes a message from the frontend and routes it to its handler.
///
/// Handlers that wait on dialogs or the backend run on the tokio runtime so the
/// event loop never blocks.
pub fn handle_ipc_message<P: EventProxy>(
    message: String,
    dialog: Arc<dyn DialogService>,
    backend: Arc<dyn Backend>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let command: Command = match serde_json::from_str(&message) {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("Failed to parse IPC message {:?}: {}", message, e);
            proxy.send_event(UserEvent::ShowError(format!("Unknown command: {e}")));
            return;
        }
    };
    tracing::debug!("IPC command received: {:?}", command);

    match command {
        Command::Initialize => commands::initialize(proxy, state),
        Command::SetMode(mode) => {
            tokio::spawn(commands::set_mode(mode, backend, proxy, state));
        }
        Command::UpdateInputs(inputs) => {
            tokio::spawn(commands::update_inputs(inputs, backend, proxy, state));
        }
        Command::BrowseSource => {
            tokio::spawn(commands::browse_source(dialog, backend, proxy, state));
        }
        Command::BrowseOutput => {
            tokio::spawn(commands::browse_output(dialog, backend, proxy, state));
        }
        Command::AddIgnoredFolders => {
            tokio::spawn(commands::add_ignored_folders(dialog, backend, proxy, state));
        }
        Command::RemoveIgnoredFolder(index) => {
            tokio::spawn(commands::remove_ignored_folder(index, backend, proxy, state));
        }
        Command::Execute => commands::execute(backend, proxy, state),
        Command::CancelExecution => commands::cancel_execution(proxy, state),
        Command::SaveConsole => {
            tokio::spawn(commands::save_console(backend, proxy, state));
        }
        Command::ClearConsole => commands::clear_console(proxy, state),
        Command::SetBackground(enabled) => {
            tokio::spawn(commands::set_background(enabled, backend, proxy, state));
        }
    }
}

/// Applies a `UserEvent` on the event loop thread.
pub fn handle_user_event(event: UserEvent, webview: &WebView, background: &mut DesktopBackground) {
    let script = match event {
        UserEvent::StateUpdate(ui_state) => match serde_json::to_string(&ui_state) {
            Ok(json) => format!("window.updateState({json});"),
            Err(e) => {
                tracing::error!("Failed to serialize UI state: {}", e);
                return;
            }
        },
        UserEvent::ShowError(message) => match serde_json::to_string(&message) {
            Ok(json) => format!("window.showError({json});"),
            Err(e) => {
                tracing::error!("Failed to serialize error message: {}", e);
                return;
            }
        },
        UserEvent::SetBackground(enabled) => {
            background::apply_preference(background, enabled, webview);
            return;
        }
    };

    if let Err(e) = webview.evaluate_script(&script) {
        tracing::error!("Failed to evaluate script in webview: {}", e);
    }
}
