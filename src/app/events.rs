//! Defines the event and message structures for communication between the backend and frontend.

use serde::Deserialize;

use super::view_model::UiState;
use crate::core::ScanMode;

/// Events sent from the Rust backend to the event loop thread.
///
/// Most variants end up as a call to a `window.*` function in the frontend.
#[derive(Debug)]
pub enum UserEvent {
    /// A complete state update to re-render the UI.
    StateUpdate(Box<UiState>),
    /// An error message to be displayed to the user.
    ShowError(String),
    /// Starts or stops the animated background, which lives on the event loop thread.
    SetBackground(bool),
}

/// The filter inputs edited in the form.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InputsPayload {
    pub extension: String,
    pub ignored_extensions: String,
    pub folders_only: bool,
}

/// A message received from the WebView via the IPC channel.
///
/// Serialized as `{ "command": "<name>", "payload": <value> }`; commands without
/// arguments omit the payload.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "command", content = "payload", rename_all = "camelCase")]
pub enum Command {
    Initialize,
    SetMode(ScanMode),
    UpdateInputs(InputsPayload),
    BrowseSource,
    BrowseOutput,
    AddIgnoredFolders,
    RemoveIgnoredFolder(usize),
    Execute,
    CancelExecution,
    SaveConsole,
    ClearConsole,
    SetBackground(bool),
}
