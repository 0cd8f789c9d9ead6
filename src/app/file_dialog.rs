//! An abstraction layer for native folder dialogs to enable testing.

use std::path::PathBuf;

/// Defines a common interface for folder selection dialogs.
/// This allows for a mock implementation during tests, avoiding the need
/// to interact with actual OS dialog windows.
pub trait DialogService: Send + Sync {
    /// Opens a dialog to select a single directory.
    fn pick_directory(&self, title: &str) -> Option<PathBuf>;

    /// Opens a dialog to select several directories at once.
    fn pick_directories(&self, title: &str) -> Vec<PathBuf>;
}

/// The production implementation that uses the `rfd` crate to show native OS dialogs.
pub struct NativeDialogService;

impl DialogService for NativeDialogService {
    fn pick_directory(&self, title: &str) -> Option<PathBuf> {
        rfd::FileDialog::new().set_title(title).pick_folder()
    }

    fn pick_directories(&self, title: &str) -> Vec<PathBuf> {
        rfd::FileDialog::new()
            .set_title(title)
            .pick_folders()
            .unwrap_or_default()
    }
}
