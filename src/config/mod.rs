pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::ScanMode;

/// Persisted application settings.
///
/// Every field falls back to its default when missing, so configuration files
/// written by older versions (which only stored `output_directory`) still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub output_directory: Option<PathBuf>,
    pub last_source_directory: Option<PathBuf>,
    pub mode: ScanMode,
    pub extension: String,
    pub ignored_extensions: String,
    pub ignored_folders: Vec<String>,
    pub folders_only: bool,
    pub animated_background: bool,
    pub window_size: (f64, f64),
    pub window_position: (f64, f64),
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_directory: dirs::desktop_dir(),
            last_source_directory: None,
            mode: ScanMode::Files,
            extension: String::new(),
            ignored_extensions: String::new(),
            ignored_folders: Vec::new(),
            folders_only: false,
            animated_background: true,
            window_size: (1100.0, 760.0),
            window_position: (100.0, 100.0),
        }
    }
}
