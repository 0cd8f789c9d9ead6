pub mod error;
pub mod file_handler;
pub mod filters;
pub mod report;
pub mod scanner;
pub mod tree_generator;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An entry found while walking a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    pub path: PathBuf,
    pub is_directory: bool,
    pub size: u64,
    pub depth: usize,
    pub parent: Option<PathBuf>,
}

/// A listed file as shown in the console, `size` is 0 for folders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub path: String,
    pub size: u64,
}

impl From<FileItem> for FileInfo {
    fn from(item: FileItem) -> Self {
        let name = item
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            name,
            path: item.path.to_string_lossy().to_string(),
            size: item.size,
        }
    }
}

/// The two ways a scan result is presented.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    #[default]
    Files,
    Hierarchy,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Files => "files",
            ScanMode::Hierarchy => "hierarchy",
        }
    }
}

pub use error::CoreError;
pub use file_handler::FileHandler;
pub use filters::ScanOptions;
pub use scanner::DirectoryScanner;
pub use tree_generator::TreeGenerator;
