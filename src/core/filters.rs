//! Extension and folder filters applied while walking a directory.

use std::path::Path;

/// Splits a user-entered extension list on commas and spaces.
///
/// Each entry is trimmed, lowercased and stripped of a leading dot; empty
/// entries are dropped. `" .RS, .Txt  md "` becomes `["rs", "txt", "md"]`.
pub fn parse_extensions(input: &str) -> Vec<String> {
    input
        .split([',', ' '])
        .map(|s| s.trim().to_lowercase().trim_start_matches('.').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Normalizes a path string for case-insensitive, separator-agnostic comparisons.
pub fn normalize_path_str(input: &str) -> String {
    input
        .trim()
        .replace('\\', "/")
        .trim_end_matches('/')
        .to_lowercase()
}

fn has_any_suffix(filename: &str, extensions: &[String]) -> bool {
    let filename_lower = filename.to_lowercase();
    extensions
        .iter()
        .any(|ext| filename_lower.ends_with(&format!(".{ext}")))
}

/// Returns `true` if the file passes the extension filter. An empty filter accepts everything.
pub fn matches_extension(filename: &str, extensions: &[String]) -> bool {
    extensions.is_empty() || has_any_suffix(filename, extensions)
}

/// Returns `true` if the file carries one of the ignored extensions.
pub fn is_ignored_file(filename: &str, ignored_extensions: &[String]) -> bool {
    !ignored_extensions.is_empty() && has_any_suffix(filename, ignored_extensions)
}

/// Returns `true` if the folder must be skipped together with everything below it.
///
/// Entries that look like paths (they contain a separator or a drive colon) match
/// the folder itself and all its descendants. Bare names match any folder with
/// that name, case-insensitively.
pub fn is_ignored_folder(path: &Path, ignored_folders: &[String]) -> bool {
    if ignored_folders.is_empty() {
        return false;
    }

    let folder_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let path_lower = normalize_path_str(&path.to_string_lossy());

    ignored_folders.iter().any(|entry| {
        let normalized = normalize_path_str(entry);
        if normalized.is_empty() {
            return false;
        }
        if normalized.contains('/') || normalized.contains(':') {
            path_lower == normalized || path_lower.starts_with(&format!("{normalized}/"))
        } else {
            folder_name == normalized
        }
    })
}

/// The parsed form of the filter inputs shared by listing and hierarchy rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Extensions a file must carry to be included. Empty means all files.
    pub extensions: Vec<String>,
    /// Extensions that exclude a file even if it matches `extensions`.
    pub ignored_extensions: Vec<String>,
    /// Folder names or absolute folder paths to skip.
    pub ignored_folders: Vec<String>,
    /// Only folders are reported when set.
    pub folders_only: bool,
}

impl ScanOptions {
    /// Builds options from the raw strings entered in the UI.
    pub fn from_raw(
        extension: &str,
        ignored_extensions: &str,
        ignored_folders: &[String],
        folders_only: bool,
    ) -> Self {
        Self {
            extensions: parse_extensions(extension),
            ignored_extensions: parse_extensions(ignored_extensions),
            ignored_folders: ignored_folders
                .iter()
                .filter(|s| !s.trim().is_empty())
                .cloned()
                .collect(),
            folders_only,
        }
    }

    /// Returns `true` if a file with this name should be reported.
    pub fn accepts_file(&self, filename: &str) -> bool {
        !self.folders_only
            && !is_ignored_file(filename, &self.ignored_extensions)
            && matches_extension(filename, &self.extensions)
    }

    /// Returns `true` if this folder should be skipped.
    pub fn skips_folder(&self, path: &Path) -> bool {
        is_ignored_folder(path, &self.ignored_folders)
    }

    /// Folders with no matching content are pruned from hierarchies only when an
    /// extension filter narrows the file set.
    pub fn prunes_empty_folders(&self) -> bool {
        !self.folders_only && !self.extensions.is_empty()
    }
}
