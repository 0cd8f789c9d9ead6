use super::{CoreError, FileInfo, FileItem, ScanOptions};
use ignore::WalkBuilder;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

const PROGRESS_LOG_INTERVAL: usize = 500;

/// Walks a directory tree and collects the entries that pass the `ScanOptions`.
pub struct DirectoryScanner {
    options: ScanOptions,
}

impl DirectoryScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scans `root` without a way to cancel.
    pub fn scan(&self, root_path: &Path) -> Result<Vec<FileItem>, CoreError> {
        self.scan_with_cancel(root_path, &AtomicBool::new(false))
    }

    /// Scans `root`, checking `cancel_flag` before every entry.
    ///
    /// Every folder below the root that is not ignored is returned, together with
    /// every file accepted by the options. Ignored folders are never descended into.
    /// Entries are ordered depth-first, sorted by file name within a folder.
    pub fn scan_with_cancel(
        &self,
        root_path: &Path,
        cancel_flag: &AtomicBool,
    ) -> Result<Vec<FileItem>, CoreError> {
        if !root_path.is_dir() {
            return Err(CoreError::NotADirectory(root_path.to_path_buf()));
        }

        let folder_filter = self.options.clone();
        let mut builder = WalkBuilder::new(root_path);
        builder
            .standard_filters(false)
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir && entry.depth() > 0 && folder_filter.skips_folder(entry.path()))
            });

        let mut items = Vec::new();
        for result in builder.build() {
            if cancel_flag.load(Ordering::Relaxed) {
                tracing::info!("🛑 Scan cancelled after {} entries", items.len());
                return Err(CoreError::Cancelled);
            }

            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }

            // Links are followed, so these are the target's types. Anything
            // else (dangling links, sockets, fifos) is skipped.
            let is_directory = entry.file_type().is_some_and(|t| t.is_dir());
            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            if !is_directory && !is_file {
                tracing::debug!("Skipping non-regular entry {:?}", entry.path());
                continue;
            }
            if !is_directory {
                let name = entry.file_name().to_string_lossy();
                if !self.options.accepts_file(&name) {
                    continue;
                }
            }

            let size = if is_directory {
                0
            } else {
                entry.metadata().map(|m| m.len()).unwrap_or(0)
            };

            let path = entry.path();
            items.push(FileItem {
                path: path.to_path_buf(),
                is_directory,
                size,
                depth: entry.depth(),
                parent: path.parent().map(|p| p.to_path_buf()),
            });

            if items.len() % PROGRESS_LOG_INTERVAL == 0 {
                tracing::debug!("📂 Collected {} entries so far", items.len());
            }
        }

        tracing::info!(
            "✅ Scan of {:?} completed: {} entries",
            root_path,
            items.len()
        );
        Ok(items)
    }

    /// Lists files below `root`, or folders only in folders-only mode.
    ///
    /// A root that is itself ignored lists nothing.
    pub fn list_files(
        &self,
        root_path: &Path,
        cancel_flag: &AtomicBool,
    ) -> Result<Vec<FileInfo>, CoreError> {
        if !root_path.is_dir() {
            return Err(CoreError::NotADirectory(root_path.to_path_buf()));
        }
        if self.options.skips_folder(root_path) {
            tracing::info!("🚫 Root {:?} is an ignored folder, nothing to list", root_path);
            return Ok(Vec::new());
        }

        let folders_only = self.options.folders_only;
        let files = self
            .scan_with_cancel(root_path, cancel_flag)?
            .into_iter()
            .filter(|item| item.is_directory == folders_only)
            .map(FileInfo::from)
            .collect();
        Ok(files)
    }
}
