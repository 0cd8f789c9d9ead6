//! The typed command surface between the UI layer and the filesystem work.
//!
//! Each operation has its own request and response type and fails with
//! [`BackendError`]. Directory walks run on the blocking thread pool.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{settings, AppConfig};
use crate::core::{CoreError, DirectoryScanner, FileHandler, FileInfo, ScanOptions, TreeGenerator};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl BackendError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, BackendError::Core(CoreError::Cancelled))
    }
}

/// The folder to scan and the raw filter inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub folder_path: PathBuf,
    pub extension: String,
    pub ignored_extensions: String,
    pub ignored_folders: Vec<String>,
    pub folders_only: bool,
}

impl ScanRequest {
    pub fn options(&self) -> ScanOptions {
        ScanOptions::from_raw(
            &self.extension,
            &self.ignored_extensions,
            &self.ignored_folders,
            self.folders_only,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub content: String,
    pub output_dir: PathBuf,
    pub filename: String,
}

/// One method per command the UI can issue against the filesystem.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_files(
        &self,
        request: ScanRequest,
        cancel_flag: Arc<AtomicBool>,
    ) -> Result<Vec<FileInfo>, BackendError>;

    async fn get_hierarchy(
        &self,
        request: ScanRequest,
        cancel_flag: Arc<AtomicBool>,
    ) -> Result<String, BackendError>;

    async fn save_to_file(&self, request: SaveRequest) -> Result<PathBuf, BackendError>;

    async fn load_config(&self) -> Result<AppConfig, BackendError>;

    async fn save_config(&self, config: AppConfig) -> Result<(), BackendError>;
}

/// The production backend working on the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct NativeBackend {
    config_dir: Option<PathBuf>,
}

impl NativeBackend {
    /// A backend that keeps its configuration in `dir` instead of the platform directory.
    pub fn with_config_dir(dir: PathBuf) -> Self {
        Self {
            config_dir: Some(dir),
        }
    }
}

#[async_trait]
impl Backend for NativeBackend {
    async fn list_files(
        &self,
        request: ScanRequest,
        cancel_flag: Arc<AtomicBool>,
    ) -> Result<Vec<FileInfo>, BackendError> {
        tracing::info!("Listing files in {:?}", request.folder_path);
        let files = tokio::task::spawn_blocking(move || {
            DirectoryScanner::new(request.options()).list_files(&request.folder_path, &cancel_flag)
        })
        .await
        .map_err(CoreError::from)??;
        Ok(files)
    }

    async fn get_hierarchy(
        &self,
        request: ScanRequest,
        cancel_flag: Arc<AtomicBool>,
    ) -> Result<String, BackendError> {
        tracing::info!("Building hierarchy of {:?}", request.folder_path);
        let hierarchy = tokio::task::spawn_blocking(move || {
            let options = request.options();
            let items = DirectoryScanner::new(options.clone())
                .scan_with_cancel(&request.folder_path, &cancel_flag)?;
            Ok::<_, CoreError>(TreeGenerator::generate(
                &items,
                &request.folder_path,
                &options,
            ))
        })
        .await
        .map_err(CoreError::from)??;
        Ok(hierarchy)
    }

    async fn save_to_file(&self, request: SaveRequest) -> Result<PathBuf, BackendError> {
        let path = tokio::task::spawn_blocking(move || {
            FileHandler::save_to_file(&request.content, &request.output_dir, &request.filename)
        })
        .await
        .map_err(CoreError::from)??;
        Ok(path)
    }

    async fn load_config(&self) -> Result<AppConfig, BackendError> {
        Ok(settings::load_config(self.config_dir.as_deref())?)
    }

    async fn save_config(&self, config: AppConfig) -> Result<(), BackendError> {
        settings::save_config(&config, self.config_dir.as_deref())?;
        Ok(())
    }
}
