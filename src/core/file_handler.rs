use std::fs;
use std::path::{Path, PathBuf};

use super::CoreError;

pub struct FileHandler;

impl FileHandler {
    /// Writes `content` to `output_dir/filename` and returns the full path written.
    pub fn save_to_file(
        content: &str,
        output_dir: &Path,
        filename: &str,
    ) -> Result<PathBuf, CoreError> {
        if !output_dir.is_dir() {
            return Err(CoreError::NotADirectory(output_dir.to_path_buf()));
        }

        let file_path = output_dir.join(filename);
        fs::write(&file_path, content).map_err(|e| CoreError::Io(e, file_path.clone()))?;

        tracing::info!(
            "Saved {} bytes of console output to {:?}",
            content.len(),
            file_path
        );
        Ok(file_path)
    }
}
