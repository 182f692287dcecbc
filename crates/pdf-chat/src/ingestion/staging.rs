//! Scoped temporary storage for uploaded PDFs

use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::Result;

/// An upload written to a uniquely named `.pdf` temp file. The file is
/// removed when the guard is dropped, whatever path the request took.
/// Removal failures are logged and never surface to the caller.
pub struct StagedPdf {
    file: Option<NamedTempFile>,
}

impl StagedPdf {
    /// Write `data` to a new temp file, inside `dir` when given
    pub async fn write(data: &[u8], dir: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("upload-").suffix(".pdf");
        let file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        // Guard first, so a failed write still cleans up
        let staged = Self { file: Some(file) };
        tokio::fs::write(staged.path(), data).await?;

        tracing::info!("File saved temporarily at: {}", staged.path().display());
        Ok(staged)
    }

    /// Location of the staged file
    pub fn path(&self) -> &Path {
        match &self.file {
            Some(file) => file.path(),
            None => Path::new(""),
        }
    }
}

impl Drop for StagedPdf {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let path = file.path().to_path_buf();
            match file.close() {
                Ok(()) => tracing::info!("Temporary file cleaned up"),
                Err(e) => tracing::error!(
                    "Error cleaning up temporary file {}: {}",
                    path.display(),
                    e
                ),
            }
        }
    }
}
