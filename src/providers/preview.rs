//! Preview sink implementations.

use std::path::PathBuf;

use async_trait::async_trait;
use image::RgbImage;

use super::traits::{PreviewError, PreviewSink};

/// A [`PreviewSink`] that writes the latest annotated frame to a file.
/// The image format follows the file extension.
pub struct FilePreview {
    path: PathBuf,
}

impl FilePreview {
    /// Creates a preview sink writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PreviewSink for FilePreview {
    async fn present(&mut self, frame: &RgbImage) -> Result<(), PreviewError> {
        frame.save(&self.path)?;
        Ok(())
    }
}

/// A [`PreviewSink`] that discards frames.
pub struct NullPreview;

#[async_trait]
impl PreviewSink for NullPreview {
    async fn present(&mut self, _frame: &RgbImage) -> Result<(), PreviewError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_preview_writes_the_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.png");
        let mut sink = FilePreview::new(&path);
        sink.present(&RgbImage::new(16, 16)).await.unwrap();
        assert!(path.exists());
    }
}
