//! A detector implementation that replays recorded detections.

use std::{
    path::Path,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use serde::Deserialize;

use super::traits::{Detector, DetectorError};
use crate::models::{Detection, Frame};

/// The on-disk model descriptor: a list of per-frame detection lists.
#[derive(Debug, Deserialize)]
struct ReplayDescriptor {
    frames: Vec<Vec<Detection>>,
}

/// A [`Detector`] that cycles through detection lists recorded in a local
/// JSON descriptor, one list per frame.
///
/// This stands in for a real vision model behind the same trait boundary:
/// loading happens once before monitoring starts and load failures surface
/// as acquisition errors.
pub struct ReplayDetector {
    frames: Vec<Vec<Detection>>,
    cursor: AtomicUsize,
}

impl ReplayDetector {
    /// Loads the descriptor from disk. Fails if the file cannot be read or
    /// parsed; such a failure must prevent monitoring from starting.
    pub fn load(path: &Path) -> Result<Self, DetectorError> {
        let raw = std::fs::read_to_string(path)?;
        let descriptor: ReplayDescriptor = serde_json::from_str(&raw)?;
        Ok(Self { frames: descriptor.frames, cursor: AtomicUsize::new(0) })
    }

    /// Builds a detector directly from per-frame detection lists.
    pub fn from_frames(frames: Vec<Vec<Detection>>) -> Self {
        Self { frames, cursor: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl Detector for ReplayDetector {
    async fn detect(&self, _frame: &Frame) -> Result<Vec<Detection>, DetectorError> {
        if self.frames.is_empty() {
            return Ok(Vec::new());
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.frames.len();
        Ok(self.frames[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use image::RgbImage;

    use super::*;
    use crate::models::BoundingBox;

    fn blank_frame() -> Frame {
        Frame::new(RgbImage::new(4, 4))
    }

    #[tokio::test]
    async fn cycles_through_recorded_frames() {
        let detector = ReplayDetector::from_frames(vec![
            vec![Detection::new("person", 0.9, BoundingBox::new(0.0, 0.0, 10.0, 10.0))],
            vec![],
        ]);

        let first = detector.detect(&blank_frame()).await.unwrap();
        assert_eq!(first.len(), 1);
        let second = detector.detect(&blank_frame()).await.unwrap();
        assert!(second.is_empty());
        let third = detector.detect(&blank_frame()).await.unwrap();
        assert_eq!(third, first);
    }

    #[tokio::test]
    async fn loads_descriptor_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"frames": [[{{"label": "cat", "confidence": 0.7,
                "bbox": {{"x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0}}}}]]}}"#
        )
        .unwrap();

        let detector = ReplayDetector::load(file.path()).unwrap();
        let detections = detector.detect(&blank_frame()).await.unwrap();
        assert_eq!(detections[0].label, "cat");
    }

    #[test]
    fn load_surfaces_missing_descriptor() {
        let result = ReplayDetector::load(Path::new("/nonexistent/model.json"));
        assert!(matches!(result, Err(DetectorError::Descriptor(_))));
    }

    #[test]
    fn load_surfaces_malformed_descriptor() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = ReplayDetector::load(file.path());
        assert!(matches!(result, Err(DetectorError::Parse(_))));
    }
}
