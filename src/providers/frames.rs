//! Frame source implementations.

use std::path::PathBuf;

use async_trait::async_trait;
use image::{Rgb, RgbImage};

use super::traits::{CameraFacing, VideoSource, VideoSourceError};
use crate::models::Frame;

/// A [`VideoSource`] producing solid dark frames of a fixed size.
///
/// Useful whenever the pipeline should run without a capture device: the
/// renderer still has a surface to annotate and the detector still gets a
/// frame per tick.
pub struct SyntheticSource {
    width: u32,
    height: u32,
    acquired: bool,
}

impl SyntheticSource {
    /// Creates a synthetic source with the given frame dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, acquired: false }
    }
}

#[async_trait]
impl VideoSource for SyntheticSource {
    async fn acquire(&mut self, _facing: CameraFacing) -> Result<(), VideoSourceError> {
        self.acquired = true;
        Ok(())
    }

    async fn next_frame(&mut self) -> Result<Frame, VideoSourceError> {
        if !self.acquired {
            return Err(VideoSourceError::NotAcquired);
        }
        Ok(Frame::new(RgbImage::from_pixel(self.width, self.height, Rgb([24, 24, 24]))))
    }

    async fn release(&mut self) {
        self.acquired = false;
    }
}

/// A [`VideoSource`] that cycles through the images of a directory in
/// lexical order, looping at the end.
pub struct ImageDirSource {
    dir: PathBuf,
    paths: Vec<PathBuf>,
    cursor: usize,
}

impl ImageDirSource {
    /// Creates a source over the given directory. The directory is scanned
    /// on acquisition.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), paths: Vec::new(), cursor: 0 }
    }
}

#[async_trait]
impl VideoSource for ImageDirSource {
    async fn acquire(&mut self, _facing: CameraFacing) -> Result<(), VideoSourceError> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();
        if paths.is_empty() {
            return Err(VideoSourceError::Empty(self.dir.display().to_string()));
        }
        self.paths = paths;
        self.cursor = 0;
        Ok(())
    }

    async fn next_frame(&mut self) -> Result<Frame, VideoSourceError> {
        if self.paths.is_empty() {
            return Err(VideoSourceError::NotAcquired);
        }
        let path = &self.paths[self.cursor % self.paths.len()];
        self.cursor += 1;
        let pixels = image::open(path)?.to_rgb8();
        Ok(Frame::new(pixels))
    }

    async fn release(&mut self) {
        self.paths.clear();
        self.cursor = 0;
    }
}
