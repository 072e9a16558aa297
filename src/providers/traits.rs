//! This module defines the interfaces for the external collaborators of the
//! pipeline: the detection model, the video source, and the preview surface.

use async_trait::async_trait;
use image::RgbImage;
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Detection, Frame};

/// Camera facing preference forwarded to the video source on acquisition.
/// Sources that have no notion of facing (files, synthetic frames) ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CameraFacing {
    /// The rear, outward-facing camera.
    #[default]
    Environment,

    /// The front, user-facing camera.
    User,
}

/// Custom error type for detector operations.
#[derive(Error, Debug)]
pub enum DetectorError {
    /// The model descriptor could not be read.
    #[error("Failed to read model descriptor: {0}")]
    Descriptor(#[from] std::io::Error),

    /// The model descriptor could not be parsed.
    #[error("Failed to parse model descriptor: {0}")]
    Parse(#[from] serde_json::Error),

    /// A single inference call failed.
    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Custom error type for video source operations.
#[derive(Error, Debug)]
pub enum VideoSourceError {
    /// The source could not be opened.
    #[error("Failed to open video source: {0}")]
    Io(#[from] std::io::Error),

    /// A frame image could not be decoded.
    #[error("Failed to decode frame: {0}")]
    Decode(#[from] image::ImageError),

    /// The source directory contains no frames.
    #[error("No frames found in {0}")]
    Empty(String),

    /// A frame was requested before the source was acquired.
    #[error("Video source not acquired")]
    NotAcquired,
}

/// Custom error type for preview presentation.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// The annotated frame could not be written out.
    #[error("Failed to write preview frame: {0}")]
    Write(#[from] image::ImageError),
}

/// A trait for the external detection model.
///
/// The model is a black box: it is loaded once from a local descriptor before
/// monitoring starts, and then queried once per frame. The call may suspend.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Detector: Send + Sync {
    /// Runs the model over one frame and returns its raw detections.
    async fn detect(&self, frame: &Frame) -> Result<Vec<Detection>, DetectorError>;
}

/// A trait for a source of video frames.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Acquires the underlying device or stream. May suspend and may fail
    /// (e.g. permission denied); a failure here prevents monitoring from
    /// starting.
    async fn acquire(&mut self, facing: CameraFacing) -> Result<(), VideoSourceError>;

    /// Produces the next frame. Frame dimensions may change mid-session if
    /// the capture format changes.
    async fn next_frame(&mut self) -> Result<Frame, VideoSourceError>;

    /// Stops the underlying tracks and clears the source. Called exactly once
    /// when monitoring stops, on every exit path.
    async fn release(&mut self);
}

/// A trait for the surface the annotated preview is presented on.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PreviewSink: Send + Sync {
    /// Presents one annotated frame.
    async fn present(&mut self, frame: &RgbImage) -> Result<(), PreviewError>;
}
