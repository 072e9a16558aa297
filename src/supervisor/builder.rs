//! This module provides the `SupervisorBuilder` for constructing a `Supervisor`.

use std::sync::Arc;

use crate::{
    actions::AlertDispatcher,
    config::AppConfig,
    providers::{Detector, FilePreview, NullPreview, PreviewSink, VideoSource},
};

use super::{Supervisor, SupervisorError};

/// A builder for creating a `Supervisor` instance.
pub struct SupervisorBuilder<D, V> {
    config: Option<AppConfig>,
    detector: Option<D>,
    video_source: Option<V>,
    preview: Option<Box<dyn PreviewSink>>,
    dispatcher: Option<Arc<AlertDispatcher>>,
}

impl<D, V> Default for SupervisorBuilder<D, V> {
    fn default() -> Self {
        Self { config: None, detector: None, video_source: None, preview: None, dispatcher: None }
    }
}

impl<D: Detector + 'static, V: VideoSource + 'static> SupervisorBuilder<D, V> {
    /// Creates a new, empty `SupervisorBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the application configuration for the `Supervisor`.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the already-loaded detection model.
    pub fn detector(mut self, detector: D) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Sets the video source. Acquisition happens when the supervisor runs.
    pub fn video_source(mut self, video_source: V) -> Self {
        self.video_source = Some(video_source);
        self
    }

    /// Overrides the preview sink derived from the configuration.
    pub fn preview(mut self, preview: Box<dyn PreviewSink>) -> Self {
        self.preview = Some(preview);
        self
    }

    /// Overrides the alert dispatcher derived from the configuration.
    pub fn dispatcher(mut self, dispatcher: Arc<AlertDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Assembles and validates the components to build a `Supervisor`.
    ///
    /// Sinks not provided explicitly are derived from the configuration: the
    /// preview writes to `preview_path` when one is set and is discarded
    /// otherwise, and the alert channels bind to their configured external
    /// commands.
    pub fn build(self) -> Result<Supervisor<D, V>, SupervisorError> {
        let config = self.config.ok_or(SupervisorError::MissingConfig)?;
        let detector = self.detector.ok_or(SupervisorError::MissingDetector)?;
        let video_source = self.video_source.ok_or(SupervisorError::MissingVideoSource)?;

        let preview = self.preview.unwrap_or_else(|| match &config.preview_path {
            Some(path) => Box::new(FilePreview::new(path)),
            None => Box::new(NullPreview),
        });
        let dispatcher =
            self.dispatcher.unwrap_or_else(|| Arc::new(AlertDispatcher::from_config(&config)));

        Ok(Supervisor::new(config, detector, video_source, preview, dispatcher))
    }
}
