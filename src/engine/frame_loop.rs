//! The frame loop drives one pipeline iteration per display frame: it
//! requests detections from the model, filters them against the current
//! configuration, hands the qualifying subset to the alert manager, renders
//! the annotated preview, and reschedules itself until stopped.
//!
//! Everything here runs as one cooperative task. Configuration commands are
//! drained at tick boundaries only, so a filtering pass always sees a
//! consistent snapshot, and the snapshot is re-read after the model call
//! suspends rather than cached across it.

use std::time::Duration;

use chrono::Local;
use thiserror::Error;
use tokio::{sync::mpsc, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{
    config::MonitoringConfig,
    engine::{alert_manager::AlertManager, filtering},
    models::{ConfigCommand, StatusReport, Zone},
    providers::{
        Detector, DetectorError, PreviewError, PreviewSink, VideoSource, VideoSourceError,
    },
    render,
    status::StatusPublisher,
};

/// An error confined to a single frame.
///
/// Frame errors are absorbed by the loop: the iteration is abandoned, the
/// failure is logged at `debug`, and the next iteration is scheduled as
/// usual. A single bad frame never stops monitoring.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The video source failed to produce a frame.
    #[error("Video source error: {0}")]
    Video(#[from] VideoSourceError),

    /// The detection model call failed.
    #[error("Detector error: {0}")]
    Detector(#[from] DetectorError),

    /// The annotated frame could not be presented.
    #[error("Preview error: {0}")]
    Preview(#[from] PreviewError),
}

/// The scheduler at the center of the pipeline.
pub struct FrameLoop<D, V> {
    /// The external detection model.
    detector: D,

    /// The frame source. Released exactly once when the loop exits.
    video: V,

    /// The cooldown state machine alerts go through.
    alerts: AlertManager,

    /// The surface annotated frames are presented on.
    preview: Box<dyn PreviewSink>,

    /// The live monitoring configuration, mutated only between frames.
    config: MonitoringConfig,

    /// Incoming single-field configuration updates.
    commands: mpsc::Receiver<ConfigCommand>,

    /// The per-frame status line.
    status: StatusPublisher,

    /// Pacing between iterations.
    frame_interval: Duration,

    /// Cooperative stop signal shared with the supervisor.
    cancellation_token: CancellationToken,
}

impl<D: Detector, V: VideoSource> FrameLoop<D, V> {
    /// Creates a new frame loop over an already-acquired video source.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        detector: D,
        video: V,
        alerts: AlertManager,
        preview: Box<dyn PreviewSink>,
        config: MonitoringConfig,
        commands: mpsc::Receiver<ConfigCommand>,
        status: StatusPublisher,
        frame_interval: Duration,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            detector,
            video,
            alerts,
            preview,
            config,
            commands,
            status,
            frame_interval,
            cancellation_token,
        }
    }

    /// Runs iterations until cancelled, then releases the video source and
    /// reports the stopped state.
    ///
    /// Stopping is not retroactive: an iteration already past the
    /// cancellation check completes its draw, but no further iteration is
    /// scheduled.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.cancellation_token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            if let Err(e) = self.tick().await {
                tracing::debug!(error = %e, "Frame skipped; monitoring continues.");
            }
        }

        // Scoped release: the camera is let go on every exit path.
        self.video.release().await;
        self.status.publish(StatusReport::Stopped);
        tracing::info!("Frame loop stopped.");
    }

    /// One pipeline iteration.
    async fn tick(&mut self) -> Result<(), FrameError> {
        let frame = self.video.next_frame().await?;
        let detections = self.detector.detect(&frame).await?;

        if self.cancellation_token.is_cancelled() {
            // Monitoring stopped while the model call was in flight; the
            // result is discarded.
            return Ok(());
        }

        // Apply configuration changes that arrived during the suspension so
        // the filter reads the latest values, never a snapshot held across
        // the await.
        while let Ok(command) = self.commands.try_recv() {
            self.config.apply(command);
        }

        // Frame dimensions are read per frame; the capture format may change
        // mid-session.
        let (width, height) = (frame.width(), frame.height());
        let qualifying = filtering::qualify(&detections, width, height, &self.config);
        self.alerts.process(&qualifying, &self.config);

        let zone = Zone::from_margin(self.config.zone_margin, width, height);
        let mut canvas = frame.into_pixels();
        render::annotate(&mut canvas, &detections, &zone, Local::now());
        self.preview.present(&canvas).await?;

        self.status.publish(StatusReport::Frame {
            qualifying: qualifying.len(),
            threshold: self.config.confidence_threshold,
        });
        Ok(())
    }
}
