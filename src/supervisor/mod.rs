//! The Supervisor module manages the lifecycle of the banken application.
//!
//! This module implements the **Supervisor Pattern**: the supervisor is the
//! top-level owner of the pipeline components (detector, video source,
//! alert dispatcher, preview sink) and of the tasks they run on.
//!
//! ## Responsibilities
//!
//! - **Initialization**: the `SupervisorBuilder` wires all components
//!   together, deriving the preview and alert sinks from configuration.
//! - **Acquisition**: the camera is acquired before the frame loop starts;
//!   an acquisition failure is surfaced and leaves the system stopped.
//! - **Lifecycle management**: the frame loop and the clock run as
//!   supervised tasks; a shutdown signal (Ctrl+C, SIGTERM, or the `stop`
//!   console command) cancels them cooperatively.
//! - **Graceful shutdown**: supervised tasks get `shutdown_timeout` to
//!   finish (the frame loop uses that window to release the camera) and
//!   are aborted only if they overstay it.

mod builder;

use std::sync::Arc;

pub use builder::SupervisorBuilder;
use thiserror::Error;
use tokio::{
    signal,
    sync::{mpsc, watch},
};
use tokio_util::sync::CancellationToken;

use crate::{
    actions::AlertDispatcher,
    config::AppConfig,
    engine::{alert_manager::AlertManager, frame_loop::FrameLoop},
    models::{ConfigCommand, StatusReport},
    providers::{Detector, DetectorError, PreviewSink, VideoSource, VideoSourceError},
    status::{self, StatusPublisher},
};

/// Represents the set of errors that can occur during the supervisor's
/// operation.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// A required configuration was not provided to the `SupervisorBuilder`.
    #[error("Missing configuration for Supervisor")]
    MissingConfig,

    /// A detector was not provided to the `SupervisorBuilder`.
    #[error("Missing detector for Supervisor")]
    MissingDetector,

    /// A video source was not provided to the `SupervisorBuilder`.
    #[error("Missing video source for Supervisor")]
    MissingVideoSource,

    /// The detection model failed to load.
    #[error("Failed to load detection model: {0}")]
    ModelLoad(#[from] DetectorError),

    /// The video source failed to acquire.
    #[error("Failed to acquire video source: {0}")]
    Acquisition(#[from] VideoSourceError),
}

/// The primary runtime manager for the application.
///
/// The Supervisor owns all the major components and is responsible for their
/// startup, shutdown, and health monitoring. Once `run` is called, it becomes
/// the main process loop for the entire application.
pub struct Supervisor<D, V> {
    /// Shared application configuration.
    config: Arc<AppConfig>,

    /// The already-loaded detection model.
    detector: D,

    /// The not-yet-acquired video source.
    video_source: V,

    /// The surface annotated frames are presented on.
    preview: Box<dyn PreviewSink>,

    /// The dispatcher warnings are handed to.
    dispatcher: Arc<AlertDispatcher>,

    /// Sending half of the configuration command channel, handed to the
    /// control surface.
    commands_tx: mpsc::Sender<ConfigCommand>,

    /// Receiving half, moved into the frame loop on start.
    commands_rx: mpsc::Receiver<ConfigCommand>,

    /// The per-frame status line.
    status: StatusPublisher,

    /// Reading half of the status line.
    status_rx: watch::Receiver<StatusReport>,

    /// Writing half of the clock readout.
    clock_tx: watch::Sender<String>,

    /// Reading half of the clock readout.
    clock_rx: watch::Receiver<String>,

    /// A token used to signal a graceful shutdown to all supervised tasks.
    cancellation_token: CancellationToken,

    /// A set of all spawned tasks that the supervisor is actively managing.
    join_set: tokio::task::JoinSet<()>,
}

impl<D: Detector + 'static, V: VideoSource + 'static> Supervisor<D, V> {
    /// Creates a new Supervisor instance with all its required components.
    ///
    /// This is typically called by the `SupervisorBuilder` after it has
    /// assembled all the necessary dependencies.
    pub fn new(
        config: AppConfig,
        detector: D,
        video_source: V,
        preview: Box<dyn PreviewSink>,
        dispatcher: Arc<AlertDispatcher>,
    ) -> Self {
        let (commands_tx, commands_rx) =
            mpsc::channel(config.command_channel_capacity.max(1) as usize);
        let (status, status_rx) = status::status_channel();
        let (clock_tx, clock_rx) = status::clock_channel();
        Self {
            config: Arc::new(config),
            detector,
            video_source,
            preview,
            dispatcher,
            commands_tx,
            commands_rx,
            status,
            status_rx,
            clock_tx,
            clock_rx,
            cancellation_token: CancellationToken::new(),
            join_set: tokio::task::JoinSet::new(),
        }
    }

    /// Returns a new `SupervisorBuilder` instance.
    ///
    /// This is the public entry point for creating a supervisor.
    pub fn builder() -> SupervisorBuilder<D, V> {
        SupervisorBuilder::new()
    }

    /// A sender for configuration commands; the control surface's half of
    /// the boundary.
    pub fn command_sender(&self) -> mpsc::Sender<ConfigCommand> {
        self.commands_tx.clone()
    }

    /// The status line readout.
    pub fn status_receiver(&self) -> watch::Receiver<StatusReport> {
        self.status_rx.clone()
    }

    /// The clock readout, refreshed once per second while running.
    pub fn clock_receiver(&self) -> watch::Receiver<String> {
        self.clock_rx.clone()
    }

    /// The token cancelling this supervisor's tasks. The `stop` console
    /// command cancels it directly.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Starts the supervisor and all its managed services.
    ///
    /// This method is the main entry point for the application's runtime. It
    /// acquires the camera, spawns the signal handler, clock, and frame loop
    /// tasks, then supervises them until shutdown. An acquisition failure is
    /// reported on the status surface and returned; the system stays
    /// stopped.
    pub async fn run(mut self) -> Result<(), SupervisorError> {
        // Spawn a task to listen for shutdown signals.
        let cancellation_token = self.cancellation_token.clone();
        self.join_set.spawn(async move {
            let ctrl_c = signal::ctrl_c();
            #[cfg(unix)]
            let terminate = async {
                signal::unix::signal(signal::unix::SignalKind::terminate())
                    .expect("Failed to register SIGTERM handler")
                    .recv()
                    .await;
            };
            #[cfg(not(unix))]
            let terminate = std::future::pending::<()>();

            tokio::select! {
                _ = ctrl_c => tracing::info!("SIGINT (Ctrl+C) received, initiating graceful shutdown."),
                _ = terminate => tracing::info!("SIGTERM received, initiating graceful shutdown."),
                _ = cancellation_token.cancelled() => {}
            }

            // Notify all other tasks to begin shutting down.
            cancellation_token.cancel();
        });

        // --- Acquisition ---

        self.status.publish(StatusReport::AcquiringCamera);
        if let Err(e) = self.video_source.acquire(self.config.camera_facing).await {
            tracing::error!(error = %e, "Failed to acquire video source.");
            self.status.publish(StatusReport::Error(e.to_string()));
            self.cancellation_token.cancel();
            self.join_set.shutdown().await;
            self.status.publish(StatusReport::Stopped);
            return Err(e.into());
        }

        // --- Task spawning ---

        // The clock readout refreshes independently of the frame loop.
        let clock_interval = self.config.clock_interval;
        let clock_token = self.cancellation_token.clone();
        let clock = status::run_clock(self.clock_tx, clock_interval, clock_token);
        self.join_set.spawn(clock);

        let frame_loop = FrameLoop::new(
            self.detector,
            self.video_source,
            AlertManager::new(Arc::clone(&self.dispatcher)),
            self.preview,
            self.config.monitoring.clone(),
            self.commands_rx,
            self.status.clone(),
            self.config.frame_interval,
            self.cancellation_token.clone(),
        );
        self.status.publish(StatusReport::Running);
        tracing::info!("Monitoring started.");
        self.join_set.spawn(frame_loop.run());

        // --- Main supervisor loop ---

        loop {
            tokio::select! {
                maybe_result = self.join_set.join_next() => {
                    match maybe_result {
                        Some(Ok(_)) => {
                            // Task completed, continue monitoring the rest.
                        }
                        Some(Err(e)) => {
                            tracing::error!("A supervised task failed: {:?}. Initiating shutdown.", e);
                            self.cancellation_token.cancel();
                        }
                        None => break,
                    }
                }
                _ = self.cancellation_token.cancelled() => break,
            }
        }

        // --- Graceful shutdown ---

        // Give the remaining tasks the shutdown window; the frame loop uses
        // it to finish its in-flight draw and release the camera.
        let shutdown_timeout = self.config.shutdown_timeout;
        let drain = async {
            while self.join_set.join_next().await.is_some() {}
        };
        if tokio::time::timeout(shutdown_timeout, drain).await.is_err() {
            tracing::warn!("Tasks did not stop within {:?}; aborting them.", shutdown_timeout);
            self.join_set.shutdown().await;
        }

        tracing::info!("Supervisor shutdown complete.");
        Ok(())
    }
}
