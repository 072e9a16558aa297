//! Error types for alert dispatch.

use thiserror::Error;

/// Errors that can occur while emitting an alert.
///
/// These never propagate past the dispatcher: an alert that cannot be played
/// is logged and dropped, and the frame loop keeps running.
#[derive(Debug, Error)]
pub enum AlertDispatchError {
    /// The external playback command could not be spawned or failed.
    #[error("Alert command failed: {0}")]
    Command(#[from] std::io::Error),

    /// The external playback command exited with a failure status.
    #[error("Alert command exited with status {0}")]
    CommandStatus(std::process::ExitStatus),
}
