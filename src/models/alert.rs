//! Data models for alert signals.

use serde::{Deserialize, Serialize};

/// The output modality used to notify the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertChannel {
    /// A short synthesized tone.
    Tone,

    /// A spoken warning phrase.
    #[default]
    Speech,
}

/// A composed warning ready to be handed to an alert sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSignal {
    /// The warning text. Never empty when an alert has been authorized.
    pub text: String,

    /// The channel the warning should be emitted on.
    pub channel: AlertChannel,
}
