//! # Alert Dispatcher
//!
//! This module is responsible for emitting warnings through the configured
//! output channels. It is the boundary to the external audio/speech
//! collaborators: everything past [`AlertSink::emit`] is someone else's
//! hardware.
//!
//! ## Workflow
//!
//! 1. At startup each channel is bound to a sink: an external command when
//!    one is configured, standard output otherwise.
//! 2. When the alert manager authorizes an alert it hands the composed
//!    [`AlertSignal`] to [`AlertDispatcher::dispatch`].
//! 3. The dispatcher spawns the emission on its own task and returns
//!    immediately; playback is never awaited by the frame loop.
//! 4. Sink failures are logged at `warn` and dropped. A broken speaker must
//!    never stop monitoring.

use std::sync::Arc;

pub mod command;
pub mod error;
mod stdout;
mod traits;

use tokio::task::JoinHandle;

pub use command::CommandSink;
pub use stdout::StdoutSink;
pub use traits::AlertSink;

use crate::{
    config::AppConfig,
    models::{AlertChannel, AlertSignal},
};

/// A service that routes composed warnings to the sink bound to their
/// channel, fire-and-forget.
pub struct AlertDispatcher {
    tone: Arc<dyn AlertSink>,
    speech: Arc<dyn AlertSink>,
}

impl AlertDispatcher {
    /// Creates a dispatcher with explicit sinks per channel.
    pub fn new(tone: Arc<dyn AlertSink>, speech: Arc<dyn AlertSink>) -> Self {
        Self { tone, speech }
    }

    /// Creates a dispatcher from the application configuration, binding each
    /// channel to its external command when one is configured and to stdout
    /// otherwise.
    pub fn from_config(config: &AppConfig) -> Self {
        let tone: Arc<dyn AlertSink> = match &config.tone_command {
            Some(spec) => Arc::new(CommandSink::new(spec.clone())),
            None => Arc::new(StdoutSink),
        };
        let speech: Arc<dyn AlertSink> = match &config.speech_command {
            Some(spec) => Arc::new(CommandSink::new(spec.clone())),
            None => Arc::new(StdoutSink),
        };
        Self::new(tone, speech)
    }

    /// Emits the signal on its channel without waiting for playback to
    /// finish. The returned handle is only useful to callers that want to
    /// observe completion (e.g. the test-alert command); the frame loop
    /// drops it.
    pub fn dispatch(&self, signal: AlertSignal) -> JoinHandle<()> {
        let sink = match signal.channel {
            AlertChannel::Tone => Arc::clone(&self.tone),
            AlertChannel::Speech => Arc::clone(&self.speech),
        };
        tokio::spawn(async move {
            if let Err(e) = sink.emit(&signal.text).await {
                tracing::warn!(error = %e, "Failed to emit alert; dropping it.");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::actions::error::AlertDispatchError;

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl AlertSink for RecordingSink {
        async fn emit(&self, text: &str) -> Result<(), AlertDispatchError> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn dispatch_routes_by_channel() {
        let tone = Arc::new(RecordingSink::default());
        let speech = Arc::new(RecordingSink::default());
        let dispatcher =
            AlertDispatcher::new(Arc::clone(&tone) as Arc<dyn AlertSink>, Arc::clone(&speech) as _);

        dispatcher
            .dispatch(AlertSignal { text: "警告".into(), channel: AlertChannel::Speech })
            .await
            .unwrap();

        assert!(tone.sent.lock().unwrap().is_empty());
        assert_eq!(speech.sent.lock().unwrap().as_slice(), ["警告"]);
    }

    #[tokio::test]
    async fn dispatch_swallows_sink_failures() {
        struct FailingSink;

        #[async_trait::async_trait]
        impl AlertSink for FailingSink {
            async fn emit(&self, _text: &str) -> Result<(), AlertDispatchError> {
                Err(AlertDispatchError::Command(std::io::Error::other("no audio device")))
            }
        }

        let dispatcher = AlertDispatcher::new(Arc::new(FailingSink), Arc::new(FailingSink));
        let handle =
            dispatcher.dispatch(AlertSignal { text: "警告".into(), channel: AlertChannel::Tone });

        // The task completes despite the sink failure.
        assert!(handle.await.is_ok());
    }
}
