use crate::actions::error::AlertDispatchError;

#[cfg(test)]
use mockall::automock;

/// A trait representing one alert output channel (a tone player, a speech
/// synthesizer, a terminal).
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait AlertSink: Send + Sync {
    /// Emits the warning text on this channel.
    async fn emit(&self, text: &str) -> Result<(), AlertDispatchError>;
}
