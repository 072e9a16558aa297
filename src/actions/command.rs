//! The external-command alert sink.

use tokio::process::Command;

use crate::{
    actions::{error::AlertDispatchError, traits::AlertSink},
    config::CommandSpec,
};

/// An alert sink that hands the warning text to an external command, e.g. a
/// TTS engine for the speech channel or a tone player for the tone channel.
///
/// The text is appended as the final argument. The child is awaited only to
/// reap it; playback length does not affect the caller because the dispatcher
/// already runs sinks on their own task.
pub struct CommandSink {
    spec: CommandSpec,
}

impl CommandSink {
    /// Creates a sink spawning the given command.
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }
}

#[async_trait::async_trait]
impl AlertSink for CommandSink {
    async fn emit(&self, text: &str) -> Result<(), AlertDispatchError> {
        let status = Command::new(&self.spec.program)
            .args(&self.spec.args)
            .arg(text)
            .stdin(std::process::Stdio::null())
            .status()
            .await?;
        if !status.success() {
            return Err(AlertDispatchError::CommandStatus(status));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emit_runs_the_configured_command() {
        let sink = CommandSink::new(CommandSpec { program: "true".into(), args: vec![] });
        assert!(sink.emit("テスト").await.is_ok());
    }

    #[tokio::test]
    async fn emit_surfaces_command_failure() {
        let sink = CommandSink::new(CommandSpec { program: "false".into(), args: vec![] });
        assert!(matches!(
            sink.emit("テスト").await,
            Err(AlertDispatchError::CommandStatus(_))
        ));
    }

    #[tokio::test]
    async fn emit_surfaces_missing_program() {
        let sink = CommandSink::new(CommandSpec {
            program: "/nonexistent/banken-tts".into(),
            args: vec![],
        });
        assert!(matches!(sink.emit("テスト").await, Err(AlertDispatchError::Command(_))));
    }
}
