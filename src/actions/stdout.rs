use crate::actions::{error::AlertDispatchError, traits::AlertSink};

/// An alert sink that prints the warning to standard output.
///
/// The default sink for channels with no external command configured; it
/// keeps the pipeline observable on machines without audio hardware.
pub struct StdoutSink;

#[async_trait::async_trait]
impl AlertSink for StdoutSink {
    async fn emit(&self, text: &str) -> Result<(), AlertDispatchError> {
        println!("[警告] {}", text);
        Ok(())
    }
}
