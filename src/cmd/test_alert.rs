//! The `test-alert` subcommand: plays a test utterance through the
//! configured alert channel so the output path can be checked before
//! monitoring starts.

use clap::Args;

use crate::{
    actions::AlertDispatcher,
    config::AppConfig,
    models::AlertSignal,
};

/// The fixed test utterance.
const TEST_UTTERANCE: &str = "テスト: 警告ボイスの確認です";

/// Arguments for the `test-alert` subcommand.
#[derive(Args, Debug)]
pub struct TestAlertArgs {
    /// Directory holding app.yaml. Defaults to `configs`.
    #[arg(long)]
    pub config_dir: Option<String>,
}

/// Executes the test alert.
pub async fn execute(args: TestAlertArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::new(args.config_dir.as_deref())?;
    let dispatcher = AlertDispatcher::from_config(&config);
    let handle = dispatcher.dispatch(AlertSignal {
        text: TEST_UTTERANCE.to_string(),
        channel: config.monitoring.alert_channel,
    });
    // Unlike the frame loop we wait here, so the process does not exit
    // before the utterance is handed off.
    let _ = handle.await;
    Ok(())
}
