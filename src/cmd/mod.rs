//! CLI subcommand implementations and the interactive control console.

pub mod console;
pub mod test_alert;

pub use console::{ConsoleInput, parse_line, run_console};
pub use test_alert::{TestAlertArgs, execute as test_alert};
