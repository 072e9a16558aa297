//! The status surface: a per-frame status line and a once-per-second clock
//! readout, both published over watch channels so any number of consumers
//! (terminal printer, tests) can observe the latest value.

use std::time::Duration;

use chrono::Local;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::models::StatusReport;

/// The writing half of the status surface. Cheap to clone; every clone
/// publishes to the same readout.
#[derive(Clone)]
pub struct StatusPublisher {
    tx: std::sync::Arc<watch::Sender<StatusReport>>,
}

impl StatusPublisher {
    /// Publishes a new status, replacing the previous one.
    pub fn publish(&self, report: StatusReport) {
        self.tx.send_replace(report);
    }
}

/// Creates the status channel, initially [`StatusReport::Stopped`].
pub fn status_channel() -> (StatusPublisher, watch::Receiver<StatusReport>) {
    let (tx, rx) = watch::channel(StatusReport::Stopped);
    (StatusPublisher { tx: std::sync::Arc::new(tx) }, rx)
}

/// Formats an instant for the clock readout and the timestamp overlay.
pub fn format_clock(now: chrono::DateTime<Local>) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Creates the clock channel, pre-filled with the current time.
pub fn clock_channel() -> (watch::Sender<String>, watch::Receiver<String>) {
    watch::channel(format_clock(Local::now()))
}

/// Refreshes the clock readout on a fixed interval, independent of the frame
/// loop, until cancelled.
pub async fn run_clock(
    tx: watch::Sender<String>,
    interval: Duration,
    cancellation_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = cancellation_token.cancelled() => break,
            _ = ticker.tick() => {
                tx.send_replace(format_clock(Local::now()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_format_is_24_hour_local() {
        let stamp = chrono::DateTime::parse_from_rfc3339("2025-01-02T15:04:05+09:00")
            .unwrap()
            .with_timezone(&Local);
        let formatted = format_clock(stamp);
        assert_eq!(formatted.len(), 19);
        assert_eq!(&formatted[4..5], "-");
        assert_eq!(&formatted[13..14], ":");
    }

    #[tokio::test]
    async fn publisher_replaces_the_visible_report() {
        let (publisher, rx) = status_channel();
        assert_eq!(*rx.borrow(), StatusReport::Stopped);
        publisher.publish(StatusReport::Running);
        assert_eq!(*rx.borrow(), StatusReport::Running);
    }
}
