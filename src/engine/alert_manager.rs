//! Alert management module

use std::{sync::Arc, time::Duration};

use tokio::time::Instant;

use crate::{
    actions::AlertDispatcher,
    config::MonitoringConfig,
    models::{AlertSignal, Detection},
};

/// The floor under the configured cooldown. Alerts are never emitted more
/// than once a second, whatever the configuration asks for.
pub const MIN_COOLDOWN: Duration = Duration::from_secs(1);

/// The built-in warning phrase used when no custom phrase is configured.
pub const DEFAULT_WARNING_TEXT: &str = "警告：ここは立入禁止です。直ちに立ち去ってください。";

/// The AlertManager decides, once per frame, whether the qualifying subset
/// warrants an alert right now, composes the warning text, and hands it to
/// the dispatcher.
///
/// It is a two-state machine (idle, or cooling after a fired alert) tracked
/// entirely through the timestamp of the last alert. The cooldown is
/// wall-clock based, so frame-rate variation does not affect it, and it does
/// not reset on frames with no qualifying detections.
pub struct AlertManager {
    /// The dispatcher alerts are handed to, fire-and-forget.
    dispatcher: Arc<AlertDispatcher>,

    /// When the last alert fired. `None` until the first alert of the
    /// process lifetime.
    last_alert: Option<Instant>,
}

impl AlertManager {
    /// Creates a new AlertManager instance.
    pub fn new(dispatcher: Arc<AlertDispatcher>) -> Self {
        Self { dispatcher, last_alert: None }
    }

    /// Processes one frame's qualifying subset. Emits at most one alert and
    /// returns whether one fired.
    pub fn process(&mut self, qualifying: &[Detection], config: &MonitoringConfig) -> bool {
        if qualifying.is_empty() {
            // Time-based cooldown: an empty frame changes nothing.
            return false;
        }

        let cooldown = config.cooldown.max(MIN_COOLDOWN);
        let now = Instant::now();
        if let Some(last) = self.last_alert {
            if now.duration_since(last) < cooldown {
                tracing::debug!(
                    elapsed = ?now.duration_since(last),
                    cooldown = ?cooldown,
                    "Suppressing alert within cooldown window."
                );
                return false;
            }
        }

        self.last_alert = Some(now);
        let text = compose_message(qualifying, config);
        tracing::info!(channel = ?config.alert_channel, count = qualifying.len(), "Emitting alert.");
        self.dispatcher.dispatch(AlertSignal { text, channel: config.alert_channel });
        true
    }
}

/// Composes the warning text for a firing alert.
///
/// Qualifying detections are grouped by display label in first-seen order; a
/// label seen more than once renders with its count appended. The grouped
/// phrase list is joined onto the base warning phrase. Never returns an empty
/// string: with no groups the base phrase alone is emitted.
pub fn compose_message(qualifying: &[Detection], config: &MonitoringConfig) -> String {
    let trimmed = config.warning_text.trim();
    let base = if trimmed.is_empty() { DEFAULT_WARNING_TEXT } else { trimmed };

    let mut counts: Vec<(String, usize)> = Vec::new();
    for detection in qualifying {
        let label = config.display_label(&detection.label).to_string();
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }

    if counts.is_empty() {
        return base.to_string();
    }

    let parts: Vec<String> = counts
        .into_iter()
        .map(|(label, count)| {
            if count > 1 {
                format!("{} {}件", label, count)
            } else {
                label
            }
        })
        .collect();

    format!("{}（{}）", base, parts.join("、"))
}
