//! The per-frame monitoring configuration snapshot.

use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use super::{deserialize_duration_from_seconds, serialize_duration_to_seconds};
use crate::models::{AlertChannel, ConfigCommand};

/// Largest accepted zone margin; half the frame per edge would collapse the
/// zone to nothing.
const MAX_ZONE_MARGIN: f32 = 0.499;

fn default_confidence_threshold() -> f32 {
    0.5
}

fn default_zone_margin() -> f32 {
    0.1
}

fn default_min_area() -> f32 {
    0.01
}

fn default_cooldown() -> Duration {
    Duration::from_secs(5)
}

fn default_target_classes() -> HashSet<String> {
    ["person", "cat", "dog"].into_iter().map(String::from).collect()
}

/// The configuration read by the detection filter and alert manager on every
/// frame.
///
/// There is exactly one live instance, owned by the frame loop. All mutation
/// happens by applying [`ConfigCommand`]s at tick boundaries, so a filtering
/// pass always sees a consistent snapshot. Out-of-range values are clamped on
/// application rather than rejected; the comparisons they feed stay
/// well-defined either way.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MonitoringConfig {
    /// Minimum model confidence for a detection to qualify, in `[0, 1]`.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// Zone margin as a fraction of the frame dimensions, in `[0, 0.5)`.
    #[serde(default = "default_zone_margin")]
    pub zone_margin: f32,

    /// Minimum box area as a fraction of the frame area, in `[0, 1]`.
    #[serde(default = "default_min_area")]
    pub min_area: f32,

    /// Minimum wall-clock interval between alerts. Enforced with a one-second
    /// floor regardless of what is configured here.
    #[serde(
        deserialize_with = "deserialize_duration_from_seconds",
        serialize_with = "serialize_duration_to_seconds",
        default = "default_cooldown"
    )]
    pub cooldown: Duration,

    /// The alert output channel.
    #[serde(default)]
    pub alert_channel: AlertChannel,

    /// Custom warning phrase. When empty, composition falls back to the
    /// built-in default phrase.
    #[serde(default)]
    pub warning_text: String,

    /// Class labels currently considered intrusion targets.
    #[serde(default = "default_target_classes")]
    pub target_classes: HashSet<String>,

    /// Display-name overrides applied to class labels when composing the
    /// warning message.
    #[serde(default)]
    pub label_overrides: HashMap<String, String>,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            zone_margin: default_zone_margin(),
            min_area: default_min_area(),
            cooldown: default_cooldown(),
            alert_channel: AlertChannel::default(),
            warning_text: String::new(),
            target_classes: default_target_classes(),
            label_overrides: HashMap::new(),
        }
    }
}

impl MonitoringConfig {
    /// Applies a single configuration command, clamping numeric values into
    /// their documented ranges. Last writer wins.
    pub fn apply(&mut self, command: ConfigCommand) {
        match command {
            ConfigCommand::SetThreshold(value) => {
                self.confidence_threshold = value.clamp(0.0, 1.0);
            }
            ConfigCommand::SetZoneMargin(value) => {
                self.zone_margin = value.clamp(0.0, MAX_ZONE_MARGIN);
            }
            ConfigCommand::SetMinArea(value) => {
                self.min_area = value.clamp(0.0, 1.0);
            }
            ConfigCommand::SetCooldown(value) => {
                self.cooldown = value;
            }
            ConfigCommand::SetChannel(channel) => {
                self.alert_channel = channel;
            }
            ConfigCommand::SetWarningText(text) => {
                self.warning_text = text;
            }
            ConfigCommand::SetTarget { label, enabled } => {
                if enabled {
                    self.target_classes.insert(label);
                } else {
                    self.target_classes.remove(&label);
                }
            }
        }
    }

    /// The display label for a class, after overrides.
    pub fn display_label<'a>(&'a self, label: &'a str) -> &'a str {
        self.label_overrides.get(label).map(String::as_str).unwrap_or(label)
    }
}
