//! This module defines the configuration commands accepted by the frame loop.

use std::time::Duration;

use crate::models::AlertChannel;

/// A single-field update to the monitoring configuration.
///
/// Commands stand in for the UI control bindings of a front-end: each one
/// mutates exactly one field of the configuration store. The frame loop
/// drains pending commands at tick boundaries, so a command never interleaves
/// with a filtering pass. Last writer wins.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigCommand {
    /// Sets the minimum model confidence, in `[0, 1]`.
    SetThreshold(f32),

    /// Sets the zone margin as a fraction of the frame dimensions.
    SetZoneMargin(f32),

    /// Sets the minimum box area as a fraction of the frame area.
    SetMinArea(f32),

    /// Sets the alert cooldown. Values below one second are floored when the
    /// cooldown is enforced.
    SetCooldown(Duration),

    /// Selects the alert output channel.
    SetChannel(AlertChannel),

    /// Replaces the custom warning phrase. An empty phrase falls back to the
    /// built-in default at composition time.
    SetWarningText(String),

    /// Adds or removes a class label from the target set.
    SetTarget {
        /// The class label to toggle.
        label: String,
        /// Whether the label should be considered an intrusion target.
        enabled: bool,
    },
}
