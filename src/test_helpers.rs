//! A set of helpers for testing

use std::time::Duration;

use crate::{
    config::MonitoringConfig,
    models::{BoundingBox, Detection},
};

/// A builder for creating `Detection` instances for testing.
#[derive(Debug, Clone)]
pub struct DetectionBuilder {
    label: String,
    confidence: f32,
    bbox: BoundingBox,
}

impl Default for DetectionBuilder {
    fn default() -> Self {
        Self {
            label: "person".to_string(),
            confidence: 0.9,
            // Centered in a 960x720 frame and large enough for the default
            // minimum area.
            bbox: BoundingBox::new(430.0, 310.0, 100.0, 100.0),
        }
    }
}

impl DetectionBuilder {
    /// Creates a new `DetectionBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the class label.
    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Sets the model confidence.
    pub fn confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Sets the bounding box.
    pub fn bbox(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.bbox = BoundingBox::new(x, y, width, height);
        self
    }

    /// Builds the `Detection` with the provided or default values.
    pub fn build(self) -> Detection {
        Detection::new(self.label, self.confidence, self.bbox)
    }
}

/// A builder for creating `MonitoringConfig` instances for testing.
#[derive(Debug, Clone, Default)]
pub struct MonitoringConfigBuilder {
    config: MonitoringConfig,
}

impl MonitoringConfigBuilder {
    /// Creates a new `MonitoringConfigBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the confidence threshold.
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.config.confidence_threshold = threshold;
        self
    }

    /// Sets the zone margin fraction.
    pub fn zone_margin(mut self, margin: f32) -> Self {
        self.config.zone_margin = margin;
        self
    }

    /// Sets the minimum area fraction.
    pub fn min_area(mut self, min_area: f32) -> Self {
        self.config.min_area = min_area;
        self
    }

    /// Sets the alert cooldown.
    pub fn cooldown(mut self, cooldown: Duration) -> Self {
        self.config.cooldown = cooldown;
        self
    }

    /// Sets the custom warning phrase.
    pub fn warning_text(mut self, text: &str) -> Self {
        self.config.warning_text = text.to_string();
        self
    }

    /// Builds the `MonitoringConfig` with the provided or default values.
    pub fn build(self) -> MonitoringConfig {
        self.config
    }
}
