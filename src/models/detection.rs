//! This module defines the `Detection` struct produced by the vision model.

use serde::{Deserialize, Serialize};

/// A single object detection reported by the external vision model for one
/// frame. Detections are immutable and scoped to the frame they were
/// produced for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// The class label assigned by the model (e.g. "person").
    pub label: String,

    /// Model confidence in the range `[0, 1]`.
    pub confidence: f32,

    /// The bounding box in frame pixel coordinates.
    pub bbox: BoundingBox,
}

/// An axis-aligned bounding box in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X coordinate of the top-left corner.
    pub x: f32,

    /// Y coordinate of the top-left corner.
    pub y: f32,

    /// Box width in pixels.
    pub width: f32,

    /// Box height in pixels.
    pub height: f32,
}

impl BoundingBox {
    /// Creates a new bounding box.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// The box area in square pixels.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// The geometric center of the box.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

impl Detection {
    /// Creates a new detection.
    pub fn new(label: impl Into<String>, confidence: f32, bbox: BoundingBox) -> Self {
        Self { label: label.into(), confidence, bbox }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_center_and_area() {
        let bbox = BoundingBox::new(400.0, 300.0, 100.0, 100.0);
        assert_eq!(bbox.area(), 10000.0);
        assert_eq!(bbox.center(), (450.0, 350.0));
    }
}
