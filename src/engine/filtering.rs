//! The per-frame detection filter.
//!
//! Decides which of a frame's raw detections qualify as intrusions under the
//! current configuration. The filter is a pure function: the qualifying
//! subset for a frame depends only on that frame's detections, its pixel
//! dimensions, and the configuration snapshot in effect; no state is carried
//! between frames.

use crate::{
    config::MonitoringConfig,
    models::{Detection, Zone},
};

/// Computes the subset of `detections` that qualifies as an intrusion.
///
/// A detection qualifies iff its confidence reaches the threshold, its class
/// is in the target set, its box area reaches the configured fraction of the
/// frame area, and its box center lies within the safe zone (inclusive
/// bounds). Output preserves input order.
///
/// Malformed input is treated permissively: negative box dimensions or
/// confidences outside `[0, 1]` simply flow through the comparisons, the same
/// way the values off a UI slider would. No validation error is raised.
pub fn qualify(
    detections: &[Detection],
    frame_width: u32,
    frame_height: u32,
    config: &MonitoringConfig,
) -> Vec<Detection> {
    let zone = Zone::from_margin(config.zone_margin, frame_width, frame_height);
    let min_area_px = config.min_area * frame_width as f32 * frame_height as f32;

    detections
        .iter()
        .filter(|detection| {
            if detection.confidence < config.confidence_threshold {
                return false;
            }
            if !config.target_classes.contains(&detection.label) {
                return false;
            }
            if detection.bbox.area() < min_area_px {
                return false;
            }
            let (cx, cy) = detection.bbox.center();
            zone.contains(cx, cy)
        })
        .cloned()
        .collect()
}
