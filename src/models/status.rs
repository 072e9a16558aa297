//! This module defines the human-readable status readout.

use std::fmt;

/// The state reported on the status surface, updated once per frame while
/// monitoring and at lifecycle transitions otherwise.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StatusReport {
    /// Monitoring has not been started or has been stopped.
    #[default]
    Stopped,

    /// The detection model is being loaded.
    LoadingModel,

    /// The camera is being acquired.
    AcquiringCamera,

    /// Monitoring is running but no frame has been processed yet.
    Running,

    /// A frame was processed.
    Frame {
        /// Number of qualifying detections in the frame.
        qualifying: usize,
        /// The confidence threshold in effect, in `[0, 1]`.
        threshold: f32,
    },

    /// A fatal acquisition failure.
    Error(String),
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusReport::Stopped => write!(f, "停止中"),
            StatusReport::LoadingModel => write!(f, "モデル読込中..."),
            StatusReport::AcquiringCamera => write!(f, "カメラ初期化中..."),
            StatusReport::Running => write!(f, "稼働中"),
            StatusReport::Frame { qualifying, threshold } => {
                let percent = (threshold * 100.0).round() as u32;
                if *qualifying > 0 {
                    write!(f, "検知: {}件 / しきい値 {}%", qualifying, percent)
                } else {
                    write!(f, "検知なし / しきい値 {}%", percent)
                }
            }
            StatusReport::Error(message) => write!(f, "エラー: {}", message),
        }
    }
}
