//! This module contains the external-collaborator boundaries of the
//! pipeline and their in-repo implementations.

pub mod frames;
pub mod preview;
pub mod replay;
pub mod traits;

pub use frames::{ImageDirSource, SyntheticSource};
pub use preview::{FilePreview, NullPreview};
pub use replay::ReplayDetector;
pub use traits::{
    CameraFacing, Detector, DetectorError, PreviewError, PreviewSink, VideoSource,
    VideoSourceError,
};
