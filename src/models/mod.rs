//! This module contains the data models for the banken application.

pub mod alert;
pub mod command;
pub mod detection;
pub mod frame;
pub mod status;
pub mod zone;

pub use alert::{AlertChannel, AlertSignal};
pub use command::ConfigCommand;
pub use detection::{BoundingBox, Detection};
pub use frame::Frame;
pub use status::StatusReport;
pub use zone::Zone;
