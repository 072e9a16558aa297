//! Configuration module for banken.

mod app_config;
mod helpers;
mod monitoring;

pub use app_config::{AppConfig, CommandSpec, FrameSourceConfig};
pub use helpers::{
    deserialize_duration_from_ms, deserialize_duration_from_seconds, serialize_duration_to_ms,
    serialize_duration_to_seconds,
};
pub use monitoring::MonitoringConfig;
