use std::{path::PathBuf, time::Duration};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::{MonitoringConfig, deserialize_duration_from_ms, deserialize_duration_from_seconds};
use crate::providers::CameraFacing;

/// Provides the default value for frame_interval.
fn default_frame_interval() -> Duration {
    Duration::from_millis(100)
}

/// Provides the default value for clock_interval.
fn default_clock_interval() -> Duration {
    Duration::from_secs(1)
}

/// Provides the default value for shutdown_timeout.
fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Provides the default value for command_channel_capacity.
fn default_command_channel_capacity() -> u32 {
    64
}

/// An external command an alert channel hands its text to.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// The program to spawn.
    pub program: String,

    /// Arguments placed before the warning text.
    #[serde(default)]
    pub args: Vec<String>,
}

/// How frames are sourced when no real camera is wired in.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum FrameSourceConfig {
    /// Solid frames of a fixed size.
    Synthetic {
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
    },

    /// Images cycled from a directory in lexical order.
    Directory {
        /// The directory holding the frame images.
        path: PathBuf,
    },
}

impl Default for FrameSourceConfig {
    fn default() -> Self {
        // Same fallback dimensions a camera-less preview would get.
        FrameSourceConfig::Synthetic { width: 640, height: 480 }
    }
}

/// Application configuration for banken.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Path to the detection replay descriptor loaded before monitoring
    /// starts.
    pub detections_path: PathBuf,

    /// Frame source used for this session.
    #[serde(default)]
    pub frames: FrameSourceConfig,

    /// Camera facing preference forwarded to the video source.
    #[serde(default)]
    pub camera_facing: CameraFacing,

    /// The interval between frame loop iterations.
    #[serde(default = "default_frame_interval", deserialize_with = "deserialize_duration_from_ms")]
    pub frame_interval: Duration,

    /// The interval at which the clock readout is refreshed.
    #[serde(
        default = "default_clock_interval",
        deserialize_with = "deserialize_duration_from_seconds"
    )]
    pub clock_interval: Duration,

    /// The maximum time to wait for graceful shutdown.
    #[serde(
        default = "default_shutdown_timeout",
        deserialize_with = "deserialize_duration_from_seconds"
    )]
    pub shutdown_timeout: Duration,

    /// Where the annotated preview frame is written. Disabled when unset.
    #[serde(default)]
    pub preview_path: Option<PathBuf>,

    /// External command handling the tone channel. Falls back to stdout when
    /// unset.
    #[serde(default)]
    pub tone_command: Option<CommandSpec>,

    /// External command handling the speech channel. Falls back to stdout
    /// when unset.
    #[serde(default)]
    pub speech_command: Option<CommandSpec>,

    /// The capacity of the channel carrying configuration commands.
    #[serde(default = "default_command_channel_capacity")]
    pub command_channel_capacity: u32,

    /// The initial monitoring configuration snapshot.
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            detections_path: PathBuf::new(),
            frames: FrameSourceConfig::default(),
            camera_facing: CameraFacing::default(),
            frame_interval: default_frame_interval(),
            clock_interval: default_clock_interval(),
            shutdown_timeout: default_shutdown_timeout(),
            preview_path: None,
            tone_command: None,
            speech_command: None,
            command_channel_capacity: default_command_channel_capacity(),
            monitoring: MonitoringConfig::default(),
        }
    }
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading from the configuration directory.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)))
            .add_source(Environment::with_prefix("BANKEN").separator("__"))
            .build()?;
        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_the_optional_surface() {
        let config = AppConfig::default();
        assert_eq!(config.frames, FrameSourceConfig::Synthetic { width: 640, height: 480 });
        assert_eq!(config.frame_interval, Duration::from_millis(100));
        assert!(config.preview_path.is_none());
        assert!(config.tone_command.is_none());
        assert!(config.speech_command.is_none());
    }

    #[test]
    fn frame_source_deserializes_tagged_variants() {
        let synthetic: FrameSourceConfig =
            serde_json::from_str(r#"{"source": "synthetic", "width": 960, "height": 720}"#).unwrap();
        assert_eq!(synthetic, FrameSourceConfig::Synthetic { width: 960, height: 720 });

        let directory: FrameSourceConfig =
            serde_json::from_str(r#"{"source": "directory", "path": "./frames"}"#).unwrap();
        assert_eq!(directory, FrameSourceConfig::Directory { path: "./frames".into() });
    }
}
