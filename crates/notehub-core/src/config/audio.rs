//! Audio transcoding configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings for normalizing uploaded audio to speech-recognition WAV.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AudioConfig {
    /// Whether `audio/*` uploads are transcoded before storage.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Path or name of the `ffmpeg` executable.
    #[serde(default = "default_ffmpeg")]
    #[validate(length(min = 1))]
    pub ffmpeg_path: String,
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    #[validate(range(min = 8000, max = 48000))]
    pub sample_rate: u32,
    /// Output channel count.
    #[serde(default = "default_channels")]
    #[validate(range(min = 1, max = 2))]
    pub channels: u32,
    /// Timeout for a single transcoder invocation.
    #[serde(default = "default_timeout")]
    #[validate(range(min = 1, max = 3600))]
    pub timeout_seconds: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            ffmpeg_path: default_ffmpeg(),
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_sample_rate() -> u32 {
    16_000
}

fn default_channels() -> u32 {
    1
}

fn default_timeout() -> u64 {
    300
}
