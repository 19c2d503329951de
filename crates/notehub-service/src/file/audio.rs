//! Audio normalisation through an external `ffmpeg` process.
//!
//! Uploaded recordings are converted to 16 kHz mono PCM WAV before they are
//! stored. When conversion fails for any reason the original bytes are kept.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

use notehub_core::config::AudioConfig;

/// Content type reported for converted audio.
pub const WAV_CONTENT_TYPE: &str = "audio/wav";
/// Content type reported when conversion failed and the original is kept.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Errors from a transcoding attempt.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The ffmpeg binary could not be started.
    #[error("Failed to start {command}: {source}")]
    Spawn {
        /// The command that was run.
        command: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The process did not finish in time.
    #[error("Transcoding timed out after {0} seconds")]
    Timeout(u64),

    /// The process exited with a non-zero code.
    #[error("Transcoding failed with exit code {code}: {stderr}")]
    ProcessFailed {
        /// The exit code.
        code: i32,
        /// Standard error output (truncated).
        stderr: String,
    },

    /// IO error while staging files.
    #[error("IO error during transcoding: {0}")]
    Io(#[from] std::io::Error),
}

/// The bytes to store for an uploaded audio file.
#[derive(Debug, Clone)]
pub struct TranscodedAudio {
    /// File bytes.
    pub data: Bytes,
    /// Display filename.
    pub filename: String,
    /// Content type.
    pub content_type: String,
}

/// Runs ffmpeg to normalise uploaded audio.
#[derive(Debug, Clone)]
pub struct AudioTranscoder {
    ffmpeg_path: String,
    sample_rate: u32,
    channels: u32,
    timeout: Duration,
}

impl AudioTranscoder {
    /// Creates a transcoder from configuration.
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            ffmpeg_path: config.ffmpeg_path.clone(),
            sample_rate: config.sample_rate,
            channels: config.channels,
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    /// Convert `data` to WAV, falling back to the original on any failure.
    pub async fn transcode_or_original(&self, data: Bytes, filename: &str) -> TranscodedAudio {
        match self.transcode(&data, filename).await {
            Ok(wav) => {
                let wav_name = wav_filename(filename);
                info!(
                    original = filename,
                    converted = %wav_name,
                    bytes = wav.len(),
                    "Converted audio to WAV"
                );
                TranscodedAudio {
                    data: wav,
                    filename: wav_name,
                    content_type: WAV_CONTENT_TYPE.to_string(),
                }
            }
            Err(e) => {
                warn!(filename, error = %e, "Audio conversion failed, keeping original");
                TranscodedAudio {
                    data,
                    filename: filename.to_string(),
                    content_type: FALLBACK_CONTENT_TYPE.to_string(),
                }
            }
        }
    }

    /// Convert `data` to 16-bit PCM WAV with the configured rate and channels.
    pub async fn transcode(&self, data: &[u8], filename: &str) -> Result<Bytes, TranscodeError> {
        let workdir = tempfile::tempdir()?;
        let extension = Path::new(filename)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_else(|| ".tmp".to_string());
        let input_path = workdir.path().join(format!("input{extension}"));
        let output_path = workdir.path().join("output.wav");

        tokio::fs::write(&input_path, data).await?;

        let mut cmd = Command::new(&self.ffmpeg_path);
        cmd.arg("-y")
            .arg("-i")
            .arg(&input_path)
            .arg("-ar")
            .arg(self.sample_rate.to_string())
            .arg("-ac")
            .arg(self.channels.to_string())
            .args(["-c:a", "pcm_s16le"])
            .arg(&output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| TranscodeError::Timeout(self.timeout.as_secs()))?
            .map_err(|source| TranscodeError::Spawn {
                command: self.ffmpeg_path.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranscodeError::ProcessFailed {
                code: output.status.code().unwrap_or(-1),
                stderr: stderr.chars().take(2000).collect(),
            });
        }

        let wav = tokio::fs::read(&output_path).await?;
        Ok(Bytes::from(wav))
    }
}

/// The original stem with a `.wav` extension.
pub fn wav_filename(original: &str) -> String {
    let stem = match original.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => original,
    };
    format!("{stem}.wav")
}
