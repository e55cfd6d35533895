//! ffmpeg/ffprobe process wrapper.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, warn};

use crate::scenes::Scene;

use super::Encoder;
use super::filter::{build_concat_filter, subtitles_filter};
use super::types::{BURN_PRESETS, FfmpegError, SubtitleStyle, VideoInfo};

/// Runs the ffmpeg and ffprobe binaries.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    ffmpeg_path: PathBuf,
    ffprobe_path: PathBuf,
}

impl Ffmpeg {
    /// Use `ffmpeg` and `ffprobe` from `PATH`.
    pub fn new() -> Self {
        Self::with_paths("ffmpeg", "ffprobe")
    }

    pub fn with_paths(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg.into(),
            ffprobe_path: ffprobe.into(),
        }
    }

    pub fn ffmpeg_command(&self) -> Command {
        Command::new(&self.ffmpeg_path)
    }

    pub fn ffprobe_command(&self) -> Command {
        Command::new(&self.ffprobe_path)
    }

    /// Run a prepared command, turning a non-zero exit into an error carrying stderr.
    pub fn run(mut command: Command, tool: &str) -> Result<Output, FfmpegError> {
        debug!("Running {:?}", command);
        let output = command.output().map_err(|source| FfmpegError::SpawnFailed {
            tool: tool.to_string(),
            source,
        })?;

        if !output.status.success() {
            return Err(FfmpegError::ProcessFailed {
                tool: tool.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output)
    }

    fn probe_json(
        &self,
        input: &Path,
        stream: &str,
        entries: &str,
    ) -> Result<serde_json::Value, FfmpegError> {
        let mut command = self.ffprobe_command();
        command
            .args(["-v", "error", "-select_streams", stream, "-show_entries", entries])
            .args(["-of", "json"])
            .arg(input);

        let output = Self::run(command, "ffprobe")?;
        serde_json::from_slice(&output.stdout)
            .map_err(|e| FfmpegError::InvalidOutput(e.to_string()))
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new()
    }
}

/// Read width, height and duration from ffprobe JSON.
///
/// Duration comes from the container, falling back to the stream.
pub fn parse_video_info(json: &serde_json::Value) -> Result<VideoInfo, FfmpegError> {
    let stream = json["streams"]
        .as_array()
        .and_then(|s| s.first())
        .ok_or_else(|| FfmpegError::InvalidOutput("No video stream found".to_string()))?;

    let parse_duration = |value: &serde_json::Value| {
        value.as_str().and_then(|d| d.parse::<f64>().ok())
    };
    let duration_sec = parse_duration(&json["format"]["duration"])
        .or_else(|| parse_duration(&stream["duration"]))
        .unwrap_or(0.0);

    Ok(VideoInfo {
        duration_sec,
        width: stream["width"].as_u64().unwrap_or(0) as u32,
        height: stream["height"].as_u64().unwrap_or(0) as u32,
    })
}

impl Encoder for Ffmpeg {
    fn probe(&self, input: &Path) -> Result<VideoInfo, FfmpegError> {
        let json = self.probe_json(
            input,
            "v:0",
            "stream=width,height,duration:format=duration",
        )?;
        parse_video_info(&json)
    }

    fn has_video_stream(&self, input: &Path) -> Result<bool, FfmpegError> {
        match self.probe_json(input, "v:0", "stream=codec_type") {
            Ok(json) => Ok(json["streams"].as_array().is_some_and(|s| !s.is_empty())),
            Err(FfmpegError::ProcessFailed { stderr, .. }) => {
                warn!("ffprobe rejected {}: {}", input.display(), stderr);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn extract_audio(&self, input: &Path, output: &Path) -> Result<(), FfmpegError> {
        let mut command = self.ffmpeg_command();
        command
            .args(["-y", "-i"])
            .arg(input)
            .args(["-vn", "-ac", "1", "-ar", "16000", "-c:a", "pcm_s16le"])
            .arg(output);

        Self::run(command, "ffmpeg").map(|_| ())
    }

    fn concat_segments(
        &self,
        input: &Path,
        segments: &[Scene],
        output: &Path,
    ) -> Result<(), FfmpegError> {
        if segments.is_empty() {
            return Err(FfmpegError::EmptySegments);
        }

        let filter = build_concat_filter(segments);
        let mut command = self.ffmpeg_command();
        command
            .args(["-y", "-i"])
            .arg(input)
            .args(["-filter_complex", filter.as_str()])
            .args(["-map", "[vout]", "-map", "[aout]"])
            .args(["-c:v", "libx264", "-preset", "fast", "-crf", "23"])
            .args(["-c:a", "aac", "-b:a", "192k"])
            .arg(output);

        Self::run(command, "ffmpeg").map(|_| ())
    }

    fn burn_subtitles(
        &self,
        input: &Path,
        subtitles: &Path,
        output: &Path,
        style: &SubtitleStyle,
    ) -> Result<(), FfmpegError> {
        let filter = subtitles_filter(subtitles, style);
        let mut last_error = None;

        for preset in BURN_PRESETS {
            let mut command = self.ffmpeg_command();
            command
                .args(["-y", "-i"])
                .arg(input)
                .args(["-vf", filter.as_str()])
                .args(["-c:v", "libx264", "-preset", preset, "-crf", "23", "-bf", "2"])
                .args(["-c:a", "aac", "-b:a", "192k", "-movflags", "+faststart"])
                .arg(output);

            match Self::run(command, "ffmpeg") {
                Ok(_) => return Ok(()),
                Err(e @ FfmpegError::ProcessFailed { .. }) => {
                    warn!("Encoding with preset '{}' failed: {}", preset, e);
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            FfmpegError::InvalidOutput("No encoder preset succeeded".to_string())
        }))
    }
}
