//! Encoder types and errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by ffmpeg/ffprobe invocations.
#[derive(Error, Debug)]
pub enum FfmpegError {
    #[error("Failed to execute {tool}: {source}")]
    SpawnFailed {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    ProcessFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("Invalid probe output: {0}")]
    InvalidOutput(String),

    #[error("No segments to encode")]
    EmptySegments,
}

/// Basic properties of the first video stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub duration_sec: f64,
    pub width: u32,
    pub height: u32,
}

/// Styling for burned-in subtitles.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleStyle {
    /// Font size in video pixels.
    pub font_size: u32,
    /// Frame height, used to scale the size into libass script units.
    pub video_height: u32,
    pub font_name: String,
}

impl SubtitleStyle {
    pub fn new(font_size: u32, video_height: u32) -> Self {
        Self {
            font_size,
            video_height,
            font_name: "Calibri".to_string(),
        }
    }
}

/// Encoder speed presets tried when burning subtitles, fastest first.
pub const BURN_PRESETS: [&str; 2] = ["ultrafast", "fast"];
