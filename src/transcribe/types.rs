//! Transcription request/response types.

use serde::Deserialize;
use thiserror::Error;

use crate::subtitles::SubtitleSegment;

/// Errors that can occur while transcribing audio.
#[derive(Error, Debug)]
pub enum TranscribeError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Transcription returned no segments")]
    NoSegments,

    #[error("All {attempts} transcription attempts failed, last error: {last}")]
    Exhausted { attempts: u32, last: String },
}

/// `verbose_json` response of an OpenAI-compatible transcription endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionResponse {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub segments: Vec<TranscribedSegment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscribedSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl From<TranscribedSegment> for SubtitleSegment {
    fn from(segment: TranscribedSegment) -> Self {
        SubtitleSegment::new(segment.start, segment.end, segment.text.trim())
    }
}
