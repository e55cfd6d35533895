//! Backend request/response types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when communicating with the backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Health check response from backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub engine: Option<String>,
}

/// A voice offered by the backend, e.g. `es-BO-MarceloNeural`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceInfo {
    #[serde(rename = "ShortName", alias = "name")]
    pub short_name: String,
    #[serde(rename = "Locale", alias = "locale", default)]
    pub locale: String,
    #[serde(rename = "Gender", alias = "gender", default)]
    pub gender: String,
}

/// Response from list voices endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceInfo>,
}

/// Request for speech synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
    pub voice: String,
    /// Relative rate such as `+20%`. Omitted at normal speed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
}

impl SynthesizeRequest {
    /// Create a new synthesis request.
    pub fn new(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
            rate: None,
        }
    }

    /// Set the speech speed multiplier.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.rate = rate_string(speed);
        self
    }
}

/// Render a speed multiplier as a signed percentage, `None` at ~1.0.
///
/// The percentage is truncated toward zero, so `1.15` becomes `+14%`.
pub fn rate_string(speed: f32) -> Option<String> {
    if (speed - 1.0).abs() < 0.01 {
        return None;
    }
    let percent = ((speed - 1.0) * 100.0) as i32;
    if percent > 0 {
        Some(format!("+{percent}%"))
    } else {
        Some(format!("{percent}%"))
    }
}

/// Short voice name from either `es-BO-MarceloNeural` or a display string
/// like `es-BO-MarceloNeural - Microsoft Server Speech ... (Male)`.
pub fn short_voice_name(voice: &str) -> &str {
    voice.split(" - ").next().unwrap_or(voice).trim()
}
