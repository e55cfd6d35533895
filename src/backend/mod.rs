//! Backend communication with the TTS server.
//!
//! The narration tool talks to a small HTTP service wrapping a neural TTS
//! engine. The service returns WAV audio for each synthesis request.

mod client;
mod types;

pub use client::HttpBackend;
pub use types::{
    BackendError, HealthResponse, SynthesizeRequest, VoiceInfo, VoicesResponse, rate_string,
    short_voice_name,
};

/// Trait for TTS backend communication.
///
/// This trait abstracts the HTTP communication with the TTS server,
/// allowing for mock implementations in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    /// Check backend health status.
    fn health(&self) -> Result<HealthResponse, BackendError>;

    /// Synthesize speech from text.
    ///
    /// # Returns
    /// Raw WAV audio data
    fn synthesize(&self, request: &SynthesizeRequest) -> Result<Vec<u8>, BackendError>;

    /// List voices offered by the server.
    fn list_voices(&self) -> Result<VoicesResponse, BackendError>;
}

/// Keep only the voices whose short name starts with `locale_prefix`, sorted.
pub fn filter_voices(voices: Vec<VoiceInfo>, locale_prefix: &str) -> Vec<VoiceInfo> {
    let mut filtered: Vec<VoiceInfo> = voices
        .into_iter()
        .filter(|v| v.short_name.starts_with(locale_prefix))
        .collect();
    filtered.sort_by(|a, b| a.short_name.cmp(&b.short_name));
    filtered
}
