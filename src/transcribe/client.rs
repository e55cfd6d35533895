//! HTTP client for an OpenAI-compatible transcription endpoint.

use std::path::Path;
use std::time::Duration;

use tracing::warn;

use crate::subtitles::SubtitleSegment;

use super::Transcriber;
use super::types::{TranscribeError, TranscriptionResponse};

/// Whisper runs can take several minutes on long audio.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Posts audio files to `{base_url}/v1/audio/transcriptions`.
pub struct HttpTranscriber {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

impl HttpTranscriber {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    "Could not build transcription client ({}), using defaults without timeout",
                    e
                );
                reqwest::blocking::Client::new()
            });

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/audio/transcriptions", self.base_url)
    }
}

impl Transcriber for HttpTranscriber {
    fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<String>,
    ) -> Result<Vec<SubtitleSegment>, TranscribeError> {
        let audio_data = std::fs::read(audio_path)
            .map_err(|_| TranscribeError::FileNotFound(audio_path.display().to_string()))?;

        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav");

        let file_part = reqwest::blocking::multipart::Part::bytes(audio_data)
            .file_name(file_name.to_string())
            .mime_str("audio/wav")
            .map_err(|e| TranscribeError::RequestFailed(e.to_string()))?;

        let mut form = reqwest::blocking::multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json");

        if let Some(lang) = language {
            form = form.text("language", lang);
        }

        let mut request = self.client.post(self.endpoint()).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .map_err(|e| TranscribeError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(TranscribeError::RequestFailed(format!("{status}: {body}")));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .map_err(|e| TranscribeError::InvalidResponse(e.to_string()))?;

        Ok(parsed
            .segments
            .into_iter()
            .map(SubtitleSegment::from)
            .filter(|s| !s.text.is_empty())
            .collect())
    }
}
