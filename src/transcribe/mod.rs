//! Speech-to-text for subtitle generation.
//!
//! Audio is sent to an OpenAI-compatible transcription server (a local
//! whisper server or the hosted API) and mapped to subtitle segments.

mod client;
mod types;

pub use client::HttpTranscriber;
pub use types::{TranscribeError, TranscribedSegment, TranscriptionResponse};

use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::subtitles::SubtitleSegment;

/// Trait for transcription backends.
#[cfg_attr(test, mockall::automock)]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file. `language` is an ISO code hint; `None` lets
    /// the backend detect it.
    fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<String>,
    ) -> Result<Vec<SubtitleSegment>, TranscribeError>;
}

/// Fixed back-off retry settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub attempts: u32,
    /// Wait `backoff_step * attempt` between attempts.
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff_step: Duration::from_secs(5),
        }
    }
}

/// Transcribe with retries. An empty result counts as a failed attempt.
pub fn transcribe_with_retry<T: Transcriber + ?Sized>(
    transcriber: &T,
    audio_path: &Path,
    language: Option<&str>,
    policy: &RetryPolicy,
) -> Result<Vec<SubtitleSegment>, TranscribeError> {
    let attempts = policy.attempts.max(1);
    let mut last_error = TranscribeError::NoSegments;

    for attempt in 1..=attempts {
        info!(
            "Transcribing {} (attempt {}/{})",
            audio_path.display(),
            attempt,
            attempts
        );

        match transcriber.transcribe(audio_path, language.map(str::to_string)) {
            Ok(segments) if !segments.is_empty() => return Ok(segments),
            Ok(_) => last_error = TranscribeError::NoSegments,
            Err(e) => last_error = e,
        }
        warn!("Attempt {} failed: {}", attempt, last_error);

        if attempt < attempts {
            let wait = policy.backoff_step * attempt;
            info!("Waiting {:?} before retrying", wait);
            thread::sleep(wait);
        }
    }

    Err(TranscribeError::Exhausted {
        attempts,
        last: last_error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn instant_policy() -> RetryPolicy {
        RetryPolicy {
            attempts: 3,
            backoff_step: Duration::ZERO,
        }
    }

    #[test]
    fn test_retry_policy_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts, 3);
        assert_eq!(policy.backoff_step, Duration::from_secs(5));
    }

    #[test]
    fn test_retry_returns_first_success() {
        let mut mock = MockTranscriber::new();
        mock.expect_transcribe()
            .withf(|path, lang| {
                path == PathBuf::from("/tmp/audio.wav").as_path() && lang.as_deref() == Some("es")
            })
            .times(1)
            .returning(|_, _| Ok(vec![SubtitleSegment::new(0.0, 1.0, "Hola")]));

        let result = transcribe_with_retry(
            &mock,
            &PathBuf::from("/tmp/audio.wav"),
            Some("es"),
            &instant_policy(),
        );

        assert_eq!(result.unwrap().len(), 1);
    }

    #[test]
    fn test_retry_recovers_after_failure() {
        let mut mock = MockTranscriber::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_transcribe()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(TranscribeError::ConnectionFailed("refused".to_string())));
        mock.expect_transcribe()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Vec::new()));
        mock.expect_transcribe()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec![SubtitleSegment::new(0.0, 2.0, "ok")]));

        let result = transcribe_with_retry(
            &mock,
            &PathBuf::from("audio.wav"),
            None,
            &instant_policy(),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_retry_exhausted_reports_last_error() {
        let mut mock = MockTranscriber::new();
        mock.expect_transcribe()
            .times(3)
            .returning(|_, _| Err(TranscribeError::RequestFailed("500".to_string())));

        let result = transcribe_with_retry(
            &mock,
            &PathBuf::from("audio.wav"),
            None,
            &instant_policy(),
        );

        match result {
            Err(TranscribeError::Exhausted { attempts, last }) => {
                assert_eq!(attempts, 3);
                assert!(last.contains("500"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_transcription_response_deserialize() {
        let json = r#"{
            "language": "english",
            "segments": [
                {"id": 0, "start": 0.0, "end": 2.4, "text": " Hello there "},
                {"id": 1, "start": 2.4, "end": 5.0, "text": "General"}
            ]
        }"#;

        let response: TranscriptionResponse = serde_json::from_str(json).unwrap();
        let segments: Vec<SubtitleSegment> =
            response.segments.into_iter().map(SubtitleSegment::from).collect();

        assert_eq!(segments[0], SubtitleSegment::new(0.0, 2.4, "Hello there"));
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_http_transcriber_endpoint() {
        let transcriber = HttpTranscriber::new("http://localhost:8000/", "medium", None);
        assert_eq!(transcriber.base_url(), "http://localhost:8000");
        assert_eq!(
            transcriber.endpoint(),
            "http://localhost:8000/v1/audio/transcriptions"
        );
    }

    #[test]
    fn test_http_transcriber_missing_file() {
        let transcriber = HttpTranscriber::new("http://localhost:8000", "medium", None);
        let result = transcriber.transcribe(&PathBuf::from("/nonexistent/audio.wav"), None);

        assert!(matches!(result, Err(TranscribeError::FileNotFound(_))));
    }
}
