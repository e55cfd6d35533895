//! Language-model text generation for narration scripts and subtitle translation.

mod client;
mod prompts;
mod translate;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiGenerator, prompt_seed};
pub use prompts::ContentKind;
pub use translate::{needs_translation, translate_segments};

use thiserror::Error;

/// Errors that can occur while generating text.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("No API key configured (use --api-key or OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Model returned no text")]
    EmptyCompletion,
}

/// Trait for text generators.
#[cfg_attr(test, mockall::automock)]
pub trait TextGenerator: Send + Sync {
    /// Write text about `topic` in the style of `kind`.
    fn generate(&self, topic: &str, kind: ContentKind, tags: &str) -> Result<String, LlmError>;
}

/// Trait for line-by-line translators.
#[cfg_attr(test, mockall::automock)]
pub trait Translator: Send + Sync {
    /// Translate `text` from language `source` into `target`.
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, LlmError>;
}
