//! Chat completions client.

use serde::Deserialize;

use super::prompts::ContentKind;
use super::{LlmError, TextGenerator, Translator};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Seed derived from the prompt so the same topic yields the same text.
///
/// FNV-1a over the UTF-8 bytes, so the value is the same across builds
/// and toolchains.
pub fn prompt_seed(prompt: &str) -> u64 {
    let hash = prompt
        .bytes()
        .fold(FNV_OFFSET, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        });
    hash % 10_000_000
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Client for `POST {base_url}/v1/chat/completions`.
pub struct OpenAiGenerator {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

impl OpenAiGenerator {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// JSON body sent for a generation request.
    pub fn request_body(&self, topic: &str, kind: ContentKind, tags: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "seed": prompt_seed(topic),
            "messages": [
                {"role": "system", "content": kind.system_prompt(tags)},
                {"role": "user", "content": kind.user_prompt(topic)}
            ]
        })
    }

    /// JSON body sent to translate one subtitle line.
    pub fn translation_body(&self, text: &str, source: &str, target: &str) -> serde_json::Value {
        let system = format!(
            "Translate the user's subtitle line from '{source}' to '{target}'. \
             Reply with the translation only, on a single line."
        );
        serde_json::json!({
            "model": self.model,
            "temperature": 0,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": text}
            ]
        })
    }

    fn complete(&self, body: &serde_json::Value) -> Result<String, LlmError> {
        let api_key = self.api_key.as_ref().ok_or(LlmError::MissingApiKey)?;
        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .map_err(|e| LlmError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(LlmError::RequestFailed(format!("{status}: {body}")));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(LlmError::EmptyCompletion)
    }
}

impl TextGenerator for OpenAiGenerator {
    fn generate(&self, topic: &str, kind: ContentKind, tags: &str) -> Result<String, LlmError> {
        self.complete(&self.request_body(topic, kind, tags))
    }
}

impl Translator for OpenAiGenerator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, LlmError> {
        self.complete(&self.translation_body(text, source, target))
    }
}
