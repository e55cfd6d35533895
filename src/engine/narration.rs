//! Narration of script entries.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};

use crate::audio::{AudioError, concat_with_silence};
use crate::backend::{Backend, BackendError, SynthesizeRequest, short_voice_name};
use crate::llm::{LlmError, TextGenerator};
use crate::script::{ScriptEntry, ScriptError, ScriptStore};

/// Pause inserted between intro, main text and outro.
pub const PART_SILENCE_MS: u32 = 500;

/// Errors that can occur while narrating an entry.
#[derive(Error, Debug)]
pub enum NarrationError {
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    #[error("Entry {0} has AI enabled but no topic in textAI")]
    EmptyTopic(usize),

    #[error("Entry {0} has no text to narrate")]
    EmptyText(usize),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Text generation error: {0}")]
    Llm(#[from] LlmError),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// First 30 characters of `text`, trimmed, without characters that are
/// invalid in file names, spaces turned into underscores.
pub fn sanitize_file_name(text: &str) -> String {
    let short: String = text.chars().take(30).collect();
    short
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|'))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Turns script entries into WAV files.
pub struct NarrationEngine<B: Backend, G: TextGenerator> {
    backend: B,
    generator: G,
    out_dir: PathBuf,
    counter: u32,
}

impl<B: Backend, G: TextGenerator> NarrationEngine<B, G> {
    pub fn new(backend: B, generator: G, out_dir: PathBuf) -> Self {
        Self {
            backend,
            generator,
            out_dir,
            counter: 1,
        }
    }

    /// Number used for the next output file.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Main text of an entry, generated when the entry asks for it.
    pub fn main_text(&self, entry: &ScriptEntry, index: usize) -> Result<String, NarrationError> {
        if entry.ai {
            let topic = entry.text_ai.trim();
            if topic.is_empty() {
                return Err(NarrationError::EmptyTopic(index));
            }
            info!("Generating {} text about '{}'", entry.content_kind().label(), topic);
            let text = self
                .generator
                .generate(topic, entry.content_kind(), &entry.tags)?;
            return Ok(text);
        }

        let text = entry.text.trim();
        if text.is_empty() {
            return Err(NarrationError::EmptyText(index));
        }
        Ok(text.to_string())
    }

    /// Narrate entry `index` (1-based) and write the WAV file.
    pub fn render_entry(
        &mut self,
        entries: &[ScriptEntry],
        index: usize,
        voice: &str,
        speed: f32,
    ) -> Result<PathBuf, NarrationError> {
        let entry = ScriptStore::entry(entries, index)?;
        let voice = short_voice_name(voice);
        let intro = entry.intro();
        let main = self.main_text(entry, index)?;

        let mut clips = Vec::with_capacity(3);
        for part in [intro.as_str(), main.as_str(), entry.outro.trim()] {
            if part.trim().is_empty() {
                continue;
            }
            let request = SynthesizeRequest::new(part, voice).with_speed(speed);
            clips.push(self.backend.synthesize(&request)?);
        }

        let audio = concat_with_silence(&clips, PART_SILENCE_MS)?;

        std::fs::create_dir_all(&self.out_dir)?;
        let file_name = format!(
            "{:03}_{}_{}.wav",
            self.counter,
            voice,
            sanitize_file_name(&intro)
        );
        let path = self.out_dir.join(file_name);
        std::fs::write(&path, audio)?;
        self.counter += 1;

        info!("Entry {} narrated to {}", index, path.display());
        Ok(path)
    }

    /// Narrate every entry. Failed entries are logged and skipped.
    pub fn render_all(&mut self, entries: &[ScriptEntry], voice: &str, speed: f32) -> Vec<PathBuf> {
        let mut written = Vec::new();
        for index in 1..=entries.len() {
            match self.render_entry(entries, index, voice, speed) {
                Ok(path) => written.push(path),
                Err(e) => error!("Entry {} failed: {}", index, e),
            }
        }
        written
    }
}
