//! Script-entry storage on a JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::llm::ContentKind;

/// Errors that can occur while reading or writing script entries.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Entry {index} out of range (1-{total})")]
    OutOfRange { index: usize, total: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Accept `true`, `"True"`, `"true"` and numbers for flag columns.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}

/// Accept strings or numbers for text columns.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn default_seed() -> String {
    "random".to_string()
}

fn default_part() -> String {
    "1".to_string()
}

fn default_kind() -> String {
    ContentKind::default().label().to_string()
}

/// One row of the narration table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    #[serde(default, deserialize_with = "text")]
    pub series: String,
    #[serde(default = "default_seed", deserialize_with = "text")]
    pub seed: String,
    #[serde(default = "default_part", deserialize_with = "text")]
    pub part: String,
    /// Generate the main text with the language model.
    #[serde(rename = "IA", default, deserialize_with = "flag")]
    pub ai: bool,
    #[serde(default, deserialize_with = "text")]
    pub outro: String,
    /// Literal main text, used when `ai` is off.
    #[serde(default, deserialize_with = "text")]
    pub text: String,
    /// Topic handed to the language model when `ai` is on.
    #[serde(rename = "textAI", default, deserialize_with = "text")]
    pub text_ai: String,
    #[serde(rename = "randomVideo", default, deserialize_with = "flag")]
    pub random_video: bool,
    #[serde(default, deserialize_with = "text")]
    pub video: String,
    #[serde(rename = "tipo", default = "default_kind", deserialize_with = "text")]
    pub kind: String,
    #[serde(rename = "etiquetas", default, deserialize_with = "text")]
    pub tags: String,
}

impl Default for ScriptEntry {
    fn default() -> Self {
        Self {
            series: String::new(),
            seed: default_seed(),
            part: default_part(),
            ai: false,
            outro: String::new(),
            text: String::new(),
            text_ai: String::new(),
            random_video: false,
            video: String::new(),
            kind: default_kind(),
            tags: String::new(),
        }
    }
}

impl ScriptEntry {
    pub fn content_kind(&self) -> ContentKind {
        ContentKind::from_label(&self.kind)
    }

    /// Spoken introduction, e.g. `"Mi serie, parte 4"`.
    pub fn intro(&self) -> String {
        format!("{}, parte {}", self.series, self.part)
    }
}

/// Rows used when no script file can be read.
pub fn sample_entries() -> Vec<ScriptEntry> {
    vec![
        ScriptEntry {
            series: "Mi novio me engaño con la perra de mi tía".to_string(),
            part: "4".to_string(),
            ai: true,
            outro: "Sígueme para más historias completas".to_string(),
            text_ai: "Mi novio me engaño con la perra de mi tía".to_string(),
            tags: "engaño,relaciones,drama".to_string(),
            ..ScriptEntry::default()
        },
        ScriptEntry {
            series: "Titulo de la serie".to_string(),
            seed: "0".to_string(),
            part: "4".to_string(),
            outro: "Sígueme para más historias completas".to_string(),
            text: "texto variado que no genera la IA sino que se toma del texto".to_string(),
            random_video: true,
            kind: "Curiosidades".to_string(),
            tags: "datos,información".to_string(),
            ..ScriptEntry::default()
        },
    ]
}

/// Manages the script table file.
pub struct ScriptStore {
    path: PathBuf,
}

impl ScriptStore {
    /// Create a store at the default location, `~/.reelcut-rs/audio.json`.
    pub fn new() -> Self {
        let path = dirs::home_dir()
            .unwrap_or_default()
            .join(".reelcut-rs")
            .join("audio.json");

        Self { path }
    }

    /// Create a store over a custom file.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a script file.
    pub fn read(path: &Path) -> Result<Vec<ScriptEntry>, ScriptError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load entries, falling back to the sample rows when the file is
    /// missing or unreadable.
    pub fn load(&self) -> Vec<ScriptEntry> {
        if !self.path.exists() {
            info!(
                "{} not found, starting with sample entries",
                self.path.display()
            );
            return sample_entries();
        }

        match Self::read(&self.path) {
            Ok(entries) => {
                info!("Loaded {} entries from {}", entries.len(), self.path.display());
                entries
            }
            Err(e) => {
                warn!(
                    "Could not read {}: {}. Starting with sample entries",
                    self.path.display(),
                    e
                );
                sample_entries()
            }
        }
    }

    /// Rewrite the whole file.
    pub fn save(&self, entries: &[ScriptEntry]) -> Result<(), ScriptError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;

        info!("Saved {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }

    /// Replace the table with the entries of another file.
    pub fn import(&self, source: &Path) -> Result<usize, ScriptError> {
        let entries = Self::read(source)?;
        self.save(&entries)?;
        Ok(entries.len())
    }

    /// Append a blank row and save. Returns the new row count.
    pub fn add_entry(&self) -> Result<usize, ScriptError> {
        let mut entries = self.load();
        entries.push(ScriptEntry::default());
        self.save(&entries)?;
        Ok(entries.len())
    }

    /// Fetch a row by 1-based index.
    pub fn entry(entries: &[ScriptEntry], index: usize) -> Result<&ScriptEntry, ScriptError> {
        index
            .checked_sub(1)
            .and_then(|i| entries.get(i))
            .ok_or(ScriptError::OutOfRange {
                index,
                total: entries.len(),
            })
    }
}

impl Default for ScriptStore {
    fn default() -> Self {
        Self::new()
    }
}
