//! reelcut-rs: highlight shorts, burned-in subtitles and script narration.
//!
//! Long videos are split into scenes with ffmpeg, a duration-bounded sample
//! of those scenes is re-encoded into a short, and subtitles come from a
//! transcription server. Narration turns script rows into WAV files through a
//! TTS server, optionally writing the text with a language model first.
//!
//! Smaller utilities ride along: PDF reports from expense CSV exports, a
//! plain-text project dump and a connectivity wait.

pub mod audio;
pub mod backend;
pub mod cli;
pub mod dump;
pub mod engine;
pub mod ffmpeg;
pub mod llm;
pub mod ping;
pub mod report;
pub mod scenes;
pub mod script;
pub mod subtitles;
pub mod transcribe;
