//! CLI argument definitions and parsing.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

use crate::scenes::SelectionConfig;

/// Shorts, subtitles and narration for video channels.
#[derive(Parser, Debug)]
#[command(name = "reelcut-rs")]
#[command(about = "Cut highlight shorts from long videos, burn subtitles and narrate scripts")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a short from each given video
    Shorts(ShortsArgs),

    /// Subtitle every video in Entrada/ into Salida/, then cut shorts into Cortos/
    Process(ProcessArgs),

    /// Narrate script entries through the TTS server
    Narrate(NarrateArgs),

    /// Manage the script table
    Entries(EntriesArgs),

    /// Turn expense CSV exports into PDF reports
    Report(ReportArgs),

    /// Write a project's file tree and file contents to one text file
    Dump(DumpArgs),

    /// Wait until a host answers ping
    Ping(PingArgs),
}

/// Scene grouping and detection tunables.
#[derive(ClapArgs, Debug, Clone)]
pub struct SelectionArgs {
    /// Scenes shorter than this many seconds are merged
    #[arg(long, default_value = "10")]
    pub min_scene: f64,

    /// Scenes longer than this many seconds are split
    #[arg(long, default_value = "30")]
    pub max_scene: f64,

    /// Seconds the short may run over its target
    #[arg(long, default_value = "5")]
    pub margin: f64,

    /// Scene change score (0-1) that counts as a cut
    #[arg(long, default_value = "0.3")]
    pub threshold: f64,
}

impl SelectionArgs {
    pub fn to_config(&self) -> SelectionConfig {
        SelectionConfig {
            min_scene: self.min_scene,
            max_scene: self.max_scene,
            margin: self.margin,
            ..SelectionConfig::default()
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct ShortsArgs {
    /// Videos to shorten
    #[arg(required = true)]
    pub videos: Vec<PathBuf>,

    /// Folder for the generated shorts
    #[arg(short, long, default_value = "Cortos")]
    pub output: PathBuf,

    /// Folder for scene caches (default: next to each video)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(ClapArgs, Debug)]
pub struct ProcessArgs {
    /// Folder holding Entrada/, Salida/ and Cortos/
    #[arg(short, long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Spoken language hint, e.g. "es" (default: auto-detect)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Transcription server (OpenAI-compatible)
    #[arg(long, default_value = "http://localhost:8000")]
    pub transcribe_url: String,

    /// Transcription model name
    #[arg(long, default_value = "medium")]
    pub transcribe_model: String,

    /// API key for the transcription server
    #[arg(long)]
    pub transcribe_api_key: Option<String>,

    /// Translate subtitles into this language, e.g. "en"
    #[arg(short, long)]
    pub target_language: Option<String>,

    /// Language model API key for translation (default: OPENAI_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Language model server for translation
    #[arg(long, default_value = crate::llm::DEFAULT_BASE_URL)]
    pub llm_url: String,

    /// Go straight to shorts from Entrada/
    #[arg(long)]
    pub skip_subtitles: bool,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(ClapArgs, Debug)]
pub struct NarrateArgs {
    /// Script table file (default: ~/.reelcut-rs/audio.json)
    #[arg(short, long)]
    pub entries: Option<PathBuf>,

    /// 1-based entry to narrate (default: all)
    #[arg(short, long)]
    pub index: Option<usize>,

    /// TTS voice
    #[arg(long, default_value = "es-BO-MarceloNeural")]
    pub voice: String,

    /// Speech speed multiplier (0.5 to 2.0)
    #[arg(short, long, default_value = "1.0", value_parser = parse_speed)]
    pub speed: f32,

    /// TTS server address
    #[arg(long, default_value = "http://localhost:5050")]
    pub backend_url: String,

    /// Folder for the narrated audio
    #[arg(short, long, default_value = "audios_generados")]
    pub output: PathBuf,

    /// Language model API key (default: OPENAI_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Language model server
    #[arg(long, default_value = crate::llm::DEFAULT_BASE_URL)]
    pub llm_url: String,

    /// List the Spanish voices of the TTS server and exit
    #[arg(long)]
    pub list_voices: bool,
}

#[derive(ClapArgs, Debug)]
pub struct EntriesArgs {
    /// Script table file (default: ~/.reelcut-rs/audio.json)
    #[arg(short, long)]
    pub entries: Option<PathBuf>,

    #[command(subcommand)]
    pub action: EntriesAction,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum EntriesAction {
    /// Print the table
    List,

    /// Append a blank row
    Add,

    /// Replace the table with a JSON file
    Import {
        /// JSON file with script rows
        file: PathBuf,
    },
}

#[derive(ClapArgs, Debug)]
pub struct ReportArgs {
    /// CSV files, or folders whose .csv files are all converted
    #[arg(default_value = ".")]
    pub inputs: Vec<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct DumpArgs {
    /// Project folder to dump
    pub root: PathBuf,

    /// Output text file
    #[arg(short, long, default_value = "estructura_proyecto.txt")]
    pub output: PathBuf,

    /// Extra folder names to leave out (repeatable)
    #[arg(long = "exclude-dir")]
    pub exclude_dirs: Vec<String>,

    /// Extra file extensions to leave out (repeatable)
    #[arg(long = "exclude-ext")]
    pub exclude_extensions: Vec<String>,

    /// Start from an empty exclusion list instead of the defaults
    #[arg(long)]
    pub no_default_excludes: bool,
}

#[derive(ClapArgs, Debug)]
pub struct PingArgs {
    /// Host to ping
    #[arg(long, default_value = crate::ping::DEFAULT_HOST)]
    pub host: String,

    /// Seconds between attempts
    #[arg(long, default_value = "10")]
    pub interval: u64,

    /// Give up after this many attempts (default: never)
    #[arg(long)]
    pub max_attempts: Option<u32>,
}

/// Errors that can occur when parsing a speed value.
#[derive(Error, Debug, PartialEq)]
pub enum SpeedParseError {
    #[error("Invalid speed '{0}', expected a number")]
    Invalid(String),

    #[error("Speed {0} out of range (0.5 to 2.0)")]
    OutOfRange(f32),
}

/// Parse a speed multiplier in `0.5..=2.0`.
///
/// # Examples
/// ```
/// use reelcut_rs::cli::parse_speed;
/// assert_eq!(parse_speed("1.5"), Ok(1.5));
/// ```
pub fn parse_speed(input: &str) -> Result<f32, SpeedParseError> {
    let speed: f32 = input
        .trim()
        .parse()
        .map_err(|_| SpeedParseError::Invalid(input.to_string()))?;

    if !(0.5..=2.0).contains(&speed) {
        return Err(SpeedParseError::OutOfRange(speed));
    }

    Ok(speed)
}
