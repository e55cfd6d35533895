//! SRT reading and writing.

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reference width for subtitle sizing.
const REFERENCE_WIDTH: f64 = 1920.0;
const BASE_FONT_SIZE: f64 = 46.0;

/// Errors that can occur while handling subtitle files.
#[derive(Error, Debug)]
pub enum SubtitleError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("No subtitle entries in {0}")]
    Empty(String),
}

/// One timed line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl SubtitleSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Format seconds as `HH:MM:SS,mmm`. Milliseconds are truncated.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let whole = seconds.trunc() as u64;
    let millis = ((seconds - seconds.trunc()) * 1000.0) as u64;

    format!(
        "{:02}:{:02}:{:02},{:03}",
        whole / 3600,
        (whole % 3600) / 60,
        whole % 60,
        millis
    )
}

/// Parse `HH:MM:SS,mmm` (or `.` as decimal separator, any number of fields).
pub fn parse_timestamp(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .split(':')
        .rev()
        .enumerate()
        .try_fold(0.0, |total, (i, field)| {
            let field: f64 = field.parse().ok()?;
            Some(total + field * 60f64.powi(i as i32))
        })
}

/// Render segments as SRT text. Segments with blank text are skipped but
/// still consume their number.
pub fn render_srt(segments: &[SubtitleSegment]) -> String {
    let mut srt = String::new();

    for (i, segment) in segments.iter().enumerate() {
        let text = segment.text.trim();
        if text.is_empty() {
            continue;
        }
        let _ = write!(
            srt,
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_timestamp(segment.start),
            format_timestamp(segment.end),
            text
        );
    }

    srt
}

pub fn write_srt(segments: &[SubtitleSegment], path: &Path) -> Result<(), SubtitleError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_srt(segments))?;
    Ok(())
}

/// Parse SRT content. Index lines are ignored; text lines of a block are
/// joined with a space.
pub fn parse_srt(content: &str) -> Vec<SubtitleSegment> {
    let mut segments = Vec::new();
    let mut lines = content.lines().map(str::trim).peekable();

    while let Some(line) = lines.next() {
        let Some((start, end)) = line.split_once(" --> ") else {
            continue;
        };
        let (Some(start), Some(end)) = (parse_timestamp(start), parse_timestamp(end)) else {
            continue;
        };

        let mut text = Vec::new();
        while let Some(next) = lines.peek().filter(|l| !l.is_empty()) {
            text.push(*next);
            lines.next();
        }

        segments.push(SubtitleSegment::new(start, end, text.join(" ")));
    }

    segments
}

/// Read and parse an SRT file, failing when it holds no entries.
pub fn read_srt(path: &Path) -> Result<Vec<SubtitleSegment>, SubtitleError> {
    let content = std::fs::read_to_string(path)?;
    let segments = parse_srt(&content);
    if segments.is_empty() {
        return Err(SubtitleError::Empty(path.display().to_string()));
    }
    Ok(segments)
}

/// Font size in pixels for a frame `width` pixels wide.
pub fn subtitle_font_size(width: u32) -> u32 {
    let scaled = (BASE_FONT_SIZE * f64::from(width) / REFERENCE_WIDTH) as u32;
    scaled.clamp(20, 72) + 10
}
